//! Shared fixtures for the workspace integration tests.

use std::path::PathBuf;

/// Returns the path of a parameter set under `fixtures/`.
///
/// - `tiny` — state dimension 2, hidden widths 3 and 2
/// - `unit` — state dimension 1, unit weights, zero biases, `x0 = [0.2]`
/// - `mismatched` — `weights_2.csv` has one row too many
#[must_use]
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

//! Trained network parameters and their CSV storage format.
//!
//! A parameter set is a directory of seven comma-separated files:
//!
//! | file | array |
//! |---|---|
//! | `initial_state.csv` | initial latent state `x0` |
//! | `weights_{0,1,2}.csv` | weight matrices, one CSV row per matrix row |
//! | `biases_{0,1,2}.csv` | bias vectors, as a single row or a single column |

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, Trim};
use log::info;
use ndarray::{Array1, Array2};
use thiserror::Error;

const WEIGHT_COLUMNS: [&str; 3] = ["W0 columns", "W1 columns", "W2 columns"];
const BIAS_LENGTHS: [&str; 3] = ["T0 length", "T1 length", "T2 length"];

/// Errors raised while loading or checking a parameter set.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}, row {row}: cannot parse {field:?} as a number", path.display())]
    Parse {
        path: PathBuf,
        row: usize,
        field: String,
    },

    #[error("{} contains no values", path.display())]
    Empty { path: PathBuf },

    #[error("{}, row {row}: expected {expected} columns, found {found}", path.display())]
    Ragged {
        path: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),

    #[error("initial state is empty")]
    EmptyState,

    #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

/// One affine layer `W · input − T`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    weights: Array2<f64>,
    biases: Array1<f64>,
}

impl Layer {
    /// Creates a layer from its weight matrix and bias (threshold) vector.
    ///
    /// Shapes are checked when the layer is assembled into a [`ParameterSet`].
    #[must_use]
    pub fn new(weights: Array2<f64>, biases: Array1<f64>) -> Self {
        Self { weights, biases }
    }

    #[must_use]
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    #[must_use]
    pub fn biases(&self) -> &Array1<f64> {
        &self.biases
    }

    /// Number of output units.
    #[must_use]
    pub fn width(&self) -> usize {
        self.weights.nrows()
    }
}

/// The immutable, shape-checked parameters of the surrogate.
///
/// Holds the initial latent state and the three network layers. Once built,
/// a parameter set is never modified; every solve copies the initial state
/// before stepping it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    x0: Array1<f64>,
    layers: [Layer; 3],
}

impl ParameterSet {
    /// Assembles a parameter set and checks that its shapes chain together.
    ///
    /// With `D = x0.len()`, the first layer must accept `D + 2` inputs
    /// (calcium, length, then the state), each layer must accept the previous
    /// layer's width, the last layer must produce `D` outputs, and each bias
    /// vector must match its layer's width.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::EmptyState`] for an empty `x0` and
    /// [`ParameterError::DimensionMismatch`] naming the first inconsistent array.
    pub fn new(x0: Array1<f64>, layers: [Layer; 3]) -> Result<Self, ParameterError> {
        let dim = x0.len();
        if dim == 0 {
            return Err(ParameterError::EmptyState);
        }

        let mut width = dim + 2;
        for (i, layer) in layers.iter().enumerate() {
            check(WEIGHT_COLUMNS[i], width, layer.weights.ncols())?;
            check(BIAS_LENGTHS[i], layer.width(), layer.biases.len())?;
            width = layer.width();
        }
        check("W2 rows", dim, width)?;

        Ok(Self { x0, layers })
    }

    /// Loads and checks a parameter set stored as CSV files in `dir`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if a file is missing or malformed, or if
    /// the loaded arrays are not shape compatible.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ParameterError> {
        let dir = dir.as_ref();

        let x0 = load_vector(&dir.join("initial_state.csv"))?;
        let layer = |i: usize| -> Result<Layer, ParameterError> {
            let weights = load_matrix(&dir.join(format!("weights_{i}.csv")))?;
            let biases = load_vector(&dir.join(format!("biases_{i}.csv")))?;
            Ok(Layer::new(weights, biases))
        };
        let params = Self::new(x0, [layer(0)?, layer(1)?, layer(2)?])?;

        info!(
            "Loaded parameter set from {}: state dimension {}, hidden widths {:?}",
            dir.display(),
            params.state_dim(),
            params.hidden_widths(),
        );
        Ok(params)
    }

    /// The initial latent state.
    #[must_use]
    pub fn x0(&self) -> &Array1<f64> {
        &self.x0
    }

    /// The initial permissivity, `x0[0]`.
    #[must_use]
    pub fn initial_permissivity(&self) -> f64 {
        self.x0[0]
    }

    #[must_use]
    pub fn layers(&self) -> &[Layer; 3] {
        &self.layers
    }

    /// Dimension `D` of the latent state.
    #[must_use]
    pub fn state_dim(&self) -> usize {
        self.x0.len()
    }

    /// Widths of the two tanh layers.
    #[must_use]
    pub fn hidden_widths(&self) -> [usize; 2] {
        [self.layers[0].width(), self.layers[1].width()]
    }
}

fn check(what: &'static str, expected: usize, found: usize) -> Result<(), ParameterError> {
    if expected == found {
        Ok(())
    } else {
        Err(ParameterError::DimensionMismatch {
            what,
            expected,
            found,
        })
    }
}

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(false).trim(Trim::All).flexible(true);
    builder
}

fn load_matrix(path: &Path) -> Result<Array2<f64>, ParameterError> {
    let reader = reader_builder()
        .from_path(path)
        .map_err(|source| csv_error(path, source))?;
    matrix_from_rows(read_rows(reader, path)?, path)
}

fn load_vector(path: &Path) -> Result<Array1<f64>, ParameterError> {
    let reader = reader_builder()
        .from_path(path)
        .map_err(|source| csv_error(path, source))?;
    vector_from_rows(read_rows(reader, path)?, path)
}

fn csv_error(path: &Path, source: csv::Error) -> ParameterError {
    ParameterError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn read_rows<R: Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<Vec<Vec<f64>>, ParameterError> {
    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| csv_error(path, source))?;
        let row = record
            .iter()
            .map(|field| {
                field.parse::<f64>().map_err(|_| ParameterError::Parse {
                    path: path.to_path_buf(),
                    row: index + 1,
                    field: field.to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }
    Ok(rows)
}

fn matrix_from_rows(rows: Vec<Vec<f64>>, path: &Path) -> Result<Array2<f64>, ParameterError> {
    let Some(ncols) = rows.first().map(Vec::len) else {
        return Err(ParameterError::Empty {
            path: path.to_path_buf(),
        });
    };

    if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != ncols) {
        return Err(ParameterError::Ragged {
            path: path.to_path_buf(),
            row: index + 1,
            expected: ncols,
            found: row.len(),
        });
    }

    let nrows = rows.len();
    let flat = rows.into_iter().flatten().collect();
    Ok(Array2::from_shape_vec((nrows, ncols), flat)?)
}

fn vector_from_rows(rows: Vec<Vec<f64>>, path: &Path) -> Result<Array1<f64>, ParameterError> {
    let values: Vec<f64> = rows.into_iter().flatten().collect();
    if values.is_empty() {
        return Err(ParameterError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(Array1::from(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    fn rows(text: &str) -> Result<Vec<Vec<f64>>, ParameterError> {
        let reader = reader_builder().from_reader(text.as_bytes());
        read_rows(reader, Path::new("test.csv"))
    }

    fn matrix(text: &str) -> Result<Array2<f64>, ParameterError> {
        matrix_from_rows(rows(text)?, Path::new("w.csv"))
    }

    fn vector(text: &str) -> Result<Array1<f64>, ParameterError> {
        vector_from_rows(rows(text)?, Path::new("b.csv"))
    }

    /// D = 2 with hidden widths 3 and 2.
    fn layers() -> [Layer; 3] {
        [
            Layer::new(Array2::zeros((3, 4)), Array1::zeros(3)),
            Layer::new(Array2::zeros((2, 3)), Array1::zeros(2)),
            Layer::new(Array2::zeros((2, 2)), Array1::zeros(2)),
        ]
    }

    #[test]
    fn consistent_shapes_are_accepted() {
        let params = ParameterSet::new(array![0.1, 0.0], layers()).unwrap();

        assert_eq!(params.state_dim(), 2);
        assert_eq!(params.hidden_widths(), [3, 2]);
        assert_eq!(params.initial_permissivity(), 0.1);
    }

    #[test]
    fn first_layer_must_accept_forcing_and_state() {
        let mut layers = layers();
        layers[0] = Layer::new(Array2::zeros((3, 2)), Array1::zeros(3));

        let err = ParameterSet::new(array![0.1, 0.0], layers).unwrap_err();

        assert!(matches!(
            err,
            ParameterError::DimensionMismatch {
                what: "W0 columns",
                expected: 4,
                found: 2,
            }
        ));
    }

    #[test]
    fn bias_length_must_match_layer_width() {
        let mut layers = layers();
        layers[1] = Layer::new(Array2::zeros((2, 3)), Array1::zeros(5));

        let err = ParameterSet::new(array![0.1, 0.0], layers).unwrap_err();

        assert!(matches!(
            err,
            ParameterError::DimensionMismatch {
                what: "T1 length",
                expected: 2,
                found: 5,
            }
        ));
    }

    #[test]
    fn output_width_must_equal_state_dimension() {
        let mut layers = layers();
        layers[2] = Layer::new(Array2::zeros((3, 2)), Array1::zeros(3));

        let err = ParameterSet::new(array![0.1, 0.0], layers).unwrap_err();

        assert!(matches!(
            err,
            ParameterError::DimensionMismatch {
                what: "W2 rows",
                expected: 2,
                found: 3,
            }
        ));
    }

    #[test]
    fn empty_state_is_rejected() {
        let err = ParameterSet::new(Array1::zeros(0), layers()).unwrap_err();
        assert!(matches!(err, ParameterError::EmptyState));
    }

    #[test]
    fn matrix_rows_map_to_output_units() {
        let matrix = matrix("1, 2, 3\n4, 5, 6\n").unwrap();

        assert_eq!(matrix, array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    }

    #[test]
    fn vectors_read_as_row_or_column() {
        let row = vector("0.5,1e-3,-2").unwrap();
        let column = vector("0.5\n1e-3\n-2\n").unwrap();

        assert_eq!(row, array![0.5, 1e-3, -2.0]);
        assert_eq!(row, column);
    }

    #[test]
    fn ragged_matrix_is_rejected() {
        let err = matrix("1,2\n3\n").unwrap_err();

        assert!(matches!(
            err,
            ParameterError::Ragged {
                row: 2,
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn unparsable_field_names_row() {
        let err = rows("1,2\n3,abc\n").unwrap_err();

        match err {
            ParameterError::Parse { row, field, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_file_is_rejected() {
        let err = vector("").unwrap_err();
        assert!(matches!(err, ParameterError::Empty { .. }));
    }

    #[test]
    fn missing_directory_reports_path() {
        let err = ParameterSet::from_dir("/nonexistent/parameter/set").unwrap_err();
        assert!(err.to_string().contains("initial_state.csv"));
    }
}

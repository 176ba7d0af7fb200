//! Coherent sums, model densities and the interference normalization.

use dalitz_core::complex::dot;
use dalitz_core::{Complex, DalitzError, ErrorInfo, Real};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

fn normalization_error(code: &str, message: &str) -> DalitzError {
    DalitzError::Normalization(ErrorInfo::new(code, message))
}

fn check_lengths(amplitudes: usize, coefficients: usize) -> Result<(), DalitzError> {
    if amplitudes == coefficients {
        return Ok(());
    }
    Err(DalitzError::Normalization(
        ErrorInfo::new(
            "coefficient-mismatch",
            "amplitude and coefficient vectors differ in length",
        )
        .with_context("amplitudes", amplitudes.to_string())
        .with_context("coefficients", coefficients.to_string()),
    ))
}

/// Model density `|Σ θᵢ Aᵢ|²`.
pub fn intensity<T: Real>(
    amplitudes: &[Complex<T>],
    coefficients: &[Complex<T>],
) -> Result<T, DalitzError> {
    check_lengths(amplitudes.len(), coefficients.len())?;
    Ok(dot(amplitudes, coefficients).abs2())
}

/// Square matrix `I_ij` of complex overlap integrals between resonances,
/// stored as separate real and imaginary parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixRecord", into = "MatrixRecord")]
pub struct InterferenceMatrix {
    re: DMatrix<f64>,
    im: DMatrix<f64>,
}

/// Row-major serialized form of an [`InterferenceMatrix`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRecord {
    /// Real parts, one inner vector per row.
    pub re: Vec<Vec<f64>>,
    /// Imaginary parts, one inner vector per row.
    pub im: Vec<Vec<f64>>,
}

impl InterferenceMatrix {
    /// Validates that both parts are square and of equal dimension.
    pub fn new(re: DMatrix<f64>, im: DMatrix<f64>) -> Result<Self, DalitzError> {
        if !re.is_square() || !im.is_square() || re.shape() != im.shape() {
            return Err(DalitzError::Normalization(
                ErrorInfo::new(
                    "matrix-shape",
                    "interference matrix parts must be square and of equal size",
                )
                .with_context("re", format!("{}x{}", re.nrows(), re.ncols()))
                .with_context("im", format!("{}x{}", im.nrows(), im.ncols())),
            ));
        }
        Ok(Self { re, im })
    }

    /// Builds the matrix from row-major nested vectors.
    pub fn from_rows(re: &[Vec<f64>], im: &[Vec<f64>]) -> Result<Self, DalitzError> {
        Self::new(to_matrix(re)?, to_matrix(im)?)
    }

    /// Identity overlap: normalization reduces to `Σ |θᵢ|²`.
    pub fn identity(dim: usize) -> Self {
        Self {
            re: DMatrix::identity(dim, dim),
            im: DMatrix::zeros(dim, dim),
        }
    }

    /// Number of resonances the matrix covers.
    pub fn dim(&self) -> usize {
        self.re.nrows()
    }

    /// Entry `I_ij`.
    pub fn entry(&self, row: usize, col: usize) -> Option<Complex<f64>> {
        Some(Complex::new(*self.re.get((row, col))?, *self.im.get((row, col))?))
    }
}

fn to_matrix(rows: &[Vec<f64>]) -> Result<DMatrix<f64>, DalitzError> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != ncols) {
        return Err(normalization_error("matrix-shape", "rows have different lengths"));
    }
    Ok(DMatrix::from_fn(nrows, ncols, |i, j| rows[i][j]))
}

impl TryFrom<MatrixRecord> for InterferenceMatrix {
    type Error = DalitzError;

    fn try_from(record: MatrixRecord) -> Result<Self, Self::Error> {
        Self::from_rows(&record.re, &record.im)
    }
}

impl From<InterferenceMatrix> for MatrixRecord {
    fn from(matrix: InterferenceMatrix) -> Self {
        let rows = |m: &DMatrix<f64>| -> Vec<Vec<f64>> {
            m.row_iter()
                .map(|row| row.iter().copied().collect())
                .collect()
        };
        Self {
            re: rows(&matrix.re),
            im: rows(&matrix.im),
        }
    }
}

/// Normalization `Σᵢⱼ Re(θᵢ* · I_ij · θⱼ)`.
pub fn normalization<T: Real>(
    coefficients: &[Complex<T>],
    matrix: &InterferenceMatrix,
) -> Result<T, DalitzError> {
    check_lengths(matrix.dim(), coefficients.len())?;
    let mut norm = T::zero();
    for (i, theta_i) in coefficients.iter().enumerate() {
        let mut row = Complex::zero();
        for (j, theta_j) in coefficients.iter().enumerate() {
            let entry = Complex::new(
                T::from_f64(matrix.re[(i, j)]),
                T::from_f64(matrix.im[(i, j)]),
            );
            row = row + entry * *theta_j;
        }
        norm = norm + theta_i.re * row.re + theta_i.im * row.im;
    }
    Ok(norm)
}

/// Normalized density `|Σ θᵢ Aᵢ|² / Norm(θ)`.
pub fn normalized_intensity<T: Real>(
    amplitudes: &[Complex<T>],
    coefficients: &[Complex<T>],
    matrix: &InterferenceMatrix,
) -> Result<T, DalitzError> {
    Ok(intensity(amplitudes, coefficients)? / normalization(coefficients, matrix)?)
}

//! Weighted sums of Pauli strings expanded to dense matrices.
//!
//! A Hamiltonian is a sum of weighted Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a dense tensor product of single-qubit Pauli operators
//! and c_k ∈ ℝ. The dense 2^L × 2^L matrix is computed eagerly at
//! construction and immutable afterwards.
//!
//! # Example
//!
//! ```rust
//! use alsvid_ham::Hamiltonian;
//!
//! // H = 1.0·ZZ + 1.0·ZX
//! let h = Hamiltonian::from_labels(&[1.0, 1.0], &["ZZ", "ZX"]).unwrap();
//! assert_eq!(h.n_qubits(), 2);
//! assert_eq!(h.dim(), 4);
//! assert_eq!(h.matrix()[(0, 0)].re, 1.0);
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use ndarray::Array2;
use num_complex::Complex64;
use tracing::debug;

use crate::error::{HamError, HamResult};
use crate::pauli::PauliString;

/// A sum-of-Pauli-strings Hamiltonian with its dense matrix expansion.
#[derive(Debug, Clone)]
pub struct Hamiltonian {
    coeffs: Vec<f64>,
    paulis: Vec<PauliString>,
    matrix: Array2<Complex64>,
}

impl Hamiltonian {
    /// Build from parallel coefficient and Pauli-string lists.
    ///
    /// Fails if the lists have different lengths, are empty, or the strings
    /// span different qubit counts. The matrix is accumulated in complex
    /// arithmetic throughout — Y terms introduce imaginary entries, so a
    /// single matrix type covers every term.
    pub fn new(coeffs: Vec<f64>, paulis: Vec<PauliString>) -> HamResult<Self> {
        if coeffs.len() != paulis.len() {
            return Err(HamError::DimensionMismatch {
                n_coeffs: coeffs.len(),
                n_paulis: paulis.len(),
            });
        }
        if coeffs.is_empty() {
            return Err(HamError::EmptyHamiltonian);
        }
        let n_qubits = paulis[0].n_qubits();
        for (term, pauli) in paulis.iter().enumerate() {
            if pauli.n_qubits() != n_qubits {
                return Err(HamError::InconsistentQubitCount {
                    term,
                    expected: n_qubits,
                    found: pauli.n_qubits(),
                });
            }
        }

        let dim = 1usize << n_qubits;
        debug!(
            n_terms = coeffs.len(),
            n_qubits,
            dim,
            "expanding Hamiltonian to dense matrix"
        );
        let mut matrix = Array2::<Complex64>::zeros((dim, dim));
        for (coeff, pauli) in coeffs.iter().zip(&paulis) {
            matrix.scaled_add(Complex64::new(*coeff, 0.0), &pauli.matrix());
        }

        Ok(Self {
            coeffs,
            paulis,
            matrix,
        })
    }

    /// Build from coefficients and Pauli label strings like `"XXZ"`.
    pub fn from_labels(coeffs: &[f64], labels: &[&str]) -> HamResult<Self> {
        let paulis = labels
            .iter()
            .map(|s| s.parse())
            .collect::<HamResult<Vec<PauliString>>>()?;
        Self::new(coeffs.to_vec(), paulis)
    }

    /// Load from a plain-text term file, one `<coefficient> <pauli_string>`
    /// pair per line. Blank lines and surrounding whitespace are tolerated.
    pub fn from_file(path: impl AsRef<Path>) -> HamResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| HamError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut coeffs = Vec::new();
        let mut paulis = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (Some(coeff_str), Some(label), None) =
                (fields.next(), fields.next(), fields.next())
            else {
                return Err(HamError::Parse {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    message: format!("expected '<coefficient> <pauli_string>', got {line:?}"),
                });
            };
            let coeff: f64 = coeff_str.parse().map_err(|_| HamError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                message: format!("invalid coefficient {coeff_str:?}"),
            })?;
            coeffs.push(coeff);
            paulis.push(label.parse()?);
        }

        debug!(path = %path.display(), n_terms = coeffs.len(), "parsed Hamiltonian file");
        Self::new(coeffs, paulis)
    }

    /// The term coefficients.
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// The Pauli strings, parallel to [`coeffs`](Self::coeffs).
    pub fn paulis(&self) -> &[PauliString] {
        &self.paulis
    }

    /// The precomputed dense matrix. Pure accessor, no recomputation.
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.coeffs.len()
    }

    /// Number of qubits L.
    pub fn n_qubits(&self) -> usize {
        self.paulis[0].n_qubits()
    }

    /// Matrix dimension 2^L.
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Spectral norm upper bound: Σ |c_k|.
    pub fn lambda(&self) -> f64 {
        self.coeffs.iter().map(|c| c.abs()).sum()
    }

    /// True if the matrix equals its own conjugate transpose within `tol`.
    pub fn is_hermitian(&self, tol: f64) -> bool {
        let n = self.dim();
        for i in 0..n {
            for j in 0..n {
                let diff = self.matrix[(i, j)] - self.matrix[(j, i)].conj();
                if diff.norm() > tol {
                    return false;
                }
            }
        }
        true
    }
}

impl fmt::Display for Hamiltonian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, (coeff, pauli)) in self.coeffs.iter().zip(&self.paulis).enumerate() {
            if k > 0 {
                write!(f, " + ")?;
            }
            write!(f, "({coeff}) [{pauli}]")?;
        }
        Ok(())
    }
}

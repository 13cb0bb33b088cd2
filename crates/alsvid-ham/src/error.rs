//! Error types for the ham crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by Hamiltonian construction and parsing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HamError {
    /// Coefficient and Pauli-string lists have different lengths.
    #[error("coefficient/Pauli-string length mismatch: {n_coeffs} coefficients vs {n_paulis} strings")]
    DimensionMismatch {
        /// Number of coefficients supplied.
        n_coeffs: usize,
        /// Number of Pauli strings supplied.
        n_paulis: usize,
    },

    /// Hamiltonian contains no terms.
    #[error("Hamiltonian is empty — no terms to expand")]
    EmptyHamiltonian,

    /// A Pauli label contains a character outside {I, X, Y, Z}.
    #[error("invalid Pauli character '{found}' (expected one of I, X, Y, Z)")]
    InvalidPauliChar {
        /// The offending character.
        found: char,
    },

    /// Pauli strings in one Hamiltonian span different qubit counts.
    #[error("term {term} acts on {found} qubits but the Hamiltonian has {expected}")]
    InconsistentQubitCount {
        /// Zero-based index of the offending term.
        term: usize,
        /// Qubit count established by the first term.
        expected: usize,
        /// Qubit count of the offending term.
        found: usize,
    },

    /// A term file could not be read.
    #[error("failed to read Hamiltonian file {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line of a term file is malformed.
    #[error("parse error in {path} at line {line}: {message}")]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
}

/// Result type for Hamiltonian operations.
pub type HamResult<T> = Result<T, HamError>;

//! `alsvid-ham` — Pauli-string Hamiltonian construction.
//!
//! Expands a weighted sum of Pauli strings into its dense complex matrix
//! via iterated Kronecker products:
//!
//!   H = Σ_k  c_k · (P_k,1 ⊗ P_k,2 ⊗ … ⊗ P_k,L)
//!
//! Terms can be supplied programmatically or loaded from a plain-text file
//! with one `<coefficient> <pauli_string>` pair per line.
//!
//! # Quick start
//!
//! ```rust
//! use alsvid_ham::Hamiltonian;
//!
//! let h = Hamiltonian::from_labels(&[0.6], &["XXZ"]).unwrap();
//! assert_eq!(h.dim(), 8);
//! assert!(h.is_hermitian(1e-12));
//! ```

pub mod error;
pub mod hamiltonian;
pub mod pauli;

pub use error::{HamError, HamResult};
pub use hamiltonian::Hamiltonian;
pub use pauli::{PauliOp, PauliString};

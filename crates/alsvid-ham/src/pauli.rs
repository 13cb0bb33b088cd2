//! Single-qubit Pauli operators and dense Pauli strings.
//!
//! A Pauli string names one operator per qubit, leftmost label = most
//! significant qubit block in the tensor-product expansion:
//!
//!   "XZI"  ≡  X ⊗ Z ⊗ I
//!
//! Unlike sparse representations that drop identities, strings here are
//! dense: every qubit is listed, so the string length *is* the qubit count.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, array};
use ndarray::linalg::kron;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{HamError, HamResult};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// Parse a single Pauli label character.
    pub fn from_char(c: char) -> HamResult<Self> {
        match c {
            'I' => Ok(PauliOp::I),
            'X' => Ok(PauliOp::X),
            'Y' => Ok(PauliOp::Y),
            'Z' => Ok(PauliOp::Z),
            found => Err(HamError::InvalidPauliChar { found }),
        }
    }

    /// The label character for this operator.
    pub fn label(self) -> char {
        match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }

    /// The 2×2 complex matrix of this operator.
    pub fn matrix(self) -> Array2<Complex64> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        match self {
            PauliOp::I => array![[one, zero], [zero, one]],
            PauliOp::X => array![[zero, one], [one, zero]],
            PauliOp::Y => array![[zero, -i], [i, zero]],
            PauliOp::Z => array![[one, zero], [zero, -one]],
        }
    }
}

impl fmt::Display for PauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A dense tensor product of Pauli operators, one per qubit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauliString {
    ops: Vec<PauliOp>,
}

impl PauliString {
    /// Construct from explicit per-qubit operators.
    pub fn from_ops(ops: impl IntoIterator<Item = PauliOp>) -> Self {
        Self {
            ops: ops.into_iter().collect(),
        }
    }

    /// The per-qubit operators, most significant qubit first.
    pub fn ops(&self) -> &[PauliOp] {
        &self.ops
    }

    /// Number of qubits this string acts on.
    pub fn n_qubits(&self) -> usize {
        self.ops.len()
    }

    /// True if every operator is the identity.
    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(|op| *op == PauliOp::I)
    }

    /// Dense 2^L × 2^L matrix: the iterated Kronecker product of the
    /// per-qubit matrices, taken in label order.
    pub fn matrix(&self) -> Array2<Complex64> {
        let mut m = Array2::from_elem((1, 1), Complex64::new(1.0, 0.0));
        for op in &self.ops {
            m = kron(&m, &op.matrix());
        }
        m
    }
}

impl FromStr for PauliString {
    type Err = HamError;

    fn from_str(s: &str) -> HamResult<Self> {
        let ops = s.chars().map(PauliOp::from_char).collect::<HamResult<Vec<_>>>()?;
        Ok(Self { ops })
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

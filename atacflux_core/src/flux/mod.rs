//! Module for propagating flux through a pathway

pub mod solution;
pub mod solver;

use thiserror::Error;

use crate::accessibility::AccessibilityError;

/// Errors raised when a solve can't be attempted
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SolveError {
    #[error("Gene {gene} on edge {edge} has no accessibility value")]
    MissingAccessibility { edge: String, gene: String },
    #[error("Input flux must be finite and non-negative, got {0}")]
    InvalidInputFlux(f64),
    #[error("Unable to resolve accessibility")]
    Accessibility(#[from] AccessibilityError),
}

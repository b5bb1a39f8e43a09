//! Module for reading and writing pathway datasets
pub mod json;

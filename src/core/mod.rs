//! Core document types, code tables, validation, and clave numbering.
//!
//! This module provides the foundational types for Costa Rican electronic
//! invoicing per the Hacienda 4.4 structures, with builder-level validation.

mod builder;
mod clave;
mod codes;
mod error;
mod types;
mod validation;

pub use builder::*;
pub use clave::{consecutive_number, document_key, number_digits, resolve_type_code};
pub use codes::*;
pub use error::*;
pub use types::*;
pub use validation::*;

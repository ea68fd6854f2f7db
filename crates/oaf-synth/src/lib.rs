//! Schema-driven example data for generated test flows.
//!
//! [`DataSynthesizer`] produces values that satisfy a [`JsonSchema`]
//! and, through [`invalid_value`], values that deliberately break one of
//! its constraints.
//!
//! [`JsonSchema`]: oaf_core::JsonSchema

pub mod formats;
pub mod invalid;
pub mod locale;
pub mod synthesizer;

pub use formats::{FieldHint, StringFormat};
pub use invalid::{InvalidValue, Violation, invalid_value};
pub use synthesizer::{
    DataSynthesizer, Examples, MAX_STRING_LEN, effective_bounds, fit_length, number_value,
};

//! Calculator inputs, validation and batch loading

mod data;
mod validator;
pub mod loader;

pub use data::{Field, GrowthModel, RawInputs, ValidatedInputs, MAX_AMOUNT, MAX_PERCENT};
pub use validator::{validate, FieldError, FieldErrorReason, ValidationErrors};
pub use loader::{load_inputs, load_inputs_from_reader};

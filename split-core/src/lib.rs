pub mod calculations;
pub mod models;
pub mod share;
pub mod utils;
pub mod validate;

pub use calculations::compute;
pub use models::{CalculationInput, CalculationResult, HistoryEntry};
pub use validate::{RawCalculationInput, ValidationErrors, validate};

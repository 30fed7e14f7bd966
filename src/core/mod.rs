pub mod engine;
pub mod estimator;
pub mod settings;

pub use crate::domain::model::{AlcoholInput, Assessment, GainResult, SmokingInput};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;

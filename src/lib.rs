pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::storage::LocalStorage;
pub use crate::app::i18n::{Locale, Messages};
pub use crate::app::render::RenderContext;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{engine::ReportEngine, estimator::GainEstimator};
pub use crate::domain::model::{AlcoholInput, Assessment, Factor, GainResult, Sex, SmokingInput};
pub use crate::utils::error::{GainError, Result};

// Presentation and export around the estimator.

pub mod export;
pub mod i18n;
pub mod render;

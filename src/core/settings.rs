//! Named model constants.
//!
//! Every factor has one canonical model and one legacy linear model. The
//! defaults below reproduce the published demo numbers; a TOML file may
//! override any single field.

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_negative, validate_ordered, validate_positive, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlcoholModel {
    #[default]
    RiskRatio,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmokingModel {
    #[default]
    Adjusted,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Nearest whole month, ties to even
    #[default]
    Whole,
    OneDecimal,
}

impl Rounding {
    pub fn apply(self, months: f64) -> f64 {
        match self {
            Rounding::Whole => months.round_ties_even(),
            Rounding::OneDecimal => round_to(months, 1),
        }
    }
}

/// 取到指定小數位，同位數時取偶數
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round_ties_even() / scale
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Out-of-range input fails with `InvalidInput`
    #[default]
    Strict,
    /// Out-of-range input is pulled back into range
    Clamp,
}

/// `RR = 1 + a*weekly + b*binge + c*(years/span)`, scaled by sex and age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskRatioParams {
    /// a
    pub weekly_drink_weight: f64,
    /// b
    pub binge_weight: f64,
    /// c
    pub exposure_weight: f64,
    pub exposure_span_years: f64,
    /// Drinks per occasion at which the binge flag is set
    pub binge_threshold: u32,
    pub rr_floor: f64,
    pub female_factor: f64,
    pub age_pivot: f64,
    pub age_base: f64,
    pub age_slope: f64,
    pub age_floor: f64,
    /// k: years gained for a full relative risk reduction
    pub scale_years: f64,
    pub cap_years: f64,
    pub month_rounding: Rounding,
}

impl Default for RiskRatioParams {
    fn default() -> Self {
        Self {
            weekly_drink_weight: 0.02,
            binge_weight: 0.15,
            exposure_weight: 0.10,
            exposure_span_years: 20.0,
            binge_threshold: 5,
            rr_floor: 0.8,
            female_factor: 0.95,
            age_pivot: 20.0,
            age_base: 1.2,
            age_slope: 0.01,
            age_floor: 0.6,
            scale_years: 8.0,
            cap_years: 3.0,
            month_rounding: Rounding::Whole,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearAlcoholParams {
    pub months_per_day: f64,
}

impl Default for LinearAlcoholParams {
    fn default() -> Self {
        Self { months_per_day: 0.8 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlcoholSettings {
    pub model: AlcoholModel,
    pub risk_ratio: RiskRatioParams,
    pub linear: LinearAlcoholParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustedSmokingParams {
    pub months_per_cigarette: f64,
    pub female_factor: f64,
    pub age_pivot: f64,
    pub age_base: f64,
    pub age_slope: f64,
    pub age_floor: f64,
    /// Up to this many years the exposure factor stays at 1.0
    pub years_threshold: u32,
    pub years_base: f64,
    pub years_span: f64,
    pub years_factor_min: f64,
    pub years_factor_max: f64,
    pub cap_months: f64,
}

impl Default for AdjustedSmokingParams {
    fn default() -> Self {
        Self {
            months_per_cigarette: 1.5,
            female_factor: 0.95,
            age_pivot: 20.0,
            age_base: 1.1,
            age_slope: 0.008,
            age_floor: 0.6,
            years_threshold: 1,
            years_base: 0.9,
            years_span: 50.0,
            years_factor_min: 0.9,
            years_factor_max: 1.2,
            cap_months: 60.0,
        }
    }
}

/// 舊版線性模型：每日 20 支降到 0 約等於 96 個月
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearSmokingParams {
    pub reference_cigarettes: f64,
    pub months_per_reference: f64,
    pub cap_months: f64,
}

impl Default for LinearSmokingParams {
    fn default() -> Self {
        Self {
            reference_cigarettes: 20.0,
            months_per_reference: 96.0,
            cap_months: 120.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokingSettings {
    pub model: SmokingModel,
    pub adjusted: AdjustedSmokingParams,
    pub linear: LinearSmokingParams,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    pub mode: ValidationMode,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub alcohol: AlcoholSettings,
    pub smoking: SmokingSettings,
    pub validation: ValidationSettings,
}

impl Validate for RiskRatioParams {
    fn validate(&self) -> Result<()> {
        validate_non_negative("alcohol.risk_ratio.weekly_drink_weight", self.weekly_drink_weight)?;
        validate_non_negative("alcohol.risk_ratio.binge_weight", self.binge_weight)?;
        validate_non_negative("alcohol.risk_ratio.exposure_weight", self.exposure_weight)?;
        validate_positive("alcohol.risk_ratio.exposure_span_years", self.exposure_span_years)?;
        validate_positive("alcohol.risk_ratio.rr_floor", self.rr_floor)?;
        validate_non_negative("alcohol.risk_ratio.female_factor", self.female_factor)?;
        validate_non_negative("alcohol.risk_ratio.age_pivot", self.age_pivot)?;
        validate_non_negative("alcohol.risk_ratio.age_base", self.age_base)?;
        validate_non_negative("alcohol.risk_ratio.age_slope", self.age_slope)?;
        validate_non_negative("alcohol.risk_ratio.age_floor", self.age_floor)?;
        validate_non_negative("alcohol.risk_ratio.scale_years", self.scale_years)?;
        validate_positive("alcohol.risk_ratio.cap_years", self.cap_years)?;
        Ok(())
    }
}

impl Validate for LinearAlcoholParams {
    fn validate(&self) -> Result<()> {
        validate_non_negative("alcohol.linear.months_per_day", self.months_per_day)
    }
}

impl Validate for AdjustedSmokingParams {
    fn validate(&self) -> Result<()> {
        validate_non_negative("smoking.adjusted.months_per_cigarette", self.months_per_cigarette)?;
        validate_non_negative("smoking.adjusted.female_factor", self.female_factor)?;
        validate_non_negative("smoking.adjusted.age_pivot", self.age_pivot)?;
        validate_non_negative("smoking.adjusted.age_base", self.age_base)?;
        validate_non_negative("smoking.adjusted.age_slope", self.age_slope)?;
        validate_non_negative("smoking.adjusted.age_floor", self.age_floor)?;
        validate_non_negative("smoking.adjusted.years_base", self.years_base)?;
        validate_positive("smoking.adjusted.years_span", self.years_span)?;
        validate_non_negative("smoking.adjusted.years_factor_min", self.years_factor_min)?;
        validate_ordered(
            "smoking.adjusted.years_factor_min..years_factor_max",
            self.years_factor_min,
            self.years_factor_max,
        )?;
        validate_positive("smoking.adjusted.cap_months", self.cap_months)?;
        Ok(())
    }
}

impl Validate for LinearSmokingParams {
    fn validate(&self) -> Result<()> {
        validate_positive("smoking.linear.reference_cigarettes", self.reference_cigarettes)?;
        validate_non_negative("smoking.linear.months_per_reference", self.months_per_reference)?;
        validate_positive("smoking.linear.cap_months", self.cap_months)?;
        Ok(())
    }
}

impl Validate for ModelSettings {
    fn validate(&self) -> Result<()> {
        self.alcohol.risk_ratio.validate()?;
        self.alcohol.linear.validate()?;
        self.smoking.adjusted.validate()?;
        self.smoking.linear.validate()?;
        Ok(())
    }
}

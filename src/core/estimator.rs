use crate::core::settings::{
    round_to, AdjustedSmokingParams, AlcoholModel, LinearAlcoholParams, LinearSmokingParams,
    ModelSettings, RiskRatioParams, Rounding, SmokingModel, ValidationMode,
};
use crate::domain::model::{
    AlcoholInput, Assessment, Factor, GainResult, ModelDetail, RiskRatioDetail, Sex,
    SmokingAdjustmentDetail, SmokingInput,
};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Stateless estimator; every call is idempotent.
#[derive(Debug, Clone, Default)]
pub struct GainEstimator {
    settings: ModelSettings,
}

impl GainEstimator {
    pub fn new(settings: ModelSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn estimate(&self, assessment: &Assessment) -> Result<GainResult> {
        match assessment {
            Assessment::Alcohol(input) => self.estimate_alcohol_gain(input),
            Assessment::Smoking(input) => self.estimate_smoking_gain(input),
        }
    }

    /// 實際用於估算的輸入：嚴格模式下驗證，夾限模式下夾回範圍
    pub fn prepare_assessment(&self, assessment: &Assessment) -> Result<Assessment> {
        Ok(match assessment {
            Assessment::Alcohol(input) => Assessment::Alcohol(self.prepare_alcohol(input)?),
            Assessment::Smoking(input) => Assessment::Smoking(self.prepare_smoking(input)?),
        })
    }

    pub fn prepare_alcohol(&self, input: &AlcoholInput) -> Result<AlcoholInput> {
        self.prepare(input, AlcoholInput::clamped)
    }

    pub fn prepare_smoking(&self, input: &SmokingInput) -> Result<SmokingInput> {
        self.prepare(input, SmokingInput::clamped)
    }

    pub fn estimate_alcohol_gain(&self, input: &AlcoholInput) -> Result<GainResult> {
        let input = self.prepare_alcohol(input)?;
        let alcohol = &self.settings.alcohol;

        let result = match alcohol.model {
            AlcoholModel::RiskRatio => risk_ratio_alcohol_gain(&input, &alcohol.risk_ratio),
            AlcoholModel::Linear => linear_alcohol_gain(&input, &alcohol.linear),
        };

        tracing::debug!(
            "Alcohol estimate ({:?}): {} -> {} days/week, {} months",
            alcohol.model,
            input.current_days,
            input.target_days,
            result.months
        );
        Ok(result)
    }

    pub fn estimate_smoking_gain(&self, input: &SmokingInput) -> Result<GainResult> {
        let input = self.prepare_smoking(input)?;
        let smoking = &self.settings.smoking;

        let result = match smoking.model {
            SmokingModel::Adjusted => adjusted_smoking_gain(&input, &smoking.adjusted),
            SmokingModel::Linear => linear_smoking_gain(&input, &smoking.linear),
        };

        tracing::debug!(
            "Smoking estimate ({:?}): {} -> {} cigarettes/day, {} months",
            smoking.model,
            input.current_cigarettes,
            input.target_cigarettes,
            result.months
        );
        Ok(result)
    }

    /// 合計月數，不套用顯示上限
    pub fn combine(alcohol: &GainResult, smoking: &GainResult) -> f64 {
        alcohol.months + smoking.months
    }

    fn prepare<T>(&self, input: &T, clamp: fn(&T) -> T) -> Result<T>
    where
        T: Validate + Clone + PartialEq + std::fmt::Debug,
    {
        match self.settings.validation.mode {
            ValidationMode::Strict => {
                input.validate()?;
                Ok(input.clone())
            }
            ValidationMode::Clamp => {
                let clamped = clamp(input);
                if &clamped != input {
                    tracing::debug!("Input clamped into range: {:?} -> {:?}", input, clamped);
                }
                Ok(clamped)
            }
        }
    }
}

fn sex_factor(sex: Sex, female_factor: f64) -> f64 {
    match sex {
        Sex::Female => female_factor,
        Sex::Male => 1.0,
    }
}

fn age_factor(age: u32, pivot: f64, base: f64, slope: f64, floor: f64) -> f64 {
    (base - (age as f64 - pivot) * slope).max(floor)
}

/// Legacy alcohol model: a fixed number of months per drinking day dropped.
pub fn linear_alcohol_gain(input: &AlcoholInput, params: &LinearAlcoholParams) -> GainResult {
    let delta_days = input.current_days.saturating_sub(input.target_days);
    GainResult {
        factor: Factor::Alcohol,
        months: Rounding::OneDecimal.apply(delta_days as f64 * params.months_per_day),
        capped: false,
        detail: None,
    }
}

/// Relative-risk alcohol model.
///
/// The binge flag depends only on drinks per occasion, so it is identical
/// before and after the change and cancels out of the RR difference.
pub fn risk_ratio_alcohol_gain(input: &AlcoholInput, params: &RiskRatioParams) -> GainResult {
    let now_drinks_per_week = input.current_days.saturating_mul(input.drinks_per_day);
    let after_drinks_per_week = input.target_days.saturating_mul(input.drinks_per_day);
    let binge = input.drinks_per_day >= params.binge_threshold;

    let binge_term = if binge { params.binge_weight } else { 0.0 };
    let exposure_term =
        params.exposure_weight * (input.years_drinking as f64 / params.exposure_span_years);
    let relative_risk = |weekly: u32| {
        (1.0 + params.weekly_drink_weight * weekly as f64 + binge_term + exposure_term)
            .max(params.rr_floor)
    };

    let rr_now = relative_risk(now_drinks_per_week);
    let rr_after = relative_risk(after_drinks_per_week);

    let adjustment = sex_factor(input.sex, params.female_factor)
        * age_factor(
            input.age,
            params.age_pivot,
            params.age_base,
            params.age_slope,
            params.age_floor,
        );

    let raw_years = params.scale_years * (rr_now - rr_after) / rr_now * adjustment;
    let gain_years = raw_years.clamp(0.0, params.cap_years);
    let months = params.month_rounding.apply(gain_years * 12.0);

    GainResult {
        factor: Factor::Alcohol,
        months,
        capped: raw_years > params.cap_years,
        detail: Some(ModelDetail::RiskRatio(RiskRatioDetail {
            now_drinks_per_week,
            after_drinks_per_week,
            binge,
            rr_now: round_to(rr_now, 3),
            rr_after: round_to(rr_after, 3),
            adjustment: round_to(adjustment, 3),
            gain_years: round_to(gain_years, 2),
        })),
    }
}

/// Legacy smoking model: `reduction / 20 * 96` months.
pub fn linear_smoking_gain(input: &SmokingInput, params: &LinearSmokingParams) -> GainResult {
    let reduction = input.current_cigarettes.saturating_sub(input.target_cigarettes);
    let raw = reduction as f64 / params.reference_cigarettes * params.months_per_reference;

    GainResult {
        factor: Factor::Smoking,
        months: raw.clamp(0.0, params.cap_months),
        capped: raw > params.cap_months,
        detail: None,
    }
}

/// Per-cigarette smoking model with sex, age and exposure adjustment.
pub fn adjusted_smoking_gain(input: &SmokingInput, params: &AdjustedSmokingParams) -> GainResult {
    let reduction = input.current_cigarettes.saturating_sub(input.target_cigarettes);
    let base_months = reduction as f64 * params.months_per_cigarette;

    let sex_factor = sex_factor(input.sex, params.female_factor);
    let age_factor = age_factor(
        input.age,
        params.age_pivot,
        params.age_base,
        params.age_slope,
        params.age_floor,
    );
    let years_factor = if input.years_smoking <= params.years_threshold {
        1.0
    } else {
        params.years_base + input.years_smoking as f64 / params.years_span
    }
    .clamp(params.years_factor_min, params.years_factor_max);

    let raw = (base_months * sex_factor * age_factor * years_factor).round_ties_even();

    GainResult {
        factor: Factor::Smoking,
        months: raw.clamp(0.0, params.cap_months),
        capped: raw > params.cap_months,
        detail: Some(ModelDetail::SmokingAdjustment(SmokingAdjustmentDetail {
            reduction,
            base_months,
            sex_factor,
            age_factor: round_to(age_factor, 3),
            years_factor: round_to(years_factor, 3),
        })),
    }
}

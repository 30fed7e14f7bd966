use crate::utils::error::{GainError, Result};
use crate::utils::validation::{validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const AGE_RANGE: (u32, u32) = (15, 90);
pub const DAYS_PER_WEEK_MAX: u32 = 7;
pub const DRINKS_PER_DAY_MAX: u32 = 10;
pub const EXPOSURE_YEARS_MAX: u32 = 60;
pub const CIGARETTES_PER_DAY_MAX: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = GainError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "man" | "mann" => Ok(Sex::Male),
            "female" | "f" | "woman" | "kvinne" => Ok(Sex::Female),
            other => Err(GainError::invalid_input(
                "sex",
                other,
                "Expected one of: male, female",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Alcohol,
    Smoking,
}

impl Factor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Alcohol => "alcohol",
            Factor::Smoking => "smoking",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drinking pattern now and the weekly goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlcoholInput {
    pub age: u32,
    pub sex: Sex,
    /// Drinking days per week (0-7)
    pub current_days: u32,
    /// Average drinks per drinking day (0-10)
    pub drinks_per_day: u32,
    pub years_drinking: u32,
    pub target_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmokingInput {
    pub age: u32,
    pub sex: Sex,
    /// Cigarettes per day (0-40)
    pub current_cigarettes: u32,
    /// A goal at or above the current amount simply yields no gain.
    pub target_cigarettes: u32,
    pub years_smoking: u32,
}

impl AlcoholInput {
    /// 將每個欄位夾回允許範圍
    pub fn clamped(&self) -> Self {
        Self {
            age: self.age.clamp(AGE_RANGE.0, AGE_RANGE.1),
            sex: self.sex,
            current_days: self.current_days.min(DAYS_PER_WEEK_MAX),
            drinks_per_day: self.drinks_per_day.min(DRINKS_PER_DAY_MAX),
            years_drinking: self.years_drinking.min(EXPOSURE_YEARS_MAX),
            target_days: self.target_days.min(DAYS_PER_WEEK_MAX),
        }
    }
}

impl Validate for AlcoholInput {
    fn validate(&self) -> Result<()> {
        validate_range("age", self.age, AGE_RANGE.0, AGE_RANGE.1)?;
        validate_range("current_days", self.current_days, 0, DAYS_PER_WEEK_MAX)?;
        validate_range("drinks_per_day", self.drinks_per_day, 0, DRINKS_PER_DAY_MAX)?;
        validate_range("years_drinking", self.years_drinking, 0, EXPOSURE_YEARS_MAX)?;
        validate_range("target_days", self.target_days, 0, DAYS_PER_WEEK_MAX)?;
        Ok(())
    }
}

impl SmokingInput {
    pub fn clamped(&self) -> Self {
        Self {
            age: self.age.clamp(AGE_RANGE.0, AGE_RANGE.1),
            sex: self.sex,
            current_cigarettes: self.current_cigarettes.min(CIGARETTES_PER_DAY_MAX),
            target_cigarettes: self.target_cigarettes.min(CIGARETTES_PER_DAY_MAX),
            years_smoking: self.years_smoking.min(EXPOSURE_YEARS_MAX),
        }
    }
}

impl Validate for SmokingInput {
    fn validate(&self) -> Result<()> {
        validate_range("age", self.age, AGE_RANGE.0, AGE_RANGE.1)?;
        validate_range("current_cigarettes", self.current_cigarettes, 0, CIGARETTES_PER_DAY_MAX)?;
        validate_range("target_cigarettes", self.target_cigarettes, 0, CIGARETTES_PER_DAY_MAX)?;
        validate_range("years_smoking", self.years_smoking, 0, EXPOSURE_YEARS_MAX)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "factor", rename_all = "lowercase")]
pub enum Assessment {
    Alcohol(AlcoholInput),
    Smoking(SmokingInput),
}

impl Assessment {
    pub fn factor(&self) -> Factor {
        match self {
            Assessment::Alcohol(_) => Factor::Alcohol,
            Assessment::Smoking(_) => Factor::Smoking,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRatioDetail {
    pub now_drinks_per_week: u32,
    pub after_drinks_per_week: u32,
    pub binge: bool,
    pub rr_now: f64,
    pub rr_after: f64,
    pub adjustment: f64,
    pub gain_years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmokingAdjustmentDetail {
    pub reduction: u32,
    pub base_months: f64,
    pub sex_factor: f64,
    pub age_factor: f64,
    pub years_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ModelDetail {
    RiskRatio(RiskRatioDetail),
    SmokingAdjustment(SmokingAdjustmentDetail),
}

/// 估算結果：月數永遠 >= 0 且不超過模型上限
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainResult {
    pub factor: Factor,
    pub months: f64,
    /// The raw estimate was cut down to the model cap.
    pub capped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ModelDetail>,
}

impl GainResult {
    pub fn risk_ratio_detail(&self) -> Option<&RiskRatioDetail> {
        match &self.detail {
            Some(ModelDetail::RiskRatio(detail)) => Some(detail),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_parsing_accepts_bilingual_labels() {
        assert_eq!("Female".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("kvinne".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!(" M ".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("Mann".parse::<Sex>().unwrap(), Sex::Male);
        assert!("other".parse::<Sex>().is_err());
    }

    #[test]
    fn test_assessment_serializes_with_factor_tag() {
        let assessment = Assessment::Smoking(SmokingInput {
            age: 40,
            sex: Sex::Female,
            current_cigarettes: 10,
            target_cigarettes: 0,
            years_smoking: 12,
        });
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["factor"], "smoking");
        assert_eq!(json["sex"], "female");
        assert_eq!(assessment.factor(), Factor::Smoking);
    }
}

use crate::app::i18n::Messages;
use crate::app::render::{format_months, headline, sex_label};
use crate::domain::model::{Assessment, Factor, GainResult, Sex};
use crate::utils::error::{GainError, Result};
use crate::utils::validation::{validate_path, Validate};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;
use zip::write::{FileOptions, ZipWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Txt,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = GainError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Txt),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(GainError::InvalidConfigValueError {
                field: "export.formats".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: txt, csv".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub enabled: bool,
    pub output_path: String,
    pub formats: Vec<ExportFormat>,
    /// Pack the selected files into one zip archive instead of loose files
    pub bundle: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            output_path: "./output".to_string(),
            formats: vec![ExportFormat::Txt, ExportFormat::Csv],
            bundle: false,
        }
    }
}

impl Validate for ExportSettings {
    fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        validate_path("export.output_path", &self.output_path)?;
        if self.formats.is_empty() {
            return Err(GainError::InvalidConfigValueError {
                field: "export.formats".to_string(),
                value: "[]".to_string(),
                reason: "At least one export format is required".to_string(),
            });
        }
        Ok(())
    }
}

/// 一個待寫出的檔案
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub file_name: String,
    pub data: Vec<u8>,
}

pub fn file_name(factor: Factor, extension: &str) -> String {
    format!("health_gain_result_{}.{}", factor, extension)
}

pub fn text_summary(
    messages: &Messages,
    assessment: &Assessment,
    result: &GainResult,
    generated_at: DateTime<Utc>,
) -> String {
    let mut lines = vec![
        messages.text("txt_title").to_string(),
        format!(
            "{}: {}",
            messages.text("txt_time"),
            generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        String::new(),
        headline(messages, assessment, result),
        String::new(),
        format!("{}:", messages.text("txt_inputs")),
    ];

    match assessment {
        Assessment::Alcohol(input) => {
            lines.push(format!("- {}: {}", messages.text("txt_age"), input.age));
            lines.push(format!("- {}: {}", messages.text("txt_sex"), sex_label(messages, input.sex)));
            lines.push(format!(
                "- {}: {} → {}",
                messages.text("txt_days"),
                input.current_days,
                input.target_days
            ));
            lines.push(format!("- {}: {}", messages.text("txt_drinks_occ"), input.drinks_per_day));
            lines.push(format!("- {}: {}", messages.text("txt_years"), input.years_drinking));
        }
        Assessment::Smoking(input) => {
            lines.push(format!("- {}: {}", messages.text("txt_age"), input.age));
            lines.push(format!("- {}: {}", messages.text("txt_sex"), sex_label(messages, input.sex)));
            lines.push(format!("- {}: {}", messages.text("txt_years_smoke"), input.years_smoking));
            lines.push(format!("- {}: {}", messages.text("txt_cigs_now"), input.current_cigarettes));
            lines.push(format!("- {}: {}", messages.text("txt_cigs_goal"), input.target_cigarettes));
        }
    }

    lines.push(String::new());
    lines.push(format!("{}:", messages.text("txt_model")));
    if let Some(detail) = result.risk_ratio_detail() {
        lines.push(format!(
            "- {}: {} / {}",
            messages.text("txt_rr"),
            detail.rr_now,
            detail.rr_after
        ));
    }
    lines.push(format!(
        "- {}: {} {}",
        messages.text("txt_gain"),
        format_months(result.months),
        messages.text("months_unit")
    ));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[derive(Debug, Serialize)]
struct AlcoholRow {
    factor: Factor,
    age: u32,
    sex: Sex,
    now_drinks_per_week: u32,
    after_drinks_per_week: u32,
    rr_now: Option<f64>,
    rr_after: Option<f64>,
    gain_years: Option<f64>,
    gain_months: String,
}

#[derive(Debug, Serialize)]
struct SmokingRow {
    factor: Factor,
    age: u32,
    sex: Sex,
    cigs_now: u32,
    cigs_goal: u32,
    years_smoking: u32,
    gain_months: String,
}

/// 單列 CSV：標題加一筆資料
pub fn csv_row(assessment: &Assessment, result: &GainResult) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    match assessment {
        Assessment::Alcohol(input) => {
            let detail = result.risk_ratio_detail();
            writer.serialize(AlcoholRow {
                factor: Factor::Alcohol,
                age: input.age,
                sex: input.sex,
                now_drinks_per_week: detail
                    .map(|d| d.now_drinks_per_week)
                    .unwrap_or_else(|| input.current_days.saturating_mul(input.drinks_per_day)),
                after_drinks_per_week: detail
                    .map(|d| d.after_drinks_per_week)
                    .unwrap_or_else(|| input.target_days.saturating_mul(input.drinks_per_day)),
                rr_now: detail.map(|d| d.rr_now),
                rr_after: detail.map(|d| d.rr_after),
                gain_years: detail.map(|d| d.gain_years),
                gain_months: format_months(result.months),
            })?;
        }
        Assessment::Smoking(input) => {
            writer.serialize(SmokingRow {
                factor: Factor::Smoking,
                age: input.age,
                sex: input.sex,
                cigs_now: input.current_cigarettes,
                cigs_goal: input.target_cigarettes,
                years_smoking: input.years_smoking,
                gain_months: format_months(result.months),
            })?;
        }
    }

    writer.into_inner().map_err(|e| GainError::ExportError {
        message: format!("Failed to flush CSV writer: {}", e),
    })
}

pub fn bundle(artifacts: &[Artifact], file_name: String) -> Result<Artifact> {
    let data = {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for artifact in artifacts {
            zip.start_file::<_, ()>(artifact.file_name.as_str(), FileOptions::default())?;
            zip.write_all(&artifact.data)?;
        }
        let cursor = zip.finish()?;
        cursor.into_inner()
    };

    Ok(Artifact { file_name, data })
}

pub fn build_artifacts(
    messages: &Messages,
    settings: &ExportSettings,
    assessment: &Assessment,
    result: &GainResult,
    generated_at: DateTime<Utc>,
) -> Result<Vec<Artifact>> {
    if !settings.enabled {
        return Ok(Vec::new());
    }

    let factor = assessment.factor();
    let mut artifacts = Vec::with_capacity(settings.formats.len());
    for format in &settings.formats {
        let data = match format {
            ExportFormat::Txt => text_summary(messages, assessment, result, generated_at).into_bytes(),
            ExportFormat::Csv => csv_row(assessment, result)?,
        };
        artifacts.push(Artifact {
            file_name: file_name(factor, format.extension()),
            data,
        });
    }

    if settings.bundle {
        tracing::debug!("Bundling {} export files into a zip archive", artifacts.len());
        return Ok(vec![bundle(&artifacts, file_name(factor, "zip"))?]);
    }

    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::i18n::Locale;
    use crate::core::estimator::{linear_alcohol_gain, GainEstimator};
    use crate::core::settings::LinearAlcoholParams;
    use crate::domain::model::{AlcoholInput, SmokingInput};
    use chrono::TimeZone;

    fn alcohol() -> AlcoholInput {
        AlcoholInput {
            age: 28,
            sex: Sex::Male,
            current_days: 4,
            drinks_per_day: 2,
            years_drinking: 5,
            target_days: 2,
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_alcohol_csv_has_single_row() {
        let input = alcohol();
        let result = GainEstimator::default().estimate_alcohol_gain(&input).unwrap();
        let csv = String::from_utf8(csv_row(&Assessment::Alcohol(input), &result).unwrap()).unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "factor,age,sex,now_drinks_per_week,after_drinks_per_week,rr_now,rr_after,gain_years,gain_months"
        );
        assert_eq!(lines[1], "alcohol,28,male,8,4,1.185,1.105,0.6,7");
    }

    #[test]
    fn test_linear_alcohol_csv_leaves_detail_columns_empty() {
        let input = AlcoholInput {
            current_days: 7,
            target_days: 0,
            ..alcohol()
        };
        let result = linear_alcohol_gain(&input, &LinearAlcoholParams::default());
        let csv = String::from_utf8(csv_row(&Assessment::Alcohol(input), &result).unwrap()).unwrap();

        assert_eq!(csv.lines().nth(1), Some("alcohol,28,male,14,0,,,,5.6"));
    }

    #[test]
    fn test_weekly_drinks_saturate_without_model_detail() {
        let input = AlcoholInput {
            current_days: u32::MAX,
            target_days: 0,
            ..alcohol()
        };
        let result = linear_alcohol_gain(&input, &LinearAlcoholParams::default());
        let csv = String::from_utf8(csv_row(&Assessment::Alcohol(input), &result).unwrap()).unwrap();

        assert!(csv.lines().nth(1).unwrap().starts_with("alcohol,28,male,4294967295,0,,,,"));
    }

    #[test]
    fn test_smoking_csv_columns() {
        let input = SmokingInput {
            age: 28,
            sex: Sex::Female,
            current_cigarettes: 10,
            target_cigarettes: 0,
            years_smoking: 5,
        };
        let result = GainEstimator::default().estimate_smoking_gain(&input).unwrap();
        let csv = String::from_utf8(csv_row(&Assessment::Smoking(input), &result).unwrap()).unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "factor,age,sex,cigs_now,cigs_goal,years_smoking,gain_months");
        assert!(lines[1].starts_with("smoking,28,female,10,0,5,"));
    }

    #[test]
    fn test_text_summary_contents() {
        let messages = Messages::load(Locale::En).unwrap();
        let input = alcohol();
        let result = GainEstimator::default().estimate_alcohol_gain(&input).unwrap();
        let text = text_summary(&messages, &Assessment::Alcohol(input), &result, fixed_time());

        assert!(text.starts_with("AI Health Gain - Demo Result\nTime: 2025-03-01T12:00:00Z\n"));
        assert!(text.contains("- Drinking days (now→goal): 4 → 2"));
        assert!(text.contains("- RR now / after: 1.185 / 1.105"));
        assert!(text.contains("- Healthy life gain: 7 months"));
    }

    #[test]
    fn test_build_artifacts_respects_formats_and_bundle() {
        let messages = Messages::load(Locale::En).unwrap();
        let input = alcohol();
        let result = GainEstimator::default().estimate_alcohol_gain(&input).unwrap();
        let assessment = Assessment::Alcohol(input);

        let loose = build_artifacts(&messages, &ExportSettings::default(), &assessment, &result, fixed_time()).unwrap();
        let names: Vec<_> = loose.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["health_gain_result_alcohol.txt", "health_gain_result_alcohol.csv"]);

        let settings = ExportSettings {
            bundle: true,
            ..ExportSettings::default()
        };
        let bundled = build_artifacts(&messages, &settings, &assessment, &result, fixed_time()).unwrap();
        assert_eq!(bundled.len(), 1);
        assert_eq!(bundled[0].file_name, "health_gain_result_alcohol.zip");

        let archive = zip::ZipArchive::new(std::io::Cursor::new(bundled[0].data.clone())).unwrap();
        assert_eq!(archive.len(), 2);

        let disabled = ExportSettings {
            enabled: false,
            ..ExportSettings::default()
        };
        assert!(build_artifacts(&messages, &disabled, &assessment, &result, fixed_time())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_export_settings_validation() {
        assert!(ExportSettings::default().validate().is_ok());
        let empty = ExportSettings {
            formats: vec![],
            ..ExportSettings::default()
        };
        assert!(empty.validate().is_err());
        assert!("json".parse::<ExportFormat>().is_err());
    }
}

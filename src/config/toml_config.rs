use crate::app::export::ExportSettings;
use crate::app::i18n::Locale;
use crate::app::render::DisplaySettings;
use crate::core::settings::{AlcoholSettings, ModelSettings, SmokingSettings, ValidationSettings};
use crate::utils::error::{GainError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 全部設定；每個鍵都可省略，省略時使用預設值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub lang: Locale,
    pub alcohol: AlcoholSettings,
    pub smoking: SmokingSettings,
    pub validation: ValidationSettings,
    pub display: DisplaySettings,
    pub export: ExportSettings,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| GainError::ConfigError {
            message: format!("Cannot read '{}': {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GainError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GainError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GainError::ConfigError {
            message: format!("Cannot serialize configuration: {}", e),
        })
    }

    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            alcohol: self.alcohol.clone(),
            smoking: self.smoking.clone(),
            validation: self.validation.clone(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.model_settings().validate()?;
        self.display.validate()?;
        self.export.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::export::ExportFormat;
    use crate::core::settings::{AlcoholModel, Rounding, SmokingModel, ValidationMode};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.alcohol.model, AlcoholModel::RiskRatio);
        assert_eq!(config.smoking.model, SmokingModel::Adjusted);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let toml_content = r#"
lang = "no"

[alcohol]
model = "linear"

[alcohol.risk_ratio]
cap_years = 2.0
month_rounding = "one_decimal"

[smoking]
model = "linear"

[validation]
mode = "clamp"

[export]
formats = ["csv"]
bundle = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.lang, Locale::No);
        assert_eq!(config.alcohol.model, AlcoholModel::Linear);
        assert_eq!(config.alcohol.risk_ratio.cap_years, 2.0);
        assert_eq!(config.alcohol.risk_ratio.month_rounding, Rounding::OneDecimal);
        assert_eq!(config.alcohol.risk_ratio.weekly_drink_weight, 0.02);
        assert_eq!(config.smoking.model, SmokingModel::Linear);
        assert_eq!(config.smoking.linear.months_per_reference, 96.0);
        assert_eq!(config.validation.mode, ValidationMode::Clamp);
        assert_eq!(config.export.formats, vec![ExportFormat::Csv]);
        assert!(config.export.bundle);
        assert_eq!(config.export.output_path, "./output");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HEALTH_GAIN_TEST_OUTPUT", "/tmp/health-gain-out");

        let toml_content = r#"
[export]
output_path = "${HEALTH_GAIN_TEST_OUTPUT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.export.output_path, "/tmp/health-gain-out");

        std::env::remove_var("HEALTH_GAIN_TEST_OUTPUT");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[smoking.adjusted]
cap_months = -5.0
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(GainError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_unknown_model_is_a_parse_error() {
        let result = TomlConfig::from_toml_str("[alcohol]\nmodel = \"quadratic\"\n");
        assert!(matches!(result, Err(GainError::ConfigValidationError { .. })));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let rendered = TomlConfig::default().to_toml_string().unwrap();
        assert!(rendered.contains("[alcohol.risk_ratio]"));
        assert_eq!(TomlConfig::from_toml_str(&rendered).unwrap(), TomlConfig::default());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"lang = \"no\"\n").unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.lang, Locale::No);
    }
}

#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::cli::Command;
    use super::toml_config::TomlConfig;
    use crate::app::export::ExportFormat;
    use crate::app::i18n::Locale;
    use crate::core::settings::ValidationMode;
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "health-gain")]
    #[command(about = "Population-average healthy life months gained from lifestyle changes")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        /// Output language (en, no)
        #[arg(long, global = true)]
        pub lang: Option<Locale>,

        /// Directory for exported files
        #[arg(long, global = true)]
        pub output: Option<String>,

        /// Export formats
        #[arg(long, global = true, value_delimiter = ',')]
        pub format: Vec<ExportFormat>,

        /// Pack exported files into one zip archive
        #[arg(long, global = true)]
        pub bundle: bool,

        /// Do not write any files
        #[arg(long, global = true)]
        pub no_export: bool,

        /// Show model details
        #[arg(long, global = true)]
        pub details: bool,

        /// Clamp out-of-range input instead of rejecting it
        #[arg(long, global = true)]
        pub clamp: bool,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        /// Emit logs as JSON
        #[arg(long, global = true)]
        pub log_json: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    impl CliConfig {
        /// 命令列參數覆蓋檔案設定
        pub fn apply_overrides(&self, config: &mut TomlConfig) {
            if let Some(lang) = self.lang {
                config.lang = lang;
            }
            if let Some(output) = &self.output {
                config.export.output_path = output.clone();
            }
            if !self.format.is_empty() {
                config.export.formats = self.format.clone();
            }
            if self.bundle {
                config.export.bundle = true;
            }
            if self.no_export {
                config.export.enabled = false;
            }
            if self.details {
                config.display.show_details = true;
            }
            if self.clamp {
                config.validation.mode = ValidationMode::Clamp;
            }
        }
    }

}

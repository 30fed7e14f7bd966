use clap::Parser;
use health_gain::app::render::render_combined;
use health_gain::config::cli::Command;
use health_gain::utils::error::ErrorSeverity;
use health_gain::utils::{logger, validation::Validate};
use health_gain::{
    Assessment, CliConfig, GainError, GainEstimator, LocalStorage, Messages, RenderContext,
    ReportEngine, TomlConfig,
};

fn load_config(cli: &CliConfig) -> health_gain::Result<TomlConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

async fn execute(cli: &CliConfig, config: TomlConfig) -> health_gain::Result<()> {
    let estimator = GainEstimator::new(config.model_settings())?;
    let context = RenderContext::new(Messages::load(config.lang)?, config.display.clone());

    let assessment = match &cli.command {
        Command::Defaults => {
            print!("{}", config.to_toml_string()?);
            return Ok(());
        }
        Command::Combined(args) => {
            let alcohol_input = estimator.prepare_alcohol(&args.alcohol_input())?;
            let smoking_input = estimator.prepare_smoking(&args.smoking_input())?;
            let alcohol = estimator.estimate_alcohol_gain(&alcohol_input)?;
            let smoking = estimator.estimate_smoking_gain(&smoking_input)?;
            let total = GainEstimator::combine(&alcohol, &smoking);
            tracing::info!("Combined estimate: {} months", total);

            print!(
                "{}",
                render_combined(
                    &context,
                    (&alcohol_input, &alcohol),
                    (&smoking_input, &smoking),
                    total
                )?
            );
            return Ok(());
        }
        Command::Alcohol(args) => Assessment::Alcohol(args.into()),
        Command::Smoking(args) => Assessment::Smoking(args.into()),
    };

    let storage = LocalStorage::new(config.export.output_path.clone());
    let engine = ReportEngine::new(storage, estimator, context, config.export.clone());
    let outcome = engine.run(&assessment).await?;

    print!("{}", outcome.rendered);
    for path in &outcome.saved {
        println!("📁 Saved: {}", path);
    }
    Ok(())
}

fn exit_code(e: &GainError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };

    if let Err(e) = execute(&cli, config).await {
        tracing::error!(
            "❌ Estimate failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let code = exit_code(&e);
        if code > 0 {
            std::process::exit(code);
        }
    }

    Ok(())
}

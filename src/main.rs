use clap::Parser;
use stock_screener::utils::{logger, validation::Validate};
use stock_screener::{CliConfig, ScreenEngine, ScreenSettings, ScreenSummary, ScreenerError, TomlConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting stock-screener");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let outcome = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(file_config) => run(file_config).await,
                Err(e) => Err(e),
            }
        }
        None => run(config.clone()).await,
    };

    match outcome {
        Ok(summary) => {
            println!("Loaded {} stocks, kept {}", summary.loaded, summary.kept);
            println!("📁 Results saved to: {}", summary.output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Screening failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    }
}

async fn run<C: ScreenSettings + Validate>(settings: C) -> Result<ScreenSummary, ScreenerError> {
    settings.validate()?;
    tracing::info!("✅ Configuration validated");

    let mut engine = ScreenEngine::new(settings)?;
    engine.run().await
}

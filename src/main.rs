use clap::Parser;
use rfm_dash::utils::{logger, validation::Validate};
use rfm_dash::{
    CliConfig, ConfigProvider, DashboardEngine, HttpAnalysisClient, LocalStorage, TomlConfig,
};

async fn refresh_dashboard<C>(config: C) -> rfm_dash::Result<Vec<String>>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;

    let backend = HttpAnalysisClient::from_endpoint(config.analysis_endpoint())?;
    // Upload paths and the output directory are both resolved relative to
    // the working directory.
    let storage = LocalStorage::new(".".to_string());
    let mut engine = DashboardEngine::new(storage, config, backend);
    engine.run().await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting rfm-dash");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let outcome = match cli.config.clone() {
        Some(path) => {
            tracing::info!("Loading config file: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(config) => refresh_dashboard(config).await,
                Err(e) => Err(e),
            }
        }
        None => refresh_dashboard(cli).await,
    };

    match outcome {
        Ok(written) => {
            tracing::info!("✅ Dashboard refresh completed");
            println!("✅ Dashboard refresh completed");
            for file in written {
                println!("📁 {}", file);
            }
        }
        Err(e) => {
            tracing::error!("❌ Dashboard refresh failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

use clap::Parser;
use mc_stats_etl::core::ConfigProvider;
use mc_stats_etl::utils::{logger, validation::Validate};
use mc_stats_etl::{CliConfig, EtlEngine, LocalStorage, StatsPipeline, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting mc-stats-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let monitor_enabled = cli.monitor;

    let outcome = match &cli.config {
        Some(path) => {
            let config = TomlConfig::from_file(path)?;
            run(config, monitor_enabled).await
        }
        None => run(cli, monitor_enabled).await,
    };

    match outcome {
        Ok(sink) => {
            tracing::info!("✅ Stats aggregation completed");
            if sink != "stdout" {
                println!("Stats saved to {}", sink);
            }
        }
        Err(e) => {
            tracing::error!("❌ Stats aggregation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn run<C>(config: C, monitor: bool) -> mc_stats_etl::Result<String>
where
    C: ConfigProvider + Validate,
{
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e);
    }

    let storage = LocalStorage::new(config.stats_dir().to_string());
    let pipeline = StatsPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor);
    engine.run().await
}

use chrono::Local;
use std::time::Duration;
use wpsr_watch::utils::{logger, validation::Validate};
use wpsr_watch::{
    HttpReportSource, LocalStorage, OneShotTrigger, PdfiumEngine, ReportPipeline, WatchConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = WatchConfig::load()?;
    logger::init_cli_logger(config.verbose);

    tracing::info!("starting wpsr-watch");
    if config.verbose {
        tracing::debug!("config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let source = HttpReportSource::new(Duration::from_secs(config.request_timeout_secs))?;
    let engine = PdfiumEngine::new()?;
    let storage = LocalStorage::new(config.output_path.clone());

    match config.release_at {
        Some(target) => {
            let trigger = OneShotTrigger::new(target, config.fire_early_secs);
            println!("Next runtime: {}", trigger.target());
            trigger.wait().await;
            println!();
        }
        None => tracing::info!("no release instant configured; running immediately"),
    }

    let today = Local::now().date_naive();
    let pipeline = ReportPipeline::new(source, engine, storage, config);

    match pipeline.run(today).await {
        Ok(report) => {
            println!("{}", report.summary.render());
            println!("{}", report.commentary);
            println!("Runtime: {:.4}s", report.runtime_secs);
        }
        Err(e) => {
            tracing::error!("run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(if e.is_retryable() { 2 } else { 1 });
        }
    }

    Ok(())
}

use airport_routes::utils::{logger, validation::Validate};
use airport_routes::{CliConfig, LocalStorage, RouteEngine, Settings, TicketPipeline};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // The config file can set the log format, so it is read before logging starts.
    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    };

    logger::init_cli_logger(settings.verbose, settings.log_format);

    tracing::info!("App has been started");
    if settings.verbose {
        tracing::debug!("Settings: {:?}", settings);
    }

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    let pipeline = TicketPipeline::new(LocalStorage::default(), settings);
    let engine = RouteEngine::new(pipeline);

    let result = engine.run().await;
    tracing::info!("App execution has been completed");

    match result {
        Ok(outcome) => {
            for path in &outcome.written {
                println!("📁 Output saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Route analysis failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

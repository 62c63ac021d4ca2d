use swapi_explorer::app::routes::{build_router, serve};
use swapi_explorer::utils::{logger, validation::Validate};
use swapi_explorer::{HttpUpstream, PagePipeline, ServerConfig};

#[tokio::main]
async fn main() {
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    let guard = match logger::init(&config.log_settings()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("❌ Failed to initialise logging: {}", e);
            std::process::exit(e.exit_code());
        }
    };
    let log = guard.handle("api");

    tracing::info!("Starting swapi-api");
    if guard.writes_file() {
        tracing::info!(
            "Writing logs to {} (rotation: {:?})",
            config.log_file.display(),
            config.log_rotation
        );
    }
    tracing::debug!("Server config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        drop(guard);
        std::process::exit(e.exit_code());
    }

    let upstream = match HttpUpstream::with_timeout(&config.swapi_base_url, config.request_timeout())
    {
        Ok(upstream) => upstream,
        Err(e) => {
            tracing::error!("❌ {}", e);
            drop(guard);
            std::process::exit(e.exit_code());
        }
    };

    tracing::info!("Proxying upstream: {}", config.swapi_base_url);
    let pipeline = PagePipeline::new(upstream, log.clone());
    let router = build_router(pipeline, log.clone());

    if let Err(e) = serve(router, &config.bind_address(), &log).await {
        tracing::error!("❌ Server error: {}", e);
        drop(guard);
        std::process::exit(1);
    }
}

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use vendorq_api::{ApiState, RestApi};
use vendorq_similarity::{PipelineConfig, VendorQualifier};
use vendorq_storage::CatalogStore;

/// Vendor qualification service
#[derive(Parser, Debug)]
#[command(name = "vendorq")]
#[command(about = "Qualify and rank software vendors by capability similarity", long_about = None)]
struct Args {
    /// Path to the product catalog (JSON array or JSON Lines, optionally .gz)
    #[arg(short, long, default_value = "./data/catalog.json")]
    catalog: PathBuf,

    /// HTTP API host
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = 8000)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Default similarity threshold
    #[arg(long)]
    similarity_threshold: Option<f64>,

    /// Weight of the similarity term in the rank score
    #[arg(long)]
    feature_weight: Option<f64>,

    /// Weight of the rating term in the rank score
    #[arg(long)]
    rating_weight: Option<f64>,

    /// TF-IDF vocabulary cap
    #[arg(long)]
    max_features: Option<usize>,
}

impl Args {
    fn pipeline_config(&self) -> PipelineConfig {
        let defaults = PipelineConfig::default();
        PipelineConfig {
            similarity_threshold: self.similarity_threshold.unwrap_or(defaults.similarity_threshold),
            feature_weight: self.feature_weight.unwrap_or(defaults.feature_weight),
            rating_weight: self.rating_weight.unwrap_or(defaults.rating_weight),
            max_features: self.max_features.unwrap_or(defaults.max_features),
            top_n: defaults.top_n,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting vendorq v{}", env!("CARGO_PKG_VERSION"));
    info!("Catalog: {:?}", args.catalog);
    info!("HTTP API: {}:{}", args.host, args.http_port);

    let qualifier = VendorQualifier::new(args.pipeline_config())?;
    info!("Pipeline config: {:?}", qualifier.config());

    let store = Arc::new(CatalogStore::with_path(&args.catalog));
    if let Err(e) = store.reload() {
        error!("Failed to load catalog {:?}: {}", args.catalog, e);
        warn!("Serving without a catalog; qualification requests will fail until POST /catalog/reload succeeds");
    }

    let state = ApiState::new(store, qualifier);
    let host = args.host.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, &host, http_port).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("vendorq started successfully");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

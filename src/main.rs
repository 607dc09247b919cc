use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use trackx_api::RestApi;
use trackx_storage::Library;

/// A music-track recommendation server
#[derive(Parser, Debug)]
#[command(name = "trackx")]
#[command(about = "Music recommendations from a precomputed k-NN index", long_about = None)]
struct Args {
    /// Directory holding songs.csv, features.bin and knn.model
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Directory of static assets (landing page)
    #[arg(long, default_value = "./static")]
    static_dir: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[actix_web::main]
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

    info!("Starting TrackX v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);
    info!("Static directory: {:?}", args.static_dir);

    // All shared state is loaded before the server accepts traffic; any
    // failure here aborts startup rather than serving a partial catalog.
    let library = Arc::new(Library::load(&args.data_dir)?);
    info!(
        "Library loaded: {} songs, feature dim {}",
        library.catalog().len(),
        library.catalog().dim()
    );

    info!("HTTP API: http://localhost:{}/", args.http_port);
    RestApi::start(library, args.static_dir, args.http_port).await?;

    info!("Shutting down...");
    Ok(())
}

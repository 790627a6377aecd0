use clap::Parser;
use ledcube::Cube;
use ledcube_server::{start_metrics_reporter, FrameListener, LogStrip, ServerConfig, StreamMetrics};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "ledcube-server")]
#[command(about = "Receive 3-3-2 frames over UDP and draw them on an LED cube", long_about = None)]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Host to bind
    #[arg(long)]
    bind_host: Option<String>,

    /// UDP port
    #[arg(long)]
    port: Option<u16>,

    /// Cube edge length
    #[arg(long)]
    size: Option<u32>,

    /// Brightness cap
    #[arg(long)]
    max_brightness: Option<u8>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = args.log_level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ledcube_server={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config(&args)?;
    config.validate()?;

    tracing::info!("LED cube server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "{}³ cube, max brightness {}, idle color {}",
        config.size,
        config.max_brightness,
        config.idle_color
    );

    let mut cube = Cube::with_strip(config.size, config.max_brightness, LogStrip::new());
    cube.background(config.idle_color);
    cube.show();

    let metrics = Arc::new(StreamMetrics::default());
    tokio::spawn(start_metrics_reporter(metrics.clone(), config.metrics_interval()));

    let mut listener = FrameListener::bind(&config, cube, metrics.clone()).await?;
    tracing::info!("Network info: {}", listener.network_info());

    listener
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
            }
        })
        .await?;

    metrics.print_stats();
    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };

    if let Some(host) = &args.bind_host {
        config.bind_host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(size) = args.size {
        config.size = size;
    }
    if let Some(max_brightness) = args.max_brightness {
        config.max_brightness = max_brightness;
    }

    Ok(config)
}

mod patterns;

use anyhow::{Context, Result};
use clap::Parser;
use ledcube::Cube;
use patterns::{Animator, Pattern, STREAM_MAX_BRIGHTNESS};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Largest payload a single UDP datagram can carry over IPv4.
const MAX_DATAGRAM: usize = 65_507;
/// Highest frame rate with a nonzero millisecond tick.
const MAX_FPS: u32 = 1000;

#[derive(Parser, Debug)]
#[command(name = "ledcube-stream")]
#[command(about = "Stream animated 3-3-2 frames to an LED cube", long_about = None)]
struct Args {
    /// Cube address
    #[arg(long, default_value = "127.0.0.1:2222")]
    target: String,

    /// Cube edge length
    #[arg(long, default_value = "8")]
    size: u32,

    /// Frames per second
    #[arg(long, default_value = "30")]
    fps: u32,

    /// Number of frames to send (0 streams forever)
    #[arg(long, default_value = "0")]
    frames: u64,

    /// Animation to render
    #[arg(long, value_enum, default_value = "pulse")]
    pattern: Pattern,

    /// Seed for randomized patterns
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = args.log_level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ledcube_stream={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    validate(&args)?;

    tracing::info!("LED cube streamer v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Streaming {:?} to {} at {} fps", args.pattern, args.target, args.fps);

    let socket = UdpSocket::bind("0.0.0.0:0")
        .await
        .context("Failed to bind local socket")?;
    socket
        .connect(&args.target)
        .await
        .with_context(|| format!("Failed to resolve {}", args.target))?;

    let mut cube = Cube::new(args.size, STREAM_MAX_BRIGHTNESS);
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut animator = Animator::new(args.pattern, seed);
    tracing::debug!("Pattern seed: {}", seed);

    let mut interval = tokio::time::interval(Duration::from_secs_f64(1.0 / args.fps as f64));
    let mut sent = 0u64;

    while args.frames == 0 || animator.frame() < args.frames {
        interval.tick().await;
        animator.step(&mut cube);

        match socket.send(&cube.encode_frame()).await {
            Ok(_) => {
                sent += 1;
                if sent % args.fps as u64 == 0 {
                    tracing::debug!("Sent frame #{}", sent);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to send frame: {}", e);
            }
        }
    }

    tracing::info!("Finished: {} of {} frames sent", sent, animator.frame());
    Ok(())
}

fn validate(args: &Args) -> Result<()> {
    anyhow::ensure!(args.size >= 1, "cube size must be >= 1");
    let s = args.size as usize;
    let frame_len = s.saturating_mul(s).saturating_mul(s);
    anyhow::ensure!(
        frame_len <= MAX_DATAGRAM,
        "a {}³ frame is {} bytes, more than one datagram",
        args.size,
        frame_len
    );
    anyhow::ensure!(
        (1..=MAX_FPS).contains(&args.fps),
        "fps must be between 1 and {}",
        MAX_FPS
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("ledcube-stream").chain(extra.iter().copied()))
    }

    #[test]
    fn test_defaults_are_valid() {
        let args = args(&[]);
        assert_eq!(args.target, "127.0.0.1:2222");
        assert_eq!(args.pattern, Pattern::Pulse);
        assert!(validate(&args).is_ok());
    }

    #[test]
    fn test_fps_bounds() {
        assert!(validate(&args(&["--fps", "0"])).is_err());
        assert!(validate(&args(&["--fps", "1000"])).is_ok());
        assert!(validate(&args(&["--fps", "4000000000"])).is_err());
    }

    #[test]
    fn test_size_bounds() {
        assert!(validate(&args(&["--size", "0"])).is_err());
        assert!(validate(&args(&["--size", "40"])).is_ok());
        assert!(validate(&args(&["--size", "41"])).is_err());
        assert!(validate(&args(&["--size", "4294967295"])).is_err());
    }
}

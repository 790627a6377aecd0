pub mod config;
pub mod listener;
pub mod metrics;
pub mod sink;

pub use config::{ConfigError, ServerConfig};
pub use listener::FrameListener;
pub use metrics::{start_metrics_reporter, StreamMetrics};
pub use sink::LogStrip;

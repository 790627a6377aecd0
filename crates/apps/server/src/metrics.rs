use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Counters for the frame stream.
#[derive(Debug, Default)]
pub struct StreamMetrics {
    pub frames_applied: AtomicU64,
    pub frames_dropped: AtomicU64,
    pub bytes_received: AtomicU64,
}

impl StreamMetrics {
    pub fn record_applied(&self, bytes: usize) {
        self.frames_applied.fetch_add(1, Ordering::Relaxed);
        self.bytes_received.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn record_dropped(&self, bytes: usize) {
        self.frames_dropped.fetch_add(1, Ordering::Relaxed);
        self.bytes_received.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn applied(&self) -> u64 {
        self.frames_applied.load(Ordering::Relaxed)
    }

    pub fn dropped(&self) -> u64 {
        self.frames_dropped.load(Ordering::Relaxed)
    }

    /// Print metrics to the log
    pub fn print_stats(&self) {
        tracing::info!(
            "Frames applied: {} | Frames dropped: {} | Bytes recv: {}",
            self.frames_applied.load(Ordering::Relaxed),
            self.frames_dropped.load(Ordering::Relaxed),
            self.bytes_received.load(Ordering::Relaxed),
        );
    }
}

/// Start metrics reporting task
pub async fn start_metrics_reporter(metrics: Arc<StreamMetrics>, every: Duration) {
    let mut interval = tokio::time::interval(every);

    loop {
        interval.tick().await;
        metrics.print_stats();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let metrics = StreamMetrics::default();
        metrics.record_applied(512);
        metrics.record_applied(512);
        metrics.record_dropped(10);
        assert_eq!(metrics.applied(), 2);
        assert_eq!(metrics.dropped(), 1);
        assert_eq!(metrics.bytes_received.load(Ordering::Relaxed), 1034);
    }
}

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct FetchMetrics {
    pub total_requests: u64,
    pub avg_response_time_ms: f64,
    pub rate_limiter_wait_time_ms: f64,
}

/// Collects per-run fetch statistics. Single-threaded; a run owns one.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    metrics: FetchMetrics,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request_start(&self) -> RequestTracker {
        RequestTracker {
            start_time: Instant::now(),
        }
    }

    pub fn record_request(&mut self, tracker: RequestTracker) {
        let duration = tracker.start_time.elapsed();
        let metrics = &mut self.metrics;
        metrics.total_requests += 1;

        // Running mean over all requests so far
        let n = metrics.total_requests as f64;
        metrics.avg_response_time_ms += (duration.as_secs_f64() * 1000.0 - metrics.avg_response_time_ms) / n;
    }

    pub fn record_rate_limit_wait(&mut self, duration: Duration) {
        self.metrics.rate_limiter_wait_time_ms += duration.as_secs_f64() * 1000.0;
    }

    pub fn get_metrics(&self) -> FetchMetrics {
        self.metrics.clone()
    }
}

pub struct RequestTracker {
    start_time: Instant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collector_basic() {
        let mut collector = MetricsCollector::new();
        let tracker = collector.record_request_start();

        std::thread::sleep(Duration::from_millis(10));

        collector.record_request(tracker);
        let metrics = collector.get_metrics();

        assert_eq!(metrics.total_requests, 1);
        assert!(metrics.avg_response_time_ms >= 10.0);
    }

    #[test]
    fn test_metrics_collector_rate_limit_accumulates() {
        let mut collector = MetricsCollector::new();
        collector.record_rate_limit_wait(Duration::from_millis(100));
        collector.record_rate_limit_wait(Duration::from_millis(250));

        let metrics = collector.get_metrics();
        assert!((metrics.rate_limiter_wait_time_ms - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_collector_multiple_requests() {
        let mut collector = MetricsCollector::new();

        for _ in 0..5 {
            let tracker = collector.record_request_start();
            std::thread::sleep(Duration::from_millis(5));
            collector.record_request(tracker);
        }

        let metrics = collector.get_metrics();
        assert_eq!(metrics.total_requests, 5);
        assert!(metrics.avg_response_time_ms >= 5.0);
    }
}

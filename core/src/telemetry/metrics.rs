use std::sync::Mutex;

/// Counts completed estimation runs and shortfall recoveries.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    runs: usize,
    shortfalls: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                runs: 0,
                shortfalls: 0,
            }),
        }
    }

    pub fn record_run(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.runs += 1;
        }
    }

    pub fn record_shortfall(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.shortfalls += 1;
        }
    }

    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.runs, metrics.shortfalls)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let recorder = MetricsRecorder::new();
        recorder.record_run();
        recorder.record_run();
        recorder.record_shortfall();
        assert_eq!(recorder.snapshot(), (2, 1));
    }
}

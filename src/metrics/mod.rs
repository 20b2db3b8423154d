use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Saturating counters for a composition session.
#[derive(Debug, Default, Clone)]
pub struct ComposeMetrics {
    containers: u64,
    children_adopted: u64,
    reuses: u64,
    margin_fallbacks: u64,
    rejections: u64,
    plans: u64,
}

impl ComposeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_container(&mut self, children: usize) {
        self.containers = self.containers.saturating_add(1);
        self.children_adopted = self.children_adopted.saturating_add(children as u64);
    }

    pub fn record_reuse(&mut self) {
        self.reuses = self.reuses.saturating_add(1);
    }

    pub fn record_margin_fallback(&mut self) {
        self.margin_fallbacks = self.margin_fallbacks.saturating_add(1);
    }

    pub fn record_rejection(&mut self) {
        self.rejections = self.rejections.saturating_add(1);
    }

    pub fn record_plan(&mut self) {
        self.plans = self.plans.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            containers: self.containers,
            children_adopted: self.children_adopted,
            reuses: self.reuses,
            margin_fallbacks: self.margin_fallbacks,
            rejections: self.rejections,
            plans: self.plans,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub containers: u64,
    pub children_adopted: u64,
    pub reuses: u64,
    pub margin_fallbacks: u64,
    pub rejections: u64,
    pub plans: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target.to_string(),
            "compose_metrics".to_string(),
            self.as_fields(),
        )
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("containers".to_string(), json!(self.containers));
        map.insert(
            "children_adopted".to_string(),
            json!(self.children_adopted),
        );
        map.insert("reuses".to_string(), json!(self.reuses));
        map.insert(
            "margin_fallbacks".to_string(),
            json!(self.margin_fallbacks),
        );
        map.insert("rejections".to_string(), json!(self.rejections));
        map.insert("plans".to_string(), json!(self.plans));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_across_operations() {
        let mut metrics = ComposeMetrics::new();
        metrics.record_container(3);
        metrics.record_container(2);
        metrics.record_margin_fallback();
        metrics.record_rejection();

        let snapshot = metrics.snapshot(Duration::from_millis(5));
        assert_eq!(snapshot.containers, 2);
        assert_eq!(snapshot.children_adopted, 5);
        assert_eq!(snapshot.margin_fallbacks, 1);
        assert_eq!(snapshot.rejections, 1);
        assert_eq!(snapshot.uptime_ms, 5);
    }

    #[test]
    fn snapshot_converts_to_a_log_event() {
        let mut metrics = ComposeMetrics::new();
        metrics.record_container(1);
        metrics.record_plan();

        let event = metrics
            .snapshot(Duration::ZERO)
            .to_log_event("furnish::metrics");
        assert_eq!(event.message, "compose_metrics");
        assert_eq!(event.fields["containers"], json!(1));
        assert_eq!(event.fields["plans"], json!(1));
    }
}

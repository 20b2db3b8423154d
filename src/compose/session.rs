use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde_json::json;

use super::audit::{ComposeAudit, ComposeAuditEventBuilder, ComposeAuditStage, NullComposeAudit};
use super::core::{
    self, ColumnOptions, Composed, Container, FlowOptions, GridOptions, RowOptions, SplitOptions,
    VSplitOptions,
};
use crate::element::{Child, ElementId};
use crate::error::{ComposeError, Result};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::ComposeMetrics;
use crate::plan::{self, Bindings, Plan};
use crate::toolkit::Toolkit;

/// Configuration knobs for a composition session.
#[derive(Clone)]
pub struct ComposerConfig {
    /// Optional structured logger used by the session.
    pub logger: Option<Logger>,
    /// Audit sink notified of construction checkpoints.
    pub audit: Arc<dyn ComposeAudit>,
    /// Metrics accumulator shared with the caller.
    pub metrics: Option<Arc<Mutex<ComposeMetrics>>>,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            logger: None,
            audit: Arc::new(NullComposeAudit),
            metrics: Some(Arc::new(Mutex::new(ComposeMetrics::new()))),
            metrics_target: "furnish::compose.metrics".to_string(),
        }
    }
}

impl ComposerConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(ComposeMetrics::new())));
        }
    }

    /// Disable metrics collection and prevent further snapshots.
    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<ComposeMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Stateful wrapper over a toolkit that runs the constructors and feeds
/// the ambient config: every operation records metrics, emits a log
/// event, and notifies the audit sink. The free functions in
/// [`crate::compose`] do the same work without the observability.
pub struct Composer<'t, T: Toolkit> {
    toolkit: &'t mut T,
    config: ComposerConfig,
    started: Instant,
}

impl<'t, T: Toolkit> Composer<'t, T> {
    pub fn new(toolkit: &'t mut T) -> Self {
        Self::with_config(toolkit, ComposerConfig::default())
    }

    pub fn with_config(toolkit: &'t mut T, config: ComposerConfig) -> Self {
        Self {
            toolkit,
            config,
            started: Instant::now(),
        }
    }

    pub fn config_mut(&mut self) -> &mut ComposerConfig {
        &mut self.config
    }

    /// Direct access to the underlying toolkit, for creating widgets
    /// mid-session.
    pub fn toolkit(&mut self) -> &mut T {
        self.toolkit
    }

    pub fn row(&mut self, children: &[Child]) -> Result<Container> {
        self.row_with(children, RowOptions::default())
    }

    pub fn row_with(&mut self, children: &[Child], options: RowOptions) -> Result<Container> {
        let outcome = core::compose_row(self.toolkit, children, &options);
        self.finish(outcome)
    }

    pub fn column(&mut self, children: &[Child]) -> Result<Container> {
        self.column_with(children, ColumnOptions::default())
    }

    pub fn column_with(
        &mut self,
        children: &[Child],
        options: ColumnOptions,
    ) -> Result<Container> {
        let outcome = core::compose_column(self.toolkit, children, &options);
        self.finish(outcome)
    }

    pub fn grid(&mut self, rows: &[Vec<ElementId>]) -> Result<Container> {
        self.grid_with(rows, GridOptions::default())
    }

    pub fn grid_with(
        &mut self,
        rows: &[Vec<ElementId>],
        options: GridOptions,
    ) -> Result<Container> {
        let outcome = core::compose_grid(self.toolkit, rows, &options);
        self.finish(outcome)
    }

    pub fn stack(&mut self, children: &[ElementId]) -> Result<Container> {
        let outcome = core::compose_stack(self.toolkit, children);
        self.finish(outcome)
    }

    pub fn horizontal_split(&mut self, left: ElementId, right: ElementId) -> Result<Container> {
        self.horizontal_split_with(left, right, SplitOptions::default())
    }

    pub fn horizontal_split_with(
        &mut self,
        left: ElementId,
        right: ElementId,
        options: SplitOptions,
    ) -> Result<Container> {
        let outcome = core::compose_horizontal_split(self.toolkit, left, right, &options);
        self.finish(outcome)
    }

    pub fn vertical_split(&mut self, top: ElementId, bottom: ElementId) -> Result<Container> {
        self.vertical_split_with(top, bottom, VSplitOptions::default())
    }

    pub fn vertical_split_with(
        &mut self,
        top: ElementId,
        bottom: ElementId,
        options: VSplitOptions,
    ) -> Result<Container> {
        let outcome = core::compose_vertical_split(self.toolkit, top, bottom, &options);
        self.finish(outcome)
    }

    pub fn flow(&mut self, children: &[Child]) -> Result<Container> {
        self.flow_with(children, FlowOptions::default())
    }

    pub fn flow_with(&mut self, children: &[Child], options: FlowOptions) -> Result<Container> {
        let outcome = core::compose_flow(self.toolkit, children, &options);
        self.finish(outcome)
    }

    pub fn tabs(&mut self, pages: &[(ElementId, &str)]) -> Result<Container> {
        let outcome = core::compose_tabs(self.toolkit, pages);
        self.finish(outcome)
    }

    /// Assembles a declarative plan against the session's toolkit.
    pub fn assemble(&mut self, plan: &Plan, bindings: &Bindings) -> Result<Container> {
        match plan::assemble(self.toolkit, plan, bindings) {
            Ok(container) => {
                if let Some(metrics) = self.config.metrics.as_ref() {
                    if let Ok(mut guard) = metrics.lock() {
                        guard.record_plan();
                    }
                }
                self.log_compose_event(
                    LogLevel::Info,
                    "plan_assembled",
                    [
                        json_kv("root", json!(container.id().to_string())),
                        json_kv("strategy", json!(container.strategy().as_str())),
                    ],
                );
                let mut builder = ComposeAuditEventBuilder::new(ComposeAuditStage::PlanAssembled);
                builder.detail("root", json!(container.id().to_string()));
                builder.detail("strategy", json!(container.strategy().as_str()));
                self.config.audit.record(builder.finish());
                Ok(container)
            }
            Err(err) => {
                self.record_rejection(&err);
                Err(err)
            }
        }
    }

    /// Logs a metrics snapshot through the configured logger.
    pub fn emit_metrics(&self) {
        if let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let target = self.config.metrics_target.as_str();
                let snapshot_event = guard.snapshot(self.started.elapsed()).to_log_event(target);
                let _ = logger.log_event(snapshot_event);
            }
        }
    }

    fn finish(&mut self, outcome: Result<Composed>) -> Result<Container> {
        match outcome {
            Ok(composed) => {
                self.record_composed(&composed);
                Ok(composed.container)
            }
            Err(err) => {
                self.record_rejection(&err);
                Err(err)
            }
        }
    }

    fn record_composed(&self, composed: &Composed) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_container(composed.children);
                if composed.reused {
                    guard.record_reuse();
                }
                if composed.margin_fallback {
                    guard.record_margin_fallback();
                }
            }
        }

        let container = composed.container;
        self.log_compose_event(
            LogLevel::Debug,
            "container_composed",
            [
                json_kv("container", json!(container.id().to_string())),
                json_kv("strategy", json!(container.strategy().as_str())),
                json_kv("children", json!(composed.children)),
            ],
        );

        let stage = if composed.reused {
            ComposeAuditStage::ContainerReused
        } else {
            ComposeAuditStage::ContainerComposed
        };
        let mut builder = ComposeAuditEventBuilder::new(stage);
        builder.detail("container", json!(container.id().to_string()));
        builder.detail("strategy", json!(container.strategy().as_str()));
        builder.detail("children", json!(composed.children));
        self.config.audit.record(builder.finish());

        if composed.margin_fallback {
            let mut fallback = ComposeAuditEventBuilder::new(ComposeAuditStage::MarginFallback);
            fallback.detail("container", json!(container.id().to_string()));
            self.config.audit.record(fallback.finish());
        }
    }

    fn record_rejection(&self, err: &ComposeError) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_rejection();
            }
        }
        self.log_compose_event(
            LogLevel::Warn,
            "compose_rejected",
            [json_kv("error", json!(err.to_string()))],
        );
        let mut builder = ComposeAuditEventBuilder::new(ComposeAuditStage::ComposeRejected);
        builder.detail("error", json!(err.to_string()));
        self.config.audit.record(builder.finish());
    }

    fn log_compose_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, "furnish::compose", message, fields);
            let _ = logger.log_event(event);
        }
    }
}

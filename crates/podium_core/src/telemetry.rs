//! Tracing setup: an `EnvFilter`-controlled fmt layer plus OpenTelemetry spans
//! exported to stdout.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::{
    trace::{RandomIdGenerator, Sampler, TracerProvider},
    Resource,
};
use opentelemetry_stdout::SpanExporter;
use podium_error::{ConfigError, PodiumResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Keeps the span pipeline alive. Dropping it flushes and shuts down the exporter.
#[derive(Debug)]
pub struct TelemetryGuard {
    provider: TracerProvider,
}

impl TelemetryGuard {
    /// Flush pending spans and stop exporting.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Err(e) = self.provider.shutdown() {
            tracing::warn!(error = %e, "Span exporter did not shut down cleanly");
        }
    }
}

/// Install the global tracing subscriber for `service_name`.
///
/// Both layers respect `RUST_LOG`.
///
/// # Errors
///
/// `ConfigError` if a global subscriber is already installed.
pub fn init_telemetry(service_name: &'static str) -> PodiumResult<TelemetryGuard> {
    let provider = TracerProvider::builder()
        .with_simple_exporter(SpanExporter::default())
        .with_id_generator(RandomIdGenerator::default())
        .with_sampler(Sampler::AlwaysOn)
        .with_resource(Resource::new([KeyValue::new("service.name", service_name)]))
        .build();

    let spans = tracing_opentelemetry::layer()
        .with_tracer(provider.tracer(service_name))
        .with_filter(EnvFilter::from_default_env());

    let fmt = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_filter(EnvFilter::from_default_env());

    tracing_subscriber::registry()
        .with(spans)
        .with(fmt)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Tracing subscriber already installed: {}", e)))?;

    tracing::debug!(service = service_name, "Telemetry initialized");
    Ok(TelemetryGuard { provider })
}

use anyhow::Context;
use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::{MetricExporter, SpanExporter};
use opentelemetry_sdk::{
    Resource, metrics::SdkMeterProvider, propagation::TraceContextPropagator,
    trace::SdkTracerProvider,
};

use crate::config::ServerConfig;

pub const SERVICE_NAME: &str = "user-service";

/// OTLP providers installed for the lifetime of the process.
pub struct Providers {
    pub tracer: SdkTracerProvider,
    pub meter: SdkMeterProvider,
}

fn service_resource() -> Resource {
    Resource::builder()
        .with_service_name(SERVICE_NAME)
        .with_attribute(KeyValue::new("service.version", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Installs OTLP export when the config asks for it.
///
/// Returns `None` when export is off; the global meter then hands out no-op
/// instruments. Endpoint and protocol come from the standard `OTEL_*` variables.
pub fn init_providers(config: &ServerConfig) -> anyhow::Result<Option<Providers>> {
    if !config.otlp_enabled {
        return Ok(None);
    }

    let resource = service_resource();

    let tracer = SdkTracerProvider::builder()
        .with_batch_exporter(
            SpanExporter::builder()
                .with_tonic()
                .build()
                .context("Failed to create OTLP span exporter")?,
        )
        .with_resource(resource.clone())
        .build();

    let meter = SdkMeterProvider::builder()
        .with_periodic_exporter(
            MetricExporter::builder()
                .with_tonic()
                .build()
                .context("Failed to create OTLP metric exporter")?,
        )
        .with_resource(resource)
        .build();

    global::set_text_map_propagator(TraceContextPropagator::new());
    global::set_tracer_provider(tracer.clone());
    global::set_meter_provider(meter.clone());

    Ok(Some(Providers { tracer, meter }))
}

impl Providers {
    /// Flushes pending spans and metrics.
    pub fn shutdown(self) {
        if let Err(err) = self.tracer.shutdown() {
            tracing::warn!(error = %err, "Failed to shut down tracer provider");
        }
        if let Err(err) = self.meter.shutdown() {
            tracing::warn!(error = %err, "Failed to shut down meter provider");
        }
    }
}

use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::tonic_types::metadata::MetadataMap;
use opentelemetry_otlp::tonic_types::transport::ClientTlsConfig;
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use std::sync::OnceLock;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Keep the LoggerProvider alive for the process lifetime.
static LOGGER_PROVIDER: OnceLock<opentelemetry_sdk::logs::SdkLoggerProvider> = OnceLock::new();

/// Tokio runtime for the OTLP gRPC exporters. Tonic's `connect_lazy()` calls
/// `tokio::spawn`, and `dioxus::serve` may run our init closure before a
/// runtime context is entered.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Exporter settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
struct OtlpSettings {
    endpoint: String,
    service_name: String,
    environment: String,
    ingestion_key: Option<String>,
}

impl OtlpSettings {
    /// `None` when `OTEL_EXPORTER_OTLP_ENDPOINT` is unset.
    fn from_env() -> Option<Self> {
        let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok()?;
        Some(Self {
            endpoint,
            service_name: std::env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "stories-admin".to_string()),
            environment: std::env::var("DEPLOY_ENV")
                .unwrap_or_else(|_| "development".to_string()),
            ingestion_key: std::env::var("SIGNOZ_INGESTION_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
        })
    }

    fn uses_tls(&self) -> bool {
        self.endpoint.starts_with("https://")
    }

    fn metadata(&self) -> Option<MetadataMap> {
        let key = self.ingestion_key.as_ref()?;
        let Ok(value) = key.parse() else {
            tracing::warn!("Invalid SIGNOZ_INGESTION_KEY; sending without it");
            return None;
        };
        let mut metadata = MetadataMap::new();
        metadata.insert("signoz-ingestion-key", value);
        Some(metadata)
    }
}

/// Set up OTLP trace and log export.
///
/// Dioxus owns the `tracing` subscriber — this registers the global
/// TracerProvider and bridges the `log` crate to the OTLP log exporter.
///
/// Reads config from environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT` — collector gRPC address
///   - `OTEL_SERVICE_NAME` — service name tag (default: `stories-admin`)
///   - `SIGNOZ_INGESTION_KEY` — SigNoz Cloud access token (optional for local)
///   - `DEPLOY_ENV` — deployment environment tag (default: `development`)
pub fn init_telemetry() {
    let _ = dotenvy::dotenv();

    let Some(settings) = OtlpSettings::from_env() else {
        tracing::info!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
        return;
    };

    let rt = OTEL_RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(1)
            .build()
            .expect("Failed to create OTEL runtime")
    });
    let _guard = rt.enter();

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(settings.service_name.clone())
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new(
            "deployment.environment",
            settings.environment.clone(),
        ))
        .build();

    let mut span_builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&settings.endpoint);
    if settings.uses_tls() {
        span_builder = span_builder.with_tls_config(ClientTlsConfig::new().with_native_roots());
    }
    if let Some(metadata) = settings.metadata() {
        span_builder = span_builder.with_metadata(metadata);
    }
    let span_exporter = match span_builder.build() {
        Ok(exporter) => exporter,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create OTLP span exporter");
            return;
        }
    };

    let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();
    global::set_tracer_provider(tracer_provider);

    let mut log_builder = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(&settings.endpoint);
    if settings.uses_tls() {
        log_builder = log_builder.with_tls_config(ClientTlsConfig::new().with_native_roots());
    }
    if let Some(metadata) = settings.metadata() {
        log_builder = log_builder.with_metadata(metadata);
    }
    let log_exporter = match log_builder.build() {
        Ok(exporter) => exporter,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create OTLP log exporter");
            return;
        }
    };

    let logger_provider = LOGGER_PROVIDER.get_or_init(|| {
        opentelemetry_sdk::logs::SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource)
            .build()
    });

    // Bridge the `log` crate → OpenTelemetry. Separate from the `tracing`
    // subscriber owned by Dioxus, so the two never conflict.
    let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(logger_provider);
    match log::set_boxed_logger(Box::new(bridge)) {
        Ok(()) => log::set_max_level(log::LevelFilter::Info),
        Err(_) => tracing::warn!("Log bridge skipped — log crate logger already set"),
    }

    let mode = if settings.ingestion_key.is_some() {
        "cloud"
    } else {
        "local"
    };
    tracing::info!(
        endpoint = %settings.endpoint,
        mode,
        "Telemetry initialized v{APP_VERSION}"
    );
}

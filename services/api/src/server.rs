use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_directory_routes;
use crate::store::PgContactStore;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use zip_directory::config::AppConfig;
use zip_directory::directory::DirectoryService;
use zip_directory::error::AppError;
use zip_directory::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = PgContactStore::connect_lazy(&config.store.database_url)?;
    store.ensure_schema().await?;
    let service = Arc::new(DirectoryService::new(Arc::new(store)));

    let app = with_directory_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "zip directory service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

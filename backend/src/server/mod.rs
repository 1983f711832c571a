//! Server construction and middleware wiring.

mod config;

pub use config::{ConfigError, ServerConfig};

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use tracing::info;

#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, health, health_db, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{
    accommodations, ad_slots, amenities, destinations, discount_codes, events, payment_methods,
    tags,
};
use crate::middleware::Trace;
use crate::outbound::persistence::{DbPool, PoolConfig, PoolError};

/// Register every catalogue route on the application.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    accommodations::configure(cfg);
    destinations::configure(cfg);
    amenities::configure(cfg);
    tags::configure(cfg);
    events::configure(cfg);
    discount_codes::configure(cfg);
    payment_methods::configure(cfg);
    ad_slots::configure(cfg);
}

/// Build the HTTP state from configuration: Diesel adapters when a database
/// URL is configured, seeded fixtures otherwise.
///
/// # Errors
/// Returns [`PoolError`] when the connection pool cannot be built.
pub async fn build_state(config: &ServerConfig) -> Result<HttpState, PoolError> {
    match &config.database_url {
        Some(url) => {
            let pool = DbPool::new(
                PoolConfig::new(url.clone()).with_max_size(config.db_pool_max),
            )
            .await?;
            Ok(HttpState::from_pool(pool, config.user_cache))
        }
        None => {
            info!("DATABASE_URL not set; serving fixture repositories");
            Ok(HttpState::fixtures().await)
        }
    }
}

/// Construct an Actix HTTP server from the given state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(web::Data::new(http_state.clone()))
            .wrap(Trace)
            .configure(api_routes)
            .service(health)
            .service(health_db)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        #[cfg(feature = "metrics")]
        let app = app.wrap(make_metrics());

        app
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(feature = "metrics")]
fn make_metrics() -> actix_web_prom::PrometheusMetrics {
    use actix_web_prom::PrometheusMetricsBuilder;

    PrometheusMetricsBuilder::new("terraviva")
        .endpoint("/metrics")
        .build()
        .unwrap_or_else(|err| panic!("configure Prometheus metrics: {err}"))
}

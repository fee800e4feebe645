//! Server mode
//!
//! Configures and starts the HTTP server with the achievements page,
//! embedded assets, and the health probe.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::{info, warn};

use crate::api::middleware::AuthGuard;
use crate::api::services::{AppStartTime, achievements_page, handle_asset, health_check};
use crate::runtime::startup;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this
/// function.
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let context = startup::prepare_server_startup().await.map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;

    let achievements_service = context.achievements_service.clone();
    let page_cache = context.page_cache.clone();

    let config = crate::config::get_config();
    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let cpu_count = config.server.cpu_count.min(32);
    warn!("Using {} CPU cores for the server", cpu_count);
    info!("Starting server at http://{}", bind_address);

    if config.scoreboard.frozen {
        warn!("Scoreboard is frozen; the achievements page will show the frozen notice");
    }

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .app_data(web::Data::new(achievements_service.clone()))
            .app_data(web::Data::new(page_cache.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .service(
                web::scope("/achievements")
                    .wrap(AuthGuard)
                    .route("", web::get().to(achievements_page)),
            )
            .route("/assets/{path:.*}", web::get().to(handle_asset))
            .route("/health", web::get().to(health_check))
    })
    .workers(cpu_count)
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}

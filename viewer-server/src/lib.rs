//! HTTP backend of the COCO viewer.
//!
//! It accepts an uploaded COCO annotation file, answers with the reshaped
//! dataset, and serves the referenced images from a directory chosen at
//! runtime.

mod common;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use crate::{
    common::*,
    config::{Config, CorsConfig},
    state::AppState,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Builds the application router over the given state.
pub fn router(state: AppState) -> Result<Router> {
    let config = state.config().clone();
    let cors = cors_layer(&config.cors)?;
    let image_route = format!("{}/*path", config.images.mount_path);

    let router = Router::new()
        .route("/", get(routes::root))
        .route("/api/load_dataset", post(routes::load_dataset))
        .route("/api/dataset", get(routes::get_dataset))
        .route("/api/images", get(routes::get_images))
        .route("/api/annotations/:image_id", get(routes::get_annotations))
        .route("/api/set_image_directory", post(routes::set_image_directory))
        .route(&image_route, get(routes::serve_image))
        .layer(DefaultBodyLimit::max(config.server.body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}

fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("invalid CORS origin '{}'", origin))
        })
        .collect::<Result<_>>()?;

    // credentials forbid wildcards, so methods and headers are mirrored
    let layer = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());
    Ok(layer)
}

/// The entry of the server program. Runs until Ctrl-C.
pub async fn start(config: Arc<Config>) -> Result<()> {
    let addr = config.server.addr;

    match &config.images.dir {
        Some(dir) if !dir.is_dir() => {
            warn!("image directory '{}' does not exist", dir.display())
        }
        Some(dir) => info!("serving images from '{}'", dir.display()),
        None => info!("image directory is not set"),
    }

    let app = router(AppState::new(config))?;

    info!("listening on http://{}", addr);
    axum::Server::try_bind(&addr)
        .with_context(|| format!("failed to bind to '{}'", addr))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for Ctrl-C: {}", err);
        return;
    }
    info!("shutting down");
}

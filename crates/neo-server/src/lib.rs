pub mod embed;
pub mod error;
pub mod page;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use neo_core::config::DashboardConfig;
use neo_core::paths::PLOTS_ROUTE;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the axum Router with all routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(app_state: state::AppState) -> Router {
    let plots = ServeDir::new(app_state.pipeline.plot_dir());

    Router::new()
        .route("/", get(routes::index::index))
        .route("/plot", post(routes::plot::create_plot))
        .nest_service(PLOTS_ROUTE, plots)
        .fallback(embed::static_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the dashboard on a pre-bound listener.
///
/// The caller binds the listener, so it can read the actual port before
/// starting (useful when `port = 0` and the OS picks a free port).
pub async fn serve_on(
    config: DashboardConfig,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    neo_core::io::ensure_dir(&config.plot_dir)?;
    let actual_port = listener.local_addr()?.port();
    let app_state = state::AppState::new(config)?;
    tracing::info!(
        upstream = %app_state.pipeline.client().base_url(),
        plot_dir = %app_state.pipeline.plot_dir().display(),
        "NEO dashboard listening on http://localhost:{actual_port}"
    );
    let app = build_router(app_state);

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}

mod error;
mod handlers;
mod static_files;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::handlers::*;
use crate::state::{create_default_config, load_config, AppState};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "system.toml")]
    config: PathBuf,
    #[arg(long, default_value = "127.0.0.1:8080")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if !args.config.exists() {
        warn!(path = %args.config.display(), "config file missing, creating default config");
        create_default_config(&args.config)?;
    }

    let config = load_config(&args.config)?;
    let state = Arc::new(AppState::from_config(config)?);

    let app = router(state);

    info!("gm-server listening on {}", args.listen);
    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

pub(crate) fn router(state: Arc<AppState>) -> Router {
    let admin_routes = Router::new()
        .route("/settings", get(get_settings).post(save_settings))
        .route("/ajax/save", post(ajax_save))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth));

    Router::new()
        .route("/", get(front_page))
        .route("/head", get(head_fragment))
        .route("/api/admin/login", post(login))
        .nest("/api", admin_routes)
        .route("/admin", get(static_files::admin_assets))
        .route("/admin/*asset", get(static_files::admin_assets))
        .fallback(static_files::not_found_handler)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

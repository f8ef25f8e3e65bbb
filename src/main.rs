use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use paroquia_api::config::AppConfig;
use paroquia_api::database::manager;
use paroquia_api::handlers::{
    acoes, auth, comunidades, dashboard, eventos, locais, pastorais, pessoas,
};
use paroquia_api::middleware::auth::require_auth;
use paroquia_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Configuration is validated before anything binds: a missing signing
    // secret aborts startup instead of falling back to a default.
    let config = AppConfig::from_env()?;

    let pool = manager::connect(&config.database).await?;
    let state = AppState::new(pool, &config);
    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("paroquia-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(api_routes(state.clone()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/change-password", post(auth::change_password))
        .route("/auth/verify", post(auth::verify))
        .route("/auth/logout", post(auth::logout))
}

/// Bearer-protected surface: parish CRUD, the dashboard summary and the
/// credential operations that require an authenticated caller.
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/password", put(auth::change_own_password))
        .route("/auth/reset-password/:usuario_id", post(auth::reset_password))
        .route(
            "/api/comunidades",
            get(comunidades::list).post(comunidades::create),
        )
        .route(
            "/api/comunidades/:id",
            get(comunidades::get)
                .put(comunidades::update)
                .delete(comunidades::delete),
        )
        .route("/api/pastorais", get(pastorais::list).post(pastorais::create))
        .route(
            "/api/pastorais/:id",
            get(pastorais::get)
                .put(pastorais::update)
                .delete(pastorais::delete),
        )
        .route("/api/pessoas", get(pessoas::list).post(pessoas::create))
        .route(
            "/api/pessoas/:id",
            get(pessoas::get).put(pessoas::update).delete(pessoas::delete),
        )
        .route("/api/locais", get(locais::list).post(locais::create))
        .route(
            "/api/locais/:id",
            get(locais::get).put(locais::update).delete(locais::delete),
        )
        .route("/api/eventos", get(eventos::list).post(eventos::create))
        .route(
            "/api/eventos/:id",
            get(eventos::get).put(eventos::update).delete(eventos::delete),
        )
        .route("/api/acoes", get(acoes::list).post(acoes::create))
        .route(
            "/api/acoes/:id",
            get(acoes::get).put(acoes::update).delete(acoes::delete),
        )
        .route("/api/dashboard/resumo", get(dashboard::resumo))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Paroquia API",
            "version": version,
            "description": "Parish management backend API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/login, /auth/change-password, /auth/verify, /auth/logout (public)",
                "password": "/auth/password, /auth/reset-password/:usuario_id (protected)",
                "api": "/api/{comunidades,pastorais,pessoas,locais,eventos,acoes}[/:id] (protected)",
                "dashboard": "/api/dashboard/resumo (protected)",
            }
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match manager::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "ok" }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}

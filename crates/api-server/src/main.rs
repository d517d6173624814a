use api_server::http::{AppState, build_router};
use shared::config::{ApiConfig, load_dotenv};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let dotenv_result = load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "api_server=debug,shared=info,axum=info".to_string()),
        )
        .init();

    if let Err(err) = dotenv_result {
        warn!("{err}");
    }

    let config = match ApiConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("failed to read config: {err}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::from_config(&config, reqwest::Client::new());
    if !app_state.automation.is_configured() {
        warn!("FIREBASE_FUNCTIONS_URL/FIREBASE_AUTH_TOKEN unset; automation routes will fail");
    }
    if !app_state.file_management.is_configured() {
        warn!("PYTHON_BACKEND_URL unset; file-management routes will fail");
    }

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {}: {err}", config.bind_addr);
            std::process::exit(1);
        }
    };

    info!(
        "assistant api listening on {}",
        listener.local_addr().unwrap_or(config.bind_addr)
    );
    if let Err(err) = axum::serve(listener, build_router(app_state)).await {
        error!("server stopped: {err}");
        std::process::exit(1);
    }
}

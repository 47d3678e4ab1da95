mod app;
mod chat;
mod config;
mod foods;
mod sessions;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "bitebot=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init()?;
    tracing::info!(
        model = %app_state.config.gemini.model,
        match_policy = ?app_state.classifier.policy(),
        secrets = %app_state.config.secrets_path.display(),
        "bitebot starting"
    );

    let app = app::build_app(app_state);
    app::serve(app).await
}

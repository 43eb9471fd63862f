use didlist::{config, db, routes, services, state};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    match &config.settings_dir {
        Some(dir) => tracing::info!(dir = %dir.display(), "settings storage enabled"),
        None => tracing::warn!("SETTINGS_DIR not set; settings will not persist"),
    }

    let pool = db::init_pool(&config.database_url)
        .await
        .expect("database init failed");
    let state = state::AppState::new(pool, &config);

    // Spawn background session sweeper.
    let _sweeper = services::sweeper::spawn_session_sweeper(state.pool.clone(), services::sweeper::SWEEP_INTERVAL);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "didlist listening");
    axum::serve(listener, app).await.expect("server failed");
}

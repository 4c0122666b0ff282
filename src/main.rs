use tokio::signal;

use dotenvy::dotenv;

use pipo_api::app::create_app;
use pipo_api::config::DbConfig;
use pipo_api::db::pool::create_pool;
use pipo_api::domains::user::repository::SqlxUserRepository;
use pipo_api::state::SharedAppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  let env_filter =
    std::env::var("RUST_LOG").unwrap_or_else(|_| "pipo_api=debug,tower_http=info".to_string());
  tracing_subscriber::fmt().with_env_filter(env_filter).init();

  let config = DbConfig::from_env();
  let pool = create_pool(&config)
    .await
    .expect("Failed to connect to database");

  let state = SharedAppState::new(SqlxUserRepository::new(pool));
  let app = create_app(state);

  let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;

  println!("Server running on http://0.0.0.0:8080");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
  };

  #[cfg(unix)]
  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("Failed to install signal handler")
      .recv()
      .await;
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  println!("Received termination signal, shutting down gracefully...");
}

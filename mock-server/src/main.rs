use mock_server::{fixtures, AppState, Keys, TEST_PRIVATE_KEY, TEST_PUBLIC_KEY};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let public_key = std::env::var("MARVEL_PUBLIC_KEY").unwrap_or_else(|_| TEST_PUBLIC_KEY.to_string());
    let private_key = std::env::var("MARVEL_PRIVATE_KEY").unwrap_or_else(|_| TEST_PRIVATE_KEY.to_string());

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "mock gateway listening");
    mock_server::run(listener, AppState::new(Keys::new(&public_key, &private_key), fixtures())).await
}

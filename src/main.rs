use deckwright::web::{app, AppState};
use deckwright::{Error, GeneratorConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("deckwright=debug,tower_http=debug")),
        )
        .init();

    let config = GeneratorConfig::from_env();
    let availability = config.availability();
    if !availability.gemini {
        tracing::warn!("GEMINI_API_KEY is not set; generation requests will be refused");
    }
    if !availability.pexels && !availability.pixabay {
        tracing::warn!("no image API key set; slides will use placeholder images");
    }

    let listen_addr = config.listen_addr.clone();
    let app = app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    tracing::info!("Listening on {}", listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

//! Example consumer: serves the resources declared in a JSON file.
//!
//! Run from repo root: `MOCK_API_RESOURCES=example_consumer/resources.json cargo run -p example-consumer`
//! Or from this directory: `cargo run`

use mockapi_sdk::{create_server, load_from_path, ServerSettings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mockapi_sdk=info,tower_http=info")),
        )
        .init();

    let settings = ServerSettings::from_env()?;
    let definitions = load_from_path(&settings.resources_path).await?;
    let server = match create_server(&definitions) {
        Ok(s) => s.with_body_limit(settings.body_limit),
        Err(e) => {
            tracing::error!(error = %e, path = %settings.resources_path.display(), "invalid resource definitions");
            return Err(e.into());
        }
    };

    server.bind(settings.addr()).await?;
    Ok(())
}

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use orgsite::app::build_router;
use orgsite::auth::password::legacy_scheme;
use orgsite::config::{Settings, StorageBackend};
use orgsite::demo_seeder::seed_demo_data;
use orgsite::state::AppState;
use orgsite::storage::client::{LocalStorageClient, StorageClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orgsite=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting orgsite server...");

    let settings = Settings::load().context("Failed to load settings")?;

    if let Some(scheme) = settings.admin_password_hash.as_deref().and_then(legacy_scheme) {
        tracing::warn!(
            "ADMIN_PASSWORD_HASH is a {} hash, which is not accepted; admin login will fail until it is regenerated with hash-password",
            scheme
        );
    }

    let storage = connect_storage(&settings).await?;

    let state = AppState::new(storage, settings.admin_config())
        .with_max_upload_bytes(settings.max_upload_bytes);

    if !state.migrate_all().await {
        tracing::warn!("Some collections could not be migrated; continuing with stored data");
    }

    if settings.seed_demo_data {
        seed_demo_data(&state).await;
    }

    let app = build_router(state, settings.session_cookie_secure);

    // Start the server
    tracing::info!("Listening on http://{}", settings.bind_addr);
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", settings.bind_addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}

async fn connect_storage(settings: &Settings) -> anyhow::Result<Arc<dyn StorageClient>> {
    match settings.storage_backend {
        StorageBackend::Local => {
            tokio::fs::create_dir_all(&settings.data_dir)
                .await
                .with_context(|| format!("Failed to create {}", settings.data_dir.display()))?;
            tracing::info!("Using local storage at {}", settings.data_dir.display());
            Ok(Arc::new(LocalStorageClient::new(settings.data_dir.clone())))
        }
        StorageBackend::S3 => connect_s3(settings).await,
    }
}

#[cfg(feature = "s3")]
async fn connect_s3(settings: &Settings) -> anyhow::Result<Arc<dyn StorageClient>> {
    use orgsite::storage::client::S3StorageClient;

    let bucket = settings
        .s3_bucket
        .as_deref()
        .context("S3_BUCKET must be set when STORAGE_BACKEND=s3")?;
    let client = S3StorageClient::connect(bucket.to_string(), settings.s3_endpoint.as_deref()).await;
    tracing::info!("S3 storage client initialized for bucket {}", bucket);
    Ok(Arc::new(client))
}

#[cfg(not(feature = "s3"))]
async fn connect_s3(_settings: &Settings) -> anyhow::Result<Arc<dyn StorageClient>> {
    anyhow::bail!("STORAGE_BACKEND=s3 requires building with the `s3` feature")
}

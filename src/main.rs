mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::{AwsConfig, Config};
use crate::core::middleware;
use crate::features::members::{routes as members_routes, MemberService, MembersState};
use crate::features::settings::{routes as settings_routes, SettingsService};
use crate::features::home::routes as home_routes;
use crate::modules::storage::{DynamoDbMemberStore, S3PhotoStore};
use aws_config::{retry::RetryConfig, BehaviorVersion, Region};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

/// AWS SDK configuration with the SDK's standard retry policy
async fn aws_sdk_config(config: &AwsConfig) -> aws_config::SdkConfig {
    let retry_config = RetryConfig::standard()
        .with_max_attempts(3)
        .with_initial_backoff(Duration::from_millis(50));

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .retry_config(retry_config);

    if let Some(endpoint_url) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }

    loader.load().await
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Initialize registry settings (editable at runtime from /settings)
    let settings_service = Arc::new(SettingsService::from_config(&config.registry));
    let settings = settings_service.get();
    tracing::info!(
        "Registry settings initialized: table={}, bucket={}",
        settings.table_display(),
        settings.bucket_display()
    );

    // Initialize DynamoDB member table
    let sdk_config = aws_sdk_config(&config.aws).await;
    let dynamodb_client = Arc::new(aws_sdk_dynamodb::Client::new(&sdk_config));
    let member_store = Arc::new(DynamoDbMemberStore::new(dynamodb_client));
    tracing::info!("DynamoDB client initialized for region: {}", config.aws.region);

    // Initialize S3 photo bucket
    let photo_store = Arc::new(
        S3PhotoStore::new(&config.aws)
            .map_err(|e| anyhow::anyhow!("Failed to initialize S3 photo store: {}", e))?,
    );

    // Initialize Member Service
    let member_service = Arc::new(MemberService::new(member_store, photo_store));
    tracing::info!("Member service initialized");

    let members_state = MembersState {
        member_service,
        settings_service: Arc::clone(&settings_service),
    };

    let app = Router::new()
        .merge(home_routes())
        .merge(members_routes(
            members_state,
            config.app.max_request_body_size,
        ))
        .merge(settings_routes(settings_service))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));

    axum::serve(listener, app).await?;

    Ok(())
}

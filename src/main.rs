use blogim_api::{
    config::Config,
    infrastructure::{
        database::pool::{create_pool, run_migrations},
        notifications::{
            NotificationSender,
            mailer::{HttpMailer, LogNotifier},
        },
        repositories::{
            sqlx_blocklist_repository::SqlxBlockListStore,
            sqlx_post_repository::SqlxPostRepository,
            sqlx_review_repository::SqlxReviewRepository,
            sqlx_tracker_repository::SqlxTrackerRepository,
            sqlx_user_repository::SqlxUserRepository,
        },
    },
    presentation::http::{
        routes::create_router,
        state::{AppState, Repositories},
    },
};
use axum::extract::DefaultBodyLimit;
use http::{HeaderValue, Method, header};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Uses RUST_LOG if set, otherwise sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new("info,blogim_api=debug,tower_http=debug")
        })
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    let db = create_pool(&config.database_url, config.database_max_connections).await?;
    run_migrations(&db, config.ignore_missing_migrations).await?;

    let redis = redis::Client::open(config.redis_url.clone())?;

    let notifier: Arc<dyn NotificationSender> = match &config.mail_webhook_url {
        Some(url) => Arc::new(HttpMailer::new(
            url.clone(),
            config.notification_recipient.clone(),
        )?),
        None => {
            tracing::warn!("MAIL_WEBHOOK_URL not set; notifications will only be logged");
            Arc::new(LogNotifier::new(config.notification_recipient.clone()))
        }
    };

    let repos = Repositories {
        posts: Arc::new(SqlxPostRepository::new(db.clone())),
        reviews: Arc::new(SqlxReviewRepository::new(db.clone())),
        users: Arc::new(SqlxUserRepository::new(db.clone())),
        block_list: Arc::new(SqlxBlockListStore::new(db.clone())),
        tracker: Arc::new(SqlxTrackerRepository::new(db.clone())),
    };
    let state = AppState::new(db, redis, config.clone(), repos, notifier)?;

    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let headers = [header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT];
    let base = if config.allowed_origins.is_empty() {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    };
    let cors = base
        .allow_methods(methods)
        .allow_headers(headers)
        .max_age(Duration::from_secs(3600));

    let app = create_router(state)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("{} listening on {}", config.site_name, addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}

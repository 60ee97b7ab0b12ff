use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tour_service::config::Config;
use tour_service::domain::review::service::ReviewService;
use tour_service::domain::tour::service::TourService;
use tour_service::domain::user::service::UserService;
use tour_service::inbound::http::router::create_router;
use tour_service::inbound::http::router::AppState;
use tour_service::inbound::http::session::SessionCookie;
use tour_service::outbound::email::SmtpMailer;
use tour_service::outbound::repositories::PostgresReviewRepository;
use tour_service::outbound::repositories::PostgresTourRepository;
use tour_service::outbound::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tour_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "tour-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let environment = config.server.environment;

    tracing::info!(
        http_port = config.server.http_port,
        environment = ?environment,
        smtp_host = %config.email.host,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Authenticator::new(
        config.jwt.secret.as_bytes(),
        chrono::Duration::days(config.jwt.expires_in_days),
    )?;
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let tour_repository = Arc::new(PostgresTourRepository::new(pg_pool.clone()));
    let review_repository = Arc::new(PostgresReviewRepository::new(pg_pool));
    let mailer = Arc::new(SmtpMailer::new(&config.email, !environment.is_development())?);

    let user_service = Arc::new(UserService::new(user_repository, mailer, authenticator));
    let tour_service = Arc::new(TourService::new(tour_repository));
    let review_service = Arc::new(ReviewService::new(review_repository));

    let state = AppState {
        user_service,
        tour_service,
        review_service,
        session_cookie: SessionCookie::new(
            !environment.is_development(),
            config.jwt.cookie_expires_in_days,
        ),
        environment,
        public_url: config.server.public_url.clone(),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    tracing::info!("Server exited");
    Ok(())
}

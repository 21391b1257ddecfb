use std::{process, sync::Arc};

use foglio::{
    application::{accounts::AccountService, error::AppError, posts::PostService},
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, HttpState},
        telemetry,
    },
};
use time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    // Serve is the only command; parsing still validates its arguments.
    let config::Command::Serve(_) = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    let pool = PostgresRepositories::connect(
        &settings.database.url,
        settings.database.max_connections.get(),
    )
    .await
    .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    let repositories = Arc::new(PostgresRepositories::new(pool));
    let state = HttpState {
        posts: Arc::new(PostService::new(repositories.clone())),
        accounts: Arc::new(AccountService::new(
            repositories,
            settings.auth.admin_secret.clone(),
        )),
    };

    let session_ttl = Duration::seconds(settings.auth.session_ttl_seconds.get());
    let sessions = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(session_ttl))
        .with_signed(http::session_signing_key(&settings.auth.secret_key));

    let router = http::build_router(state, sessions);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(target = "foglio::server", addr = %settings.server.addr, "server is running");

    axum::serve(listener, router.into_make_service())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}

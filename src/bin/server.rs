use std::{env, net::SocketAddr, process::exit};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_extra::extract::cookie::Key;
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use dinner_spinner::{
    AppState, PasswordHash, build_router, create_cookie_key, graceful_shutdown,
    logging_middleware,
};

/// The JSON API server for Dinner Spinner.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, default_value = "dinner_spinner.db")]
    db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Only send the session cookie over HTTPS.
    ///
    /// Enable this when the server sits behind a TLS-terminating proxy.
    #[arg(long)]
    secure_cookies: bool,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));

    let cookie_key = match env::var("SECRET") {
        Ok(secret) => create_cookie_key(&secret),
        Err(_) => {
            tracing::warn!(
                "The environment variable 'SECRET' is not set, sessions will not survive a restart"
            );
            Key::generate()
        }
    };

    let connection = match Connection::open(&args.db_path) {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not open the database at {}: {error}", args.db_path);
            exit(1);
        }
    };

    let state = match AppState::new(connection, cookie_key, PasswordHash::DEFAULT_COST) {
        Ok(state) => state.with_secure_cookies(args.secure_cookies),
        Err(error) => {
            tracing::error!("Could not initialize the database: {error}");
            exit(1);
        }
    };

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        exit(1);
    }
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}

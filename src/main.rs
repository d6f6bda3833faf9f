use std::{env, error::Error};

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use tokio::{fs, net, task};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::{
    layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter,
};

use ticket_tracker::{config, db, server, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = env::args().nth(1).unwrap_or_else(|| "config.toml".into());
    let config = fs::read_to_string(&path).await?;
    let config = toml::from_str::<Config>(&config)?;

    let state = match config.db {
        config::Db::Postgres {
            url,
            connect_timeout,
        } => {
            let (db_client, db_connection) =
                db::connect(&url, connect_timeout).await?;

            task::spawn(async move {
                if let Err(e) = db_connection.await {
                    tracing::error!(error = %e, "database connection failed");
                }
            });

            db_client.init_schema().await?;
            server::AppState::new(db_client)
        }
        config::Db::Memory => {
            tracing::warn!("using in-memory store, tickets will not persist");
            server::AppState::new(db::Memory::new())
        }
    };

    let origins = config
        .http
        .cors
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(AllowOrigin::list(origins));

    let app = server::router(state).layer(cors);

    let listener = net::TcpListener::bind(config.http.server.addr).await?;
    tracing::info!(addr = %config.http.server.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

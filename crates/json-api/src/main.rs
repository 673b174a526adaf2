//! Orderdesk JSON API Server

use std::process;

use salvo::prelude::*;
use tracing::{error, info};

use orderdesk_app::context::AppContext;

use crate::{
    config::{ConfigError, ServerConfig},
    observability::Observability,
    state::State,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod config;
mod extensions;
mod healthcheck;
mod observability;
mod orders;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Orderdesk JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        exit();
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        exit();
    });

    let app = match build_app(&config) {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            observability.shutdown();
            exit();
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;
    let server = Server::new(listener);
    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server
        .serve(router::app_router(State::from_app_context(app)))
        .await;

    observability.shutdown();
}

fn build_app(config: &ServerConfig) -> Result<AppContext, String> {
    let settings = || -> Result<_, ConfigError> {
        Ok((
            config.store.backend()?,
            config.auth.credentials()?,
            config.auth.sessions()?,
        ))
    };

    let (store, credentials, sessions) = settings().map_err(|error| error.to_string())?;

    AppContext::build(store, credentials, sessions).map_err(|error| error.to_string())
}

#[expect(clippy::exit, reason = "startup failures end the process")]
fn exit() -> ! {
    process::exit(1)
}

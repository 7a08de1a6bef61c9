use std::env;

use anyhow::Context;
use cafe_payroll::api::{AppState, create_router};
use cafe_payroll::config::ConfigLoader;
use cafe_payroll::invoice::JsonFileInvoiceStore;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_DIR: &str = "./config/cafe";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir = env::var("CAFE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let bind_addr = env::var("CAFE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());

    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading configuration from {}", config_dir))?;

    let state = match env::var("CAFE_INVOICE_FILE") {
        Ok(path) => {
            let store = JsonFileInvoiceStore::open(&path)
                .with_context(|| format!("opening invoice store {}", path))?;
            AppState::new(config, store)
        }
        Err(_) => AppState::in_memory(config),
    };

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {}", bind_addr))?;
    info!(addr = %bind_addr, config_dir = %config_dir, "Café payroll API listening");

    axum::serve(listener, create_router(state))
        .await
        .context("serving HTTP")?;

    Ok(())
}

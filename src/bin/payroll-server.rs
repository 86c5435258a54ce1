//! Payroll Engine HTTP server.
//!
//! Environment:
//!
//! - `PAYROLL_CONFIG_DIR`: statutory rate directory (default `./config/ph_statutory`)
//! - `PAYROLL_DIRECTORY_FILE`: YAML employee list (default `./config/employees.yaml`)
//! - `PAYROLL_BIND_ADDR`: listen address (default `127.0.0.1:3000`)
//! - `RUST_LOG`: log filter (default `payroll_engine=info,payroll_server=info`)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::engine::PayrollEngine;
use payroll_engine::store::{MemoryEmployeeDirectory, MemoryHolidayStore, MemoryPayrollStore};

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("payroll_engine=info,payroll_server=info")),
        )
        .init();

    let config_dir = env_or("PAYROLL_CONFIG_DIR", "./config/ph_statutory");
    let directory_file = env_or("PAYROLL_DIRECTORY_FILE", "./config/employees.yaml");
    let addr: SocketAddr = env_or("PAYROLL_BIND_ADDR", "127.0.0.1:3000").parse()?;

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        path = %config_dir,
        schedules = config.config().schedules().len(),
        "Statutory rates loaded"
    );

    let directory = MemoryEmployeeDirectory::load(&directory_file)?;
    info!(
        path = %directory_file,
        employees = directory.employees().len(),
        "Employee directory loaded"
    );

    let engine = PayrollEngine::new(
        config,
        Arc::new(directory),
        Arc::new(MemoryPayrollStore::new()),
        Arc::new(MemoryHolidayStore::new()),
    );
    let app = create_router(AppState::new(engine));

    info!(%addr, "Payroll server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

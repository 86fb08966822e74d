use std::str::FromStr;
use std::sync::Arc;

use eyre::{Result, WrapErr};
use log::info;
use refinery::config::Config as MigrationConfig;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::repository::auth::AuthRepository;
use crate::repository::bookings::BookingRepository;
use crate::repository::tickets::TicketRepository;
use crate::routes::Api;
use crate::service::auth::AuthService;
use crate::service::bookings::BookingService;
use crate::service::tickets::TicketService;

mod config;
mod domain;
mod error;
mod extensions;
mod handlers;
mod repository;
mod routes;
mod service;

refinery::embed_migrations!("migrations");

#[tokio::main]
async fn main() -> Result<()> {
    // setup log
    env_logger::init();
    let config = Config::from_env()?;
    info!("booking service starts on {}", config.bind_address);

    // run migrations
    let mut migration_config = MigrationConfig::from_str(&config.database_url)?;
    migrations::runner()
        .run_async(&mut migration_config)
        .await
        .wrap_err("Failed to run migrations")?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .wrap_err("Failed to connect to database")?;

    // repositories
    let booking_repository = Arc::new(BookingRepository::new(pool.clone()));
    let ticket_repository = Arc::new(TicketRepository::new(pool.clone()));
    let auth_repository = Arc::new(AuthRepository::new(pool));

    // API
    let api = Api {
        booking_service: BookingService { booking_repository },
        ticket_service: TicketService { ticket_repository },
        auth_service: AuthService { auth_repository },
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, handlers::router(api)).await?;
    Ok(())
}

#[macro_use]
extern crate rocket;

pub mod api_core;
pub mod config;
pub mod dto;
pub mod error;
pub mod keygen_core;
pub mod model_core;
pub mod templates;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use rocket::{Build, Rocket};
use rocket_cors::{AllowedOrigins, CorsOptions};

use crate::config::ServiceConfig;
use crate::keygen_core::SshKeygen;

pub fn build_rocket(config: ServiceConfig) -> Result<Rocket<Build>> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::all())
        .to_cors()
        .context("invalid CORS options")?;

    let keygen = SshKeygen::from_config(&config);

    Ok(rocket::custom(rocket::Config {
        address: config.address,
        port: config.port,
        ..rocket::Config::default()
    })
    .attach(cors)
    .manage(keygen)
    .mount(
        "/",
        routes![
            api_core::home,
            api_core::catalog,
            api_core::health,
            api_core::generate,
            api_core::keys_json,
            api_core::keys,
        ],
    )
    .register("/", catchers![api_core::not_found, api_core::internal_error]))
}

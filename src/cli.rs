use crate::catalog::{CatalogConfig, DEFAULT_CATALOG_URL, DEFAULT_TIMEOUT_SECS};
use clap::Parser;
use reqwest::Url;
use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "music_search_api")]
#[command(about = "Music search proxy serving an interactive explorer page")]
pub struct Cli {
    #[arg(long, default_value = "127.0.0.1", help = "Address to bind the HTTP server to")]
    pub address: IpAddr,
    #[arg(long, default_value_t = 8000, help = "Port to bind the HTTP server to")]
    pub port: u16,
    #[arg(long, default_value = DEFAULT_CATALOG_URL, help = "Catalog search endpoint queries are forwarded to")]
    pub catalog_url: Url,
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Connect and response timeout for catalog requests, in seconds"
    )]
    pub timeout_secs: u64,
}

impl Cli {
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            search_url: self.catalog_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn rocket_config(&self) -> rocket::Config {
        rocket::Config {
            address: self.address,
            port: self.port,
            log_level: rocket::config::LogLevel::Normal,
            ..rocket::Config::default()
        }
    }
}

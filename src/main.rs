#[macro_use]
extern crate rocket;

mod catalog;
mod catchers;
mod cli;
mod error;
mod fairings;
mod routes;
mod telemetry;
mod types;

#[cfg(test)]
mod test_helpers;

use catalog::CatalogClient;
use clap::Parser;
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedMethods, AllowedOrigins, CorsOptions};
use std::collections::HashSet;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::index::get_index,
        routes::search::get_search,
        routes::health::get_health,
    ),
    components(),
    tags(
        (name = "Page", description = "Interactive search page"),
        (name = "Search", description = "Music catalog search passthrough"),
        (name = "Health", description = "Health check endpoints"),
    ),
    info(
        title = "Music App API",
        version = "1.0.0",
        description = "A minimal music search API proxying the Deezer catalog, with a health endpoint",
    )
)]
struct ApiDoc;

fn configure_cors() -> CorsOptions {
    let allowed_methods: AllowedMethods = [Method::Get, Method::Options]
        .into_iter()
        .map(From::from)
        .collect();

    CorsOptions {
        allowed_origins: AllowedOrigins::all(),
        allowed_methods,
        allowed_headers: AllowedHeaders::all(),
        allow_credentials: false,
        expose_headers: HashSet::from([fairings::REQUEST_ID_HEADER.to_string()]),
        ..Default::default()
    }
}

fn rocket(
    catalog: CatalogClient,
    config: rocket::Config,
) -> Result<rocket::Rocket<rocket::Build>, rocket_cors::Error> {
    let cors = configure_cors().to_cors()?;

    Ok(rocket::custom(config)
        .manage(catalog)
        .mount("/", routes::index::routes())
        .mount("/", routes::health::routes())
        .mount("/api", routes::search::routes())
        .mount(
            "/",
            SwaggerUi::new("/docs/<tail..>").url("/openapi.json", ApiDoc::openapi()),
        )
        .register("/", catchers::catchers())
        .attach(fairings::RequestLogger)
        .attach(fairings::ShutdownNotice)
        .attach(cors))
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();
    telemetry::init();

    let catalog = CatalogClient::new(&cli.catalog_config())?;
    let ignited = rocket(catalog, cli.rocket_config())?.launch().await?;

    // Dropping the ignited instance drops managed state, closing the catalog pool.
    drop(ignited);
    tracing::info!("catalog client released");

    Ok(())
}

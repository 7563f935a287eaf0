use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Orbit, Rocket};

use crate::catalog::CatalogClient;

/// Logs the start of graceful shutdown while the catalog client is still held.
pub struct ShutdownNotice;

#[rocket::async_trait]
impl Fairing for ShutdownNotice {
    fn info(&self) -> Info {
        Info {
            name: "Shutdown Notice",
            kind: Kind::Shutdown,
        }
    }

    async fn on_shutdown(&self, rocket: &Rocket<Orbit>) {
        let holds_client = rocket.state::<CatalogClient>().is_some();
        tracing::info!(holds_client, "shutdown requested, draining in-flight requests");
    }
}

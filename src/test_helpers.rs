use crate::catalog::{CatalogClient, CatalogConfig, DEFAULT_TIMEOUT_SECS};
use rocket::local::asynchronous::Client;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub(crate) async fn client() -> Client {
    TestClientBuilder::new().build().await
}

pub(crate) struct TestClientBuilder {
    catalog_url: Option<String>,
    timeout: Duration,
}

impl TestClientBuilder {
    pub(crate) fn new() -> Self {
        Self {
            catalog_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub(crate) fn catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = Some(url.into());
        self
    }

    pub(crate) fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) async fn build(self) -> Client {
        // Routes that never reach the catalog still need a client in state.
        let catalog_url = match self.catalog_url {
            Some(url) => url,
            None => unreachable_catalog_url().await,
        };

        let catalog = CatalogClient::new(&CatalogConfig {
            search_url: reqwest::Url::parse(&catalog_url).expect("valid catalog url"),
            timeout: self.timeout,
        })
        .expect("catalog client");

        let rocket = crate::rocket(catalog, rocket::Config::debug_default())
            .expect("valid rocket instance");

        Client::tracked(rocket).await.expect("valid client")
    }
}

/// In-process stand-in for the catalog API.
///
/// Answers every connection with one scripted response and records the
/// decoded `q` parameter of each request it receives.
pub(crate) struct MockCatalog {
    addr: std::net::SocketAddr,
    queries: Arc<Mutex<Vec<String>>>,
}

enum Reply {
    After(Duration, String),
    Never,
}

impl MockCatalog {
    pub(crate) async fn start(status: u16, body: &str) -> Self {
        Self::start_delayed(status, body, Duration::ZERO).await
    }

    /// Holds every response for `delay` before writing it.
    pub(crate) async fn start_delayed(status: u16, body: &str, delay: Duration) -> Self {
        let response = format!(
            "HTTP/1.1 {status} Mock\r\nConnection: close\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        );
        Self::serve(Reply::After(delay, response)).await
    }

    /// Accepts connections but never answers them.
    pub(crate) async fn start_silent() -> Self {
        Self::serve(Reply::Never).await
    }

    async fn serve(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock catalog");
        let addr = listener.local_addr().expect("mock catalog address");
        let queries = Arc::new(Mutex::new(Vec::new()));
        let reply = Arc::new(reply);

        let recorded = Arc::clone(&queries);
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };

                let reply = Arc::clone(&reply);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let head = read_request_head(&mut socket).await;
                    if let Some(query) = query_from_request_line(&head) {
                        recorded.lock().expect("queries lock").push(query);
                    }
                    match reply.as_ref() {
                        Reply::After(delay, response) => {
                            tokio::time::sleep(*delay).await;
                            let _ = socket.write_all(response.as_bytes()).await;
                        }
                        Reply::Never => tokio::time::sleep(Duration::from_secs(60)).await,
                    }
                });
            }
        });

        Self { addr, queries }
    }

    pub(crate) fn url(&self) -> String {
        format!("http://{}/search", self.addr)
    }

    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("queries lock").clone()
    }
}

async fn read_request_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8_lossy(&head).into_owned()
}

fn query_from_request_line(head: &str) -> Option<String> {
    let target = head.lines().next()?.split_whitespace().nth(1)?;
    let url = reqwest::Url::parse(&format!("http://mock{target}")).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
}

/// A URL on a port nothing is listening on.
pub(crate) async fn unreachable_catalog_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}/search")
}

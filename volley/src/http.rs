use crate::executor::{RequestError, Transport};
use reqwest::{Client, Url};
use std::time::Duration;
use tokio::sync::Semaphore;
use volley_core::ClientConfig;

/// reqwest-backed [`Transport`].
///
/// reqwest has no global connection cap, so `max_connections` is enforced here by bounding the
/// number of outbound calls open at once.
pub struct HttpTransport {
    client: Client,
    connections: Semaphore,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.total_timeout)
            .pool_max_idle_per_host(config.max_idle_connections)
            .build()?;

        Ok(Self {
            client,
            connections: Semaphore::new(config.max_connections.get()),
        })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &Url, timeout: Duration) -> Result<(), RequestError> {
        let _connection = self
            .connections
            .acquire()
            .await
            .map_err(|_| RequestError::Transport("connection pool is closed".to_string()))?;

        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| classify(err, timeout))?;

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(RequestError::Status(status.as_u16()));
        }

        response.bytes().await.map_err(|err| {
            if err.is_timeout() {
                RequestError::Timeout(timeout)
            } else {
                RequestError::Body(err.to_string())
            }
        })?;

        Ok(())
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> RequestError {
    if err.is_timeout() {
        RequestError::Timeout(timeout)
    } else if err.is_connect() {
        RequestError::Connect(err.to_string())
    } else if let Some(status) = err.status() {
        RequestError::Status(status.as_u16())
    } else {
        RequestError::Transport(err.to_string())
    }
}

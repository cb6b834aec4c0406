use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::ClientError;
use crate::server_client::HttpTransport;


pub struct ReqwestTransport {
    client: reqwest::Client,
    base: Url,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    pub fn new(server_address: &str, timeout: Option<Duration>) -> Result<Self, url::ParseError> {
        Ok(ReqwestTransport {
            client: reqwest::Client::new(),
            base: Url::parse(server_address)?,
            timeout,
        })
    }

    pub fn base(&self) -> &Url { &self.base }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base.join(path).map_err(|err| ClientError::Transport {
            path: path.to_owned(),
            message: err.to_string(),
        })
    }
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, path: &str) -> Result<String, ClientError> {
        let transport_error = |err: reqwest::Error| ClientError::Transport {
            path: path.to_owned(),
            message: err.to_string(),
        };
        let request = with_timeout(self.client.post(self.url(path)?), self.timeout);
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http { path: path.to_owned(), status: status.as_u16() });
        }
        response.text().await.map_err(transport_error)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn with_timeout(
    request: reqwest::RequestBuilder, timeout: Option<Duration>,
) -> reqwest::RequestBuilder {
    match timeout {
        Some(timeout) => request.timeout(timeout),
        None => request,
    }
}

// The browser enforces its own network timeouts.
#[cfg(target_arch = "wasm32")]
fn with_timeout(
    request: reqwest::RequestBuilder, _timeout: Option<Duration>,
) -> reqwest::RequestBuilder {
    request
}

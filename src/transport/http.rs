use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;

use super::{interpret, ApiRequest, Transport, TransportError};

#[derive(Clone)]
pub struct HttpTransport {
    http: HttpClient,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(cfg: &ClientConfig) -> Result<Self, TransportError> {
        let http = HttpClient::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(TransportError::from_reqwest)?;
        Ok(Self { http, base_url: cfg.base_url.clone() })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, req: ApiRequest) -> Result<Option<Value>, TransportError> {
        let mut builder = self
            .http
            .request(req.method, self.endpoint(&req.path))
            .header(reqwest::header::ACCEPT, "application/json");
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            if err.is_connect() {
                TransportError::Unreachable(self.base_url.to_string())
            } else {
                TransportError::from_reqwest(err)
            }
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(TransportError::from_reqwest)?;
        interpret(status, &bytes)
    }
}

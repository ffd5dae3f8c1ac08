use async_trait::async_trait;
use contracts::usecases::u601_generate_keys::{HttpReply, KeyTransport, TransportError};
use gloo_net::http::Request;

/// `fetch`-backed transport for the key endpoint
pub struct GlooTransport;

#[async_trait(?Send)]
impl KeyTransport for GlooTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpReply, TransportError> {
        let response = Request::post(url)
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(|e| TransportError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(HttpReply { status, body })
    }
}

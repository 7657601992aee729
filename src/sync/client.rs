use reqwest::Client;
use serde_json::Value;

/// Thin HTTP client for the single notification resource endpoint.
///
/// All bodies are JSON. Create and cancel parse the body regardless of the
/// HTTP status: application rejections arrive as 4xx JSON bodies and are
/// handled by the caller, not treated as transport failures.
pub struct NotifyClient {
    base_url: String,
    http: Client,
}

impl NotifyClient {
    pub fn new(base_url: &str) -> Result<Self, String> {
        let http = Client::builder()
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET the full notification collection.
    pub async fn list(&self) -> Result<Value, String> {
        let resp = self
            .http
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| format!("GET failed: {}", e))?;

        if !resp.status().is_success() {
            return Err(format!("GET returned {}", resp.status()));
        }

        resp.json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }

    /// GET one notification's status by id.
    pub async fn status(&self, id: &str) -> Result<Value, String> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[("id", id)])
            .send()
            .await
            .map_err(|e| format!("GET failed: {}", e))?;

        resp.json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }

    /// POST a create request with a JSON body.
    pub async fn create(&self, payload: &Value) -> Result<Value, String> {
        let resp = self
            .http
            .post(&self.base_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| format!("POST failed: {}", e))?;

        resp.json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }

    /// DELETE with an id query parameter, requesting cancellation.
    pub async fn cancel(&self, id: &str) -> Result<Value, String> {
        let resp = self
            .http
            .delete(&self.base_url)
            .query(&[("id", id)])
            .send()
            .await
            .map_err(|e| format!("DELETE failed: {}", e))?;

        resp.json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }
}

use std::time::Duration;

use async_trait::async_trait;
use base64ct::{Base64, Encoding};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use super::{Estimator, EstimatorError, FoodDescription, FoodInfo};
use crate::config::EstimatorConfig;

/// Estimator backed by the Gemini `generateContent` REST endpoint with a JSON response schema.
#[derive(Clone)]
pub struct GeminiEstimator {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiEstimator {
    pub fn new(config: &EstimatorConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );
        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl Estimator for GeminiEstimator {
    #[instrument(skip_all, fields(food = %description.name, mode = %description.roast_mode))]
    async fn estimate(&self, description: &FoodDescription) -> Result<FoodInfo, EstimatorError> {
        let res = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(description))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(%status, "estimator rejected request");
            return Err(EstimatorError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GenerateContentResponse = res
            .json()
            .await
            .map_err(|e| EstimatorError::Malformed(e.to_string()))?;
        let info = FoodInfo::from_model_json(&envelope.first_text()?)?;
        debug!(calories = info.calories, "estimate received");
        Ok(info)
    }
}

fn request_body(description: &FoodDescription) -> Value {
    let mut prompt = format!("Food: {}", description.name);
    if let Some(notes) = description.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        prompt.push_str("\nNotes: ");
        prompt.push_str(notes);
    }

    let mut parts = vec![json!({ "text": prompt })];
    if let Some(image) = &description.image {
        parts.push(json!({
            "inlineData": {
                "mimeType": sniff_mime(image),
                "data": Base64::encode_string(image),
            }
        }));
    }

    json!({
        "systemInstruction": {
            "parts": [{ "text": description.roast_mode.system_instruction() }]
        },
        "contents": [{ "role": "user", "parts": parts }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
        }
    })
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "calories": { "type": "NUMBER" },
            "protein_g": { "type": "NUMBER", "nullable": true },
            "fat_g": { "type": "NUMBER", "nullable": true },
            "carbs_g": { "type": "NUMBER", "nullable": true },
            "roast": { "type": "STRING" }
        },
        "required": ["calories", "roast"]
    })
}

fn sniff_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        _ => "image/png",
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Result<String, EstimatorError> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| EstimatorError::Malformed("no candidate text".into()))
    }
}

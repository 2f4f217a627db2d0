//! HTTP client for the weather agent backend

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AgentConfig;
use crate::error::{RequestError, ValidationError};

/// A question that passed local validation: trimmed and non-empty
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Question(String);

impl Question {
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

/// Client for the agent endpoints. Cheap to clone; clones share one
/// connection pool.
#[derive(Clone, Debug)]
pub struct AgentClient {
    http: reqwest::Client,
    config: AgentConfig,
}

impl AgentClient {
    pub fn new(config: AgentConfig) -> Result<Self, RequestError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RequestError::transport)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// `POST /ask` with `{"question": ...}`; returns the reply JSON as-is.
    pub async fn ask(&self, question: &Question) -> Result<Value, RequestError> {
        let url = self.config.endpoint("ask");
        tracing::info!(%url, %question, "asking agent");

        let response = self
            .http
            .post(&url)
            .json(&AskRequest {
                question: question.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(%url, error = %e, "agent request failed");
                RequestError::transport(e)
            })?;

        read_json(response).await
    }

    /// `GET /weather/{city}`, the backend's direct weather lookup
    pub async fn city_weather(&self, city: &str) -> Result<Value, RequestError> {
        let url = self
            .config
            .endpoint(&format!("weather/{}", urlencoding::encode(city)));
        tracing::info!(%url, city, "fetching city weather");

        let response = self.http.get(&url).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "city weather request failed");
            RequestError::transport(e)
        })?;

        read_json(response).await
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, RequestError> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "agent returned error status");
        return Err(RequestError::Status(status.as_u16()));
    }

    let body = response.bytes().await.map_err(RequestError::transport)?;
    let reply: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "agent reply is not JSON");
        RequestError::Decode(e.to_string())
    })?;
    tracing::debug!(%reply, "agent replied");
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_is_trimmed() {
        let question = Question::parse("  weather in Kyiv?  ").unwrap();
        assert_eq!(question.as_str(), "weather in Kyiv?");
    }

    #[test]
    fn test_blank_question_rejected() {
        assert_eq!(Question::parse(""), Err(ValidationError::EmptyQuestion));
        assert_eq!(Question::parse(" \t\n "), Err(ValidationError::EmptyQuestion));
    }
}

//! HTTP tests for AgentClient against a mock agent

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use weather_agent::client::{AgentClient, Question};
use weather_agent::config::AgentConfig;
use weather_agent::error::RequestError;
use weather_agent::normalize::normalize;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AgentClient {
    let config = AgentConfig::new(server.uri(), Duration::from_secs(5));
    AgentClient::new(config).expect("client builds")
}

#[tokio::test]
async fn test_ask_posts_trimmed_question() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .and(body_json(json!({ "question": "Weather in Paris?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Sunny and 22°C",
            "temperature": 22,
            "condition": "Sunny",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let question = Question::parse("  Weather in Paris?  ").unwrap();
    let reply = client_for(&server).ask(&question).await.unwrap();
    let report = normalize(&reply);

    assert_eq!(report.condition_text().as_deref(), Some("Sunny"));
    assert_eq!(report.temperature, Some(json!(22)));
}

#[tokio::test]
async fn test_ask_plain_string_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("It's raining in London")))
        .mount(&server)
        .await;

    let question = Question::parse("London?").unwrap();
    let reply = client_for(&server).ask(&question).await.unwrap();

    assert_eq!(
        normalize(&reply).description_text().as_deref(),
        Some("It's raining in London")
    );
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let question = Question::parse("Weather in Paris?").unwrap();
    let err = client_for(&server).ask(&question).await.unwrap_err();

    assert_eq!(err, RequestError::Status(500));
    assert_eq!(err.to_string(), "API error: 500");
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let question = Question::parse("Weather?").unwrap();
    let err = client_for(&server).ask(&question).await.unwrap_err();

    assert!(matches!(err, RequestError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_city_weather_encodes_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather/New%20York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "city": "New York",
            "country": "US",
            "temperature": 12,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server).city_weather("New York").await.unwrap();
    assert_eq!(reply["country"], json!("US"));
}

#[tokio::test]
async fn test_unreachable_agent_is_transport_error() {
    let config = AgentConfig::new("http://127.0.0.1:9", Duration::from_secs(1));
    let client = AgentClient::new(config).unwrap();
    let question = Question::parse("Weather?").unwrap();

    let err = client.ask(&question).await.unwrap_err();
    assert!(matches!(err, RequestError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn test_slow_agent_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!("late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = AgentConfig::new(server.uri(), Duration::from_secs(1));
    let client = AgentClient::new(config).unwrap();
    let question = Question::parse("Weather?").unwrap();

    let err = client.ask(&question).await.unwrap_err();
    assert!(
        err.to_string().starts_with("request failed: timed out"),
        "got {err}"
    );
}

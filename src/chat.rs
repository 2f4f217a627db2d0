//! Assistant replies for the chat view
//!
//! The chat view reads replies in its own shape, [`ChatWeather`], which uses
//! the backend's snake_case weather model (`wind_speed`, `city`, `country`)
//! rather than the ask page's [`WeatherReport`](crate::normalize::WeatherReport).

use serde_json::{Map, Value};

use crate::normalize::display_value;

const COMMAND_PREFIX: &str = "/weather";

/// Weather object as returned by the agent's city lookup
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatWeather {
    pub city: Option<Value>,
    pub country: Option<Value>,
    pub temperature: Option<Value>,
    pub description: Option<Value>,
    pub humidity: Option<Value>,
    pub wind_speed: Option<Value>,
}

impl ChatWeather {
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let field = |key: &str| object.get(key).cloned();
        Self {
            city: field("city"),
            country: field("country"),
            temperature: field("temperature"),
            description: field("description"),
            humidity: field("humidity"),
            wind_speed: field("wind_speed"),
        }
    }

    /// Only replies naming a city count as weather objects.
    pub fn from_reply(reply: &Value) -> Option<Self> {
        let weather = Self::from_object(reply.as_object()?);
        weather.city.as_ref().filter(|city| has_content(city))?;
        Some(weather)
    }

    pub fn summary(&self) -> String {
        let show = |value: &Option<Value>| {
            value
                .as_ref()
                .map(display_value)
                .unwrap_or_else(|| "n/a".to_string())
        };
        format!(
            "Weather in {}, {}: {}°C, {}. Humidity: {}%, Wind: {} km/h",
            show(&self.city),
            show(&self.country),
            show(&self.temperature),
            show(&self.description),
            show(&self.humidity),
            show(&self.wind_speed),
        )
    }
}

/// Text of the assistant message for a successful reply.
///
/// A non-empty `response` wins, then a city weather object, then the raw
/// JSON of the whole reply.
pub fn assistant_text(reply: &Value) -> String {
    if let Some(response) = reply.get("response").filter(|v| has_content(v)) {
        return display_value(response);
    }
    if let Some(weather) = ChatWeather::from_reply(reply) {
        return weather.summary();
    }
    reply.to_string()
}

/// City named by a `/weather <city>` message
pub fn city_command(text: &str) -> Option<String> {
    let rest = text.trim().strip_prefix(COMMAND_PREFIX)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let city = rest.trim();
    (!city.is_empty()).then(|| city.to_string())
}

/// Null, `false`, zero and empty strings carry nothing to show.
fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_city_weather_sentence() {
        let reply = json!({
            "city": "Paris",
            "country": "FR",
            "temperature": 20,
            "description": "Clear",
            "humidity": 50,
            "wind_speed": 10
        });
        assert_eq!(
            assistant_text(&reply),
            "Weather in Paris, FR: 20°C, Clear. Humidity: 50%, Wind: 10 km/h"
        );
    }

    #[test]
    fn test_response_used_verbatim() {
        let reply = json!({ "response": "It is raining in Oslo.", "city": "Oslo" });
        assert_eq!(assistant_text(&reply), "It is raining in Oslo.");
    }

    #[test]
    fn test_empty_response_falls_through() {
        let reply = json!({ "response": "", "city": "Rome", "country": "IT" });
        assert!(assistant_text(&reply).starts_with("Weather in Rome, IT: n/a°C"));
    }

    #[test]
    fn test_unknown_shape_is_raw_json() {
        assert_eq!(assistant_text(&json!({ "foo": 1 })), r#"{"foo":1}"#);
        assert_eq!(assistant_text(&json!("plain")), r#""plain""#);
        assert_eq!(assistant_text(&json!(null)), "null");
    }

    #[test]
    fn test_structured_response_shown_as_json() {
        let reply = json!({ "response": { "temperature": 3 } });
        assert_eq!(assistant_text(&reply), r#"{"temperature":3}"#);
    }

    #[test]
    fn test_city_command() {
        assert_eq!(city_command("/weather Paris"), Some("Paris".to_string()));
        assert_eq!(
            city_command("  /weather   New York "),
            Some("New York".to_string())
        );
        assert_eq!(city_command("/weather"), None);
        assert_eq!(city_command("/weather   "), None);
        assert_eq!(city_command("/weatherman"), None);
        assert_eq!(city_command("weather in Paris?"), None);
    }

    #[test]
    fn test_city_sentence_formats_whole_floats() {
        let reply = json!({
            "city": "Madrid",
            "country": null,
            "temperature": 20.0,
            "description": "Sunny",
            "humidity": 35.0,
            "wind_speed": 7.5
        });
        assert_eq!(
            assistant_text(&reply),
            "Weather in Madrid, null: 20°C, Sunny. Humidity: 35%, Wind: 7.5 km/h"
        );
    }
}

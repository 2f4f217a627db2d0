//! Response normalization for the ask page
//!
//! The agent has answered in three conventions: a bare string, a
//! `{"response": ...}` wrapper (whose payload may itself be JSON text), and
//! an object carrying the weather fields directly. [`normalize`] folds all
//! of them into a [`WeatherReport`] and never fails.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Weather fields the ask page knows how to render.
///
/// Values are kept as raw JSON: nothing is coerced, so a `temperature` sent
/// as a string is shown as that string.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<Value>,
    #[serde(rename = "windSpeed", default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
}

impl WeatherReport {
    /// Recognized fields of a JSON object. An explicit `null` is kept, so it
    /// overwrites an earlier value on merge.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let field = |key: &str| object.get(key).cloned();
        Self {
            temperature: field("temperature"),
            condition: field("condition"),
            humidity: field("humidity"),
            wind_speed: field("windSpeed"),
            visibility: field("visibility"),
            description: field("description"),
        }
    }

    /// Copy every field set on `other` over this report.
    pub fn merge(&mut self, other: WeatherReport) {
        self.temperature = other.temperature.or(self.temperature.take());
        self.condition = other.condition.or(self.condition.take());
        self.humidity = other.humidity.or(self.humidity.take());
        self.wind_speed = other.wind_speed.or(self.wind_speed.take());
        self.visibility = other.visibility.or(self.visibility.take());
        self.description = other.description.or(self.description.take());
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Empty or `null` text counts as missing so the heading falls back.
    pub fn condition_text(&self) -> Option<String> {
        self.condition
            .as_ref()
            .map(field_text)
            .filter(|text| !text.is_empty())
    }

    pub fn description_text(&self) -> Option<String> {
        self.description
            .as_ref()
            .map(field_text)
            .filter(|text| !text.is_empty())
    }

    /// Plain-text rendering used by headless mode
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.condition_text()
                .unwrap_or_else(|| "Weather Update".to_string()),
            self.description_text()
                .unwrap_or_else(|| "Current conditions".to_string()),
        ];
        let details = [
            ("Temperature", &self.temperature, "°"),
            ("Humidity", &self.humidity, "%"),
            ("Wind Speed", &self.wind_speed, " km/h"),
            ("Visibility", &self.visibility, " km"),
        ];
        for (label, value, unit) in details {
            if let Some(value) = value {
                lines.push(format!("{label}: {}{unit}", field_text(value)));
            }
        }
        lines
    }
}

/// Text for a raw JSON value: strings unquoted, whole floats without the
/// trailing `.0`, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_f64() {
            Some(n) if number.is_f64() && n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", n as i64)
            }
            _ => number.to_string(),
        },
        other => other.to_string(),
    }
}

/// Text for a report field; `null` renders as nothing.
pub fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => display_value(other),
    }
}

/// The shapes an agent reply can take, tried in declaration order
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AgentReply {
    Text(String),
    List(Vec<Value>),
    Wrapped(WrappedReply),
    Fields(Map<String, Value>),
    Opaque(Value),
}

#[derive(Debug, Deserialize)]
struct WrappedReply {
    response: Value,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl AgentReply {
    fn decode(reply: &Value) -> Self {
        AgentReply::deserialize(reply).unwrap_or_else(|_| AgentReply::Opaque(reply.clone()))
    }
}

/// Fold an agent reply into a [`WeatherReport`].
///
/// Wrapped payloads are merged first and top-level fields after, so a field
/// present in both places takes the top-level value.
pub fn normalize(reply: &Value) -> WeatherReport {
    match AgentReply::decode(reply) {
        AgentReply::Text(text) => report_from_text(text),
        AgentReply::Wrapped(WrappedReply { response, rest }) => {
            let mut report = match response {
                Value::String(text) => report_from_text(text),
                Value::Object(object) => WeatherReport::from_object(&object),
                _ => WeatherReport::default(),
            };
            report.merge(WeatherReport::from_object(&rest));
            report
        }
        AgentReply::Fields(object) => WeatherReport::from_object(&object),
        AgentReply::List(_) | AgentReply::Opaque(_) => WeatherReport::default(),
    }
}

/// The text is the description; if it is itself a JSON object its fields
/// are layered on top.
fn report_from_text(text: String) -> WeatherReport {
    let nested = serde_json::from_str::<Map<String, Value>>(&text).ok();
    let mut report = WeatherReport {
        description: Some(Value::String(text)),
        ..Default::default()
    };
    if let Some(object) = nested {
        report.merge(WeatherReport::from_object(&object));
    }
    report
}

//! Effects - side effects declared by the reducer

use crate::client::Question;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask page question
    AskAgent { question: Question },
    /// Chat message forwarded to the agent
    SendChat { question: Question },
    /// Chat `/weather <city>` lookup
    FetchCityWeather { city: String },
}

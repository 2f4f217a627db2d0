//! Store, component and render flows using EffectStoreTestHarness

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use tui_dispatch::testing::*;
use tui_dispatch::{DataResource, EventKind};
use weather_agent::{
    action::Action,
    components::{AgentDisplay, AgentDisplayProps, Component},
    effect::Effect,
    normalize::WeatherReport,
    reducer::reducer,
    state::{AppState, AskState, View},
};

fn press(code: KeyCode, modifiers: KeyModifiers) -> EventKind {
    EventKind::Key(KeyEvent::new(code, modifiers))
}

fn state_with_question(text: &str) -> AppState {
    let mut state = AppState::default();
    state.ask.input = text.into();
    state
}

// ============================================================================
// Ask flows
// ============================================================================

#[test]
fn test_ask_flow_with_harness() {
    let mut harness =
        EffectStoreTestHarness::new(state_with_question("Weather in Paris?"), reducer);

    harness.dispatch_collect(Action::AskSubmit);
    harness.assert_state(|s| s.ask.report.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::AskAgent { .. }));

    harness.complete_action(Action::AskDidLoad(json!({
        "response": "Sunny and 22°C",
        "temperature": 22,
        "condition": "Sunny",
    })));
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 1);
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.ask.report.is_loaded());
    harness.assert_state(|s| s.ask.input.is_empty());
    harness.assert_state(|s| {
        s.ask.report.data().and_then(WeatherReport::condition_text) == Some("Sunny".into())
    });
}

#[test]
fn test_ask_server_error_keeps_question() {
    let mut harness =
        EffectStoreTestHarness::new(state_with_question("Weather in Paris?"), reducer);

    harness.dispatch_collect(Action::AskSubmit);
    harness.drain_effects();

    harness.complete_action(Action::AskDidError("API error: 500".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.ask.report.is_failed());
    harness.assert_state(|s| s.ask.report.error() == Some("API error: 500"));
    harness.assert_state(|s| s.ask.input == "Weather in Paris?");
}

#[test]
fn test_server_error_clears_previous_result() {
    let state = AppState {
        ask: AskState {
            input: "And tomorrow in Rome?".into(),
            report: DataResource::Loaded(WeatherReport {
                condition: Some(json!("Sunny")),
                ..Default::default()
            }),
        },
        ..Default::default()
    };
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::AskSubmit);
    harness.assert_state(|s| s.ask.report.is_loading());
    harness.assert_state(|s| s.ask.report.data().is_none());

    harness.complete_action(Action::AskDidError("API error: 500".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.ask.report.data().is_none());
    harness.assert_state(|s| s.ask.report.error() == Some("API error: 500"));
    harness.assert_state(|s| s.ask.input == "And tomorrow in Rome?");
}

#[test]
fn test_submit_ignored_while_loading() {
    let mut harness =
        EffectStoreTestHarness::new(state_with_question("Weather in Paris?"), reducer);

    harness.dispatch_collect(Action::AskSubmit);
    harness.dispatch_collect(Action::AskSubmit);

    let effects = harness.drain_effects();
    effects.effects_count(1);
}

#[test]
fn test_reset_returns_to_empty() {
    let state = AppState {
        ask: AskState {
            report: DataResource::Loaded(WeatherReport::default()),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::AskReset);
    harness.assert_state(|s| s.ask.report.is_empty());
    harness.drain_effects().effects_empty();
}

// ============================================================================
// Chat flows
// ============================================================================

#[test]
fn test_chat_failure_keeps_user_message() {
    let mut state = AppState::new(View::Chat);
    state.chat.input = "hello".into();
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::ChatSend);
    harness.assert_state(|s| s.chat.awaiting_reply);
    harness.assert_state(|s| s.chat.input.is_empty());

    harness.complete_action(Action::ChatDidError("API error: 503".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.chat.messages.len() == 1);
    harness.assert_state(|s| s.chat.messages[0].content == "hello");
    harness.assert_state(|s| s.chat.error.as_deref() == Some("API error: 503"));
    harness.assert_state(|s| !s.chat.awaiting_reply);
}

#[test]
fn test_chat_city_reply_is_summarized() {
    let mut state = AppState::new(View::Chat);
    state.chat.input = "/weather Oslo".into();
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::ChatSend);
    harness.drain_effects().effects_first_matches(
        |e| matches!(e, Effect::FetchCityWeather { city } if city == "Oslo"),
    );

    harness.complete_action(Action::ChatDidReply(json!({
        "city": "Oslo",
        "country": "NO",
        "temperature": -3,
        "description": "light snow",
        "humidity": 80,
        "wind_speed": 4,
    })));
    harness.process_emitted();

    harness.assert_state(|s| {
        s.chat.messages.last().map(|m| m.content.as_str())
            == Some("Weather in Oslo, NO: -3°C, light snow. Humidity: 80%, Wind: 4 km/h")
    });
}

// ============================================================================
// Component + Store Integration
// ============================================================================

#[test]
fn test_enter_key_submits_through_component() {
    let state = state_with_question("Will it rain?");
    let mut harness = EffectStoreTestHarness::new(state.clone(), reducer);
    let mut component = AgentDisplay::new();

    let actions: Vec<Action> = component
        .handle_event(
            &press(KeyCode::Enter, KeyModifiers::NONE),
            AgentDisplayProps {
                state: &state,
                is_focused: true,
            },
        )
        .into_iter()
        .collect();
    actions.assert_first(Action::AskSubmit);

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.ask.report.is_loading());
}

#[test]
fn test_tab_then_render_chat() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = AgentDisplay::new();

    harness.dispatch_collect(Action::UiSwitchView);
    harness.assert_state(|s| s.view == View::Chat);

    let output = harness.render_plain(80, 24, |frame, area, state| {
        let props = AgentDisplayProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(
        output.contains("Start a conversation..."),
        "Chat placeholder should be visible:\n{}",
        output
    );
}

#[test]
fn test_render_ask_error() {
    let mut harness =
        EffectStoreTestHarness::new(state_with_question("Weather in Paris?"), reducer);
    let mut component = AgentDisplay::new();

    harness.dispatch_collect(Action::AskSubmit);
    harness.dispatch_collect(Action::AskDidError("API error: 500".into()));

    let output = harness.render_plain(80, 30, |frame, area, state| {
        let props = AgentDisplayProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(
        output.contains("API error: 500"),
        "Error should be visible:\n{}",
        output
    );
    assert!(!output.contains("get started"));
}

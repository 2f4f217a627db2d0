//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::chat::{assistant_text, city_command};
use crate::client::Question;
use crate::effect::Effect;
use crate::normalize::normalize;
use crate::state::{AppState, ChatMessage, LOADING_ANIM_CYCLE_TICKS};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Ask actions =====
        Action::AskInputChange(text) => {
            if state.ask.input == text {
                return DispatchResult::unchanged();
            }
            state.ask.input = text;
            DispatchResult::changed()
        }

        Action::AskSubmit => {
            if state.ask.is_submitting() {
                return DispatchResult::unchanged();
            }
            let Ok(question) = Question::parse(&state.ask.input) else {
                return DispatchResult::unchanged();
            };
            state.ask.report = DataResource::Loading;
            restart_loading_anim(state);
            DispatchResult::changed_with(Effect::AskAgent { question })
        }

        Action::AskDidLoad(reply) => {
            state.ask.report = DataResource::Loaded(normalize(&reply));
            state.ask.input.clear();
            finish_loading_anim(state);
            DispatchResult::changed()
        }

        Action::AskDidError(msg) => {
            state.ask.report = DataResource::Failed(msg);
            finish_loading_anim(state);
            DispatchResult::changed()
        }

        Action::AskReset => {
            if state.ask.report.is_loaded() || state.ask.report.is_failed() {
                state.ask.report = DataResource::Empty;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Chat actions =====
        Action::ChatInputChange(text) => {
            if state.chat.input == text {
                return DispatchResult::unchanged();
            }
            state.chat.input = text;
            DispatchResult::changed()
        }

        Action::ChatSend => {
            if state.chat.awaiting_reply {
                return DispatchResult::unchanged();
            }
            let Ok(question) = Question::parse(&state.chat.input) else {
                return DispatchResult::unchanged();
            };
            let typed = std::mem::take(&mut state.chat.input);
            state.chat.push(ChatMessage::user(typed));
            state.chat.awaiting_reply = true;
            state.chat.error = None;
            restart_loading_anim(state);

            let effect = match city_command(question.as_str()) {
                Some(city) => Effect::FetchCityWeather { city },
                None => Effect::SendChat { question },
            };
            DispatchResult::changed_with(effect)
        }

        Action::ChatDidReply(reply) => {
            state.chat.push(ChatMessage::assistant(assistant_text(&reply)));
            state.chat.awaiting_reply = false;
            finish_loading_anim(state);
            DispatchResult::changed()
        }

        Action::ChatDidError(msg) => {
            state.chat.error = Some(msg);
            state.chat.awaiting_reply = false;
            finish_loading_anim(state);
            DispatchResult::changed()
        }

        Action::ChatScroll(delta) => {
            let current = i32::from(state.chat.scroll);
            let next = (current + i32::from(delta)).clamp(0, i32::from(u16::MAX)) as u16;
            if next == state.chat.scroll {
                return DispatchResult::unchanged();
            }
            state.chat.scroll = next;
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiSwitchView => {
            state.view = state.view.toggle();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.loading_anim_active() {
                state.tick_count = state.tick_count.wrapping_add(1);
                if state.loading_anim_ticks_remaining > 0 {
                    state.loading_anim_ticks_remaining -= 1;
                }
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn restart_loading_anim(state: &mut AppState) {
    state.tick_count = 0;
    state.loading_anim_ticks_remaining = 0;
}

/// Let the gradient run to the end of its cycle once nothing is loading.
fn finish_loading_anim(state: &mut AppState) {
    if !state.is_busy() {
        state.loading_anim_ticks_remaining = ticks_to_phase_zero(state.tick_count);
    }
}

fn ticks_to_phase_zero(tick_count: u32) -> u32 {
    let cycle = LOADING_ANIM_CYCLE_TICKS.max(1);
    if tick_count == 0 {
        return cycle;
    }
    let remainder = tick_count % cycle;
    if remainder == 0 { 0 } else { cycle - remainder }
}

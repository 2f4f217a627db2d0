//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::normalize::WeatherReport;

/// Which surface is on screen
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Ask,
    Chat,
}

impl View {
    pub fn toggle(&self) -> Self {
        match self {
            View::Ask => View::Chat,
            View::Chat => View::Ask,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Ask => "ask",
            View::Chat => "chat",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. Never edited once appended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Single-question page
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AskState {
    pub input: String,
    /// Empty → Loading → Loaded/Failed; reset goes back to Empty
    pub report: DataResource<WeatherReport>,
}

impl AskState {
    pub fn is_submitting(&self) -> bool {
        self.report.is_loading()
    }
}

impl Default for AskState {
    fn default() -> Self {
        Self {
            input: String::new(),
            report: DataResource::Empty,
        }
    }
}

/// Running conversation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ChatState {
    pub input: String,
    pub messages: Vec<ChatMessage>,
    pub awaiting_reply: bool,
    /// Last failure, shown below the transcript until the next send
    pub error: Option<String>,
    /// Lines scrolled up from the newest entry
    pub scroll: u16,
}

impl ChatState {
    /// Append to the transcript and follow it to the bottom.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.scroll = 0;
    }
}

/// Animation timing for the banner gradient seam.
pub const LOADING_ANIM_TICK_MS: u64 = 20;
pub const LOADING_ANIM_CYCLE_TICKS: u32 = 48;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "App", label = "View", debug_fmt)]
    pub view: View,

    #[debug(section = "Ask", label = "Page", debug_fmt)]
    pub ask: AskState,

    #[debug(section = "Chat", label = "Widget", debug_fmt)]
    pub chat: ChatState,

    // --- Animation internals (skipped) ---
    /// Animation frame counter (banner gradient, thinking dots)
    #[debug(skip)]
    pub tick_count: u32,

    /// Remaining ticks to finish the current animation cycle after loading
    #[debug(skip)]
    pub loading_anim_ticks_remaining: u32,
}

impl AppState {
    pub fn new(view: View) -> Self {
        Self {
            view,
            ..Default::default()
        }
    }

    pub fn is_busy(&self) -> bool {
        self.ask.is_submitting() || self.chat.awaiting_reply
    }

    pub fn loading_anim_active(&self) -> bool {
        self.is_busy() || self.loading_anim_ticks_remaining > 0
    }
}

//! Actions for both views

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Ask category =====
    /// Question text edited
    AskInputChange(String),

    /// Intent: send the current question (triggers async task)
    AskSubmit,

    /// Result: raw agent reply, normalized by the reducer
    AskDidLoad(Value),

    /// Result: request failed with a displayable message
    AskDidError(String),

    /// Drop the shown result and go back to the empty page
    AskReset,

    // ===== Chat category =====
    /// Message text edited
    ChatInputChange(String),

    /// Intent: append the message and ask the agent
    ChatSend,

    /// Result: raw agent reply for the pending message
    ChatDidReply(Value),

    /// Result: pending message failed
    ChatDidError(String),

    /// Scroll the transcript; positive moves toward older entries
    ChatScroll(i16),

    // ===== UI category =====
    /// Switch between the ask page and the chat view
    UiSwitchView,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for loading animation
    Tick,

    /// Exit the application
    Quit,
}

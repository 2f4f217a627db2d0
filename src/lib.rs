//! Weather Agent TUI
//!
//! Ask a weather agent questions from the terminal, either one at a time on
//! the ask page or as a running conversation in the chat view.

pub mod action;
pub mod chat;
pub mod client;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod reducer;
pub mod state;

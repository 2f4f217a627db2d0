use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;

/// Single-line text field; ignores keys while disabled
pub struct PromptInput {
    input: TextInput,
    had_text: bool,
}

pub struct PromptInputProps<'a> {
    pub value: &'a str,
    pub placeholder: &'a str,
    pub is_focused: bool,
    pub enabled: bool,
    // Action constructors
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl Default for PromptInput {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            had_text: false,
        }
    }
}

impl PromptInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over with a fresh cursor when the value was cleared from outside.
    fn sync(&mut self, value: &str) {
        if value.is_empty() && self.had_text {
            self.input = TextInput::new();
        }
        self.had_text = !value.is_empty();
    }

    fn style(enabled: bool) -> TextInputStyle {
        let fg = if enabled {
            Color::Rgb(232, 232, 232)
        } else {
            Color::DarkGray
        };
        TextInputStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::new(1, 0, 1, 0),
                bg: Some(Color::Rgb(40, 44, 52)),
                fg: Some(fg),
            },
            placeholder_style: Some(Style::default().fg(Color::Rgb(120, 120, 130))),
            cursor_style: None,
        }
    }
}

fn render_on_cursor_move(_: usize) -> Action {
    Action::Render
}

impl Component<Action> for PromptInput {
    type Props<'a> = PromptInputProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || !props.enabled {
            return Vec::new();
        }
        self.sync(props.value);
        let text_props = TextInputProps {
            value: props.value,
            placeholder: props.placeholder,
            is_focused: true,
            style: Self::style(true),
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(render_on_cursor_move),
        };
        self.input
            .handle_event(event, text_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.sync(props.value);
        let text_props = TextInputProps {
            value: props.value,
            placeholder: props.placeholder,
            is_focused: props.is_focused && props.enabled,
            style: Self::style(props.enabled),
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(render_on_cursor_move),
        };
        self.input.render(frame, area, text_props);
    }
}

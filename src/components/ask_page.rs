use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::{DataResource, EventKind};

use super::banner::BANNER_OVERHEAD;
use super::{
    Banner, BannerProps, Button, Card, Component, PromptInput, PromptInputProps, ReportCard,
    ReportCardProps, Tone,
};
use crate::action::Action;
use crate::state::AppState;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Widest the page content grows on large terminals
const MAX_WIDTH: u16 = 84;

/// Single-question page: banner, question field, result card
pub struct AskPage {
    input: PromptInput,
}

pub struct AskPageProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl Default for AskPage {
    fn default() -> Self {
        Self {
            input: PromptInput::new(),
        }
    }
}

impl AskPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn input_props<'a>(state: &'a AppState, is_focused: bool) -> PromptInputProps<'a> {
        PromptInputProps {
            value: &state.ask.input,
            placeholder: "What's the weather like today?",
            is_focused,
            enabled: !state.ask.is_submitting(),
            on_change: Action::AskInputChange,
            on_submit: submit_question,
        }
    }
}

fn submit_question(_: String) -> Action {
    Action::AskSubmit
}

impl Component<Action> for AskPage {
    type Props<'a> = AskPageProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        let submitting = props.state.ask.is_submitting();
        match key.code {
            KeyCode::Enter if submitting => return Vec::new(),
            KeyCode::Enter => return vec![Action::AskSubmit],
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::AskReset];
            }
            _ => {}
        }

        let input_props = Self::input_props(props.state, true);
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [area] = Layout::horizontal([Constraint::Max(MAX_WIDTH)])
            .flex(Flex::Center)
            .areas(area);
        let state = props.state;
        let ask = &state.ask;

        let error_rows = if matches!(ask.report, DataResource::Failed(_)) { 3 } else { 0 };
        let chunks = Layout::vertical([
            Constraint::Max(6 + BANNER_OVERHEAD), // Banner
            Constraint::Length(1),
            Constraint::Length(3), // Question card
            Constraint::Length(1),
            Constraint::Length(error_rows), // Error card
            Constraint::Min(0),             // Result / empty state
        ])
        .split(area);

        let mut banner = Banner;
        banner.render(
            frame,
            chunks[0],
            BannerProps {
                title: "Weather Agent",
                tagline: "Ask me anything about the weather",
                is_animating: state.loading_anim_active(),
                tick_count: state.tick_count,
            },
        );

        // Question field + button
        let inner = Card::new().padded().render(frame, chunks[2]);
        let button = Button::new(if ask.is_submitting() { "Loading..." } else { "Ask" })
            .enabled(!ask.is_submitting());
        let [field, _, button_area] = Layout::horizontal([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(button.width()),
        ])
        .areas(inner);
        self.input
            .render(frame, field, Self::input_props(state, props.is_focused));
        frame.render_widget(button, button_area);

        match &ask.report {
            DataResource::Failed(error) => {
                let inner = Card::new().tone(Tone::Danger).padded().render(frame, chunks[4]);
                let line = Line::from(vec![
                    Span::raw(ERROR_ICON),
                    Span::raw(" "),
                    Span::styled(error.to_string(), Style::default().fg(Color::Rgb(230, 130, 130))),
                ]);
                frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), inner);
            }
            DataResource::Loaded(report) => {
                let [card_area, _, footer] = Layout::vertical([
                    Constraint::Length(ReportCard::height()),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .areas(chunks[5]);
                let mut card = ReportCard;
                card.render(frame, card_area, ReportCardProps { report });

                let hint = Line::from(vec![
                    Span::styled("Want to know more? Press ", Style::default().fg(Color::DarkGray)),
                    Span::styled("ctrl+r", Style::default().fg(Color::Cyan).bold()),
                    Span::styled(
                        " to ask another question",
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
                .centered();
                frame.render_widget(Paragraph::new(hint), footer);
            }
            DataResource::Empty => {
                let [_, line_area] =
                    Layout::vertical([Constraint::Length(2), Constraint::Length(1)])
                        .areas(chunks[5]);
                let empty = Line::from(vec![Span::styled(
                    "Ask a weather question to get started",
                    Style::default().fg(Color::DarkGray),
                )])
                .centered();
                frame.render_widget(Paragraph::new(empty), line_area);
            }
            DataResource::Loading => {}
        }
    }
}

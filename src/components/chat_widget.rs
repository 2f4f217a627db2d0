use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, LinesScroller, Padding, ScrollView, ScrollViewBehavior, ScrollViewProps,
    ScrollViewStyle,
};

use super::{Button, Card, Component, PromptInput, PromptInputProps};
use crate::action::Action;
use crate::state::{ChatState, Role};

const USER_COLOR: Color = Color::Rgb(90, 170, 230);
const AGENT_COLOR: Color = Color::Rgb(200, 200, 210);
const ERROR_COLOR: Color = Color::Rgb(230, 130, 130);
const DIM: Color = Color::Rgb(120, 120, 130);

/// Conversation view: scrolling transcript above a message field
pub struct ChatWidget {
    transcript: ScrollView,
    input: PromptInput,
    /// Furthest the transcript could scroll up at the last render
    max_scroll: u16,
}

pub struct ChatWidgetProps<'a> {
    pub chat: &'a ChatState,
    pub tick_count: u32,
    pub is_focused: bool,
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self {
            transcript: ScrollView::new(),
            input: PromptInput::new(),
            max_scroll: 0,
        }
    }
}

impl ChatWidget {
    pub fn new() -> Self {
        Self::default()
    }

    fn input_props<'a>(chat: &'a ChatState, is_focused: bool) -> PromptInputProps<'a> {
        PromptInputProps {
            value: &chat.input,
            placeholder: "Type a message...",
            is_focused,
            enabled: !chat.awaiting_reply,
            on_change: Action::ChatInputChange,
            on_submit: send_message,
        }
    }

    /// Scroll action that keeps the offset within the rendered transcript.
    fn scroll_by(&self, current: u16, step: i16) -> Option<Action> {
        let current = i32::from(current);
        let target = (current + i32::from(step)).clamp(0, i32::from(self.max_scroll));
        let delta = target - current;
        if delta == 0 {
            return None;
        }
        let delta = delta.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;
        Some(Action::ChatScroll(delta))
    }
}

fn send_message(_: String) -> Action {
    Action::ChatSend
}

fn scroll_transcript_to(_: usize) -> Action {
    Action::Render
}

fn scroll_step(code: KeyCode) -> Option<i16> {
    match code {
        KeyCode::Up => Some(1),
        KeyCode::Down => Some(-1),
        KeyCode::PageUp => Some(5),
        KeyCode::PageDown => Some(-5),
        KeyCode::Home => Some(i16::MAX),
        KeyCode::End => Some(i16::MIN),
        _ => None,
    }
}

impl Component<Action> for ChatWidget {
    type Props<'a> = ChatWidgetProps<'a>;

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
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }

        if let Some(step) = scroll_step(key.code) {
            return self.scroll_by(props.chat.scroll, step).into_iter().collect();
        }
        if key.code == KeyCode::Enter {
            let chat = props.chat;
            if chat.awaiting_reply || chat.input.trim().is_empty() {
                return Vec::new();
            }
            return vec![Action::ChatSend];
        }

        let input_props = Self::input_props(props.chat, true);
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chat = props.chat;
        let inner = Card::new().title("Weather Agent Chat").render(frame, area);

        let [log_area, divider, input_row] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let lines = transcript_lines(chat, props.tick_count, log_area.width.saturating_sub(2));
        let view_height = log_area.height as usize;
        let max_start = lines.len().saturating_sub(view_height);
        let scroll_offset = max_start.saturating_sub(chat.scroll as usize);
        self.max_scroll = u16::try_from(max_start).unwrap_or(u16::MAX);

        let scroller = LinesScroller::new(&lines);
        let mut render_content = scroller.renderer();
        self.transcript.render(
            frame,
            log_area,
            ScrollViewProps {
                content_height: scroller.content_height(),
                scroll_offset,
                is_focused: props.is_focused,
                style: ScrollViewStyle {
                    base: BaseStyle {
                        border: None,
                        padding: Padding::new(1, 0, 1, 0),
                        bg: None,
                        fg: None,
                    },
                    scrollbar: Default::default(),
                },
                behavior: ScrollViewBehavior {
                    show_scrollbar: true,
                    scroll_step: 1,
                    page_step: 0,
                },
                on_scroll: scroll_transcript_to,
                render_content: &mut render_content,
            },
        );

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "─".repeat(divider.width as usize),
                Style::default().fg(Color::DarkGray),
            ))),
            divider,
        );

        let can_send = !chat.awaiting_reply && !chat.input.trim().is_empty();
        let button = Button::new("Send").enabled(can_send);
        let [field, _, button_area] = Layout::horizontal([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(button.width()),
        ])
        .areas(input_row);
        self.input
            .render(frame, field, Self::input_props(chat, props.is_focused));
        frame.render_widget(button, button_area);
    }
}

/// Wrapped transcript, including the pending and error lines.
fn transcript_lines(chat: &ChatState, tick_count: u32, width: u16) -> Vec<Line<'static>> {
    let width = width as usize;
    let mut lines: Vec<Line<'static>> = Vec::new();

    if chat.messages.is_empty() && !chat.awaiting_reply && chat.error.is_none() {
        lines.push(Line::from(Span::styled(
            "Start a conversation...",
            Style::default().fg(DIM),
        )));
        return lines;
    }

    for message in &chat.messages {
        let (label, color) = match message.role {
            Role::User => ("You", USER_COLOR),
            Role::Assistant => ("Agent", AGENT_COLOR),
        };
        push_labeled(&mut lines, label, color, &message.content, width);
        lines.push(Line::default());
    }

    if chat.awaiting_reply {
        let dots = ".".repeat((tick_count / 8 % 3) as usize + 1);
        lines.push(Line::from(Span::styled(
            format!("Thinking{dots}"),
            Style::default().fg(DIM).add_modifier(Modifier::ITALIC),
        )));
    }
    if let Some(error) = &chat.error {
        push_labeled(&mut lines, "Error:", ERROR_COLOR, error, width);
    }
    lines
}

fn push_labeled(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    color: Color,
    text: &str,
    width: usize,
) {
    let prefix_width = label.chars().count() + 1;
    let wrap_width = width.saturating_sub(prefix_width).max(1);
    for (idx, chunk) in wrap_text(text, wrap_width).into_iter().enumerate() {
        let lead = if idx == 0 {
            Span::styled(
                format!("{label} "),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw(" ".repeat(prefix_width))
        };
        lines.push(Line::from(vec![lead, Span::styled(chunk, Style::default().fg(color))]));
    }
}

fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for raw in text.lines() {
        if raw.trim().is_empty() {
            out.push(String::new());
            continue;
        }
        let mut line = String::new();
        for word in raw.split_whitespace() {
            let word_len = word.chars().count();
            if line.is_empty() {
                if word_len <= width {
                    line.push_str(word);
                } else {
                    out.extend(chunk_word(word, width));
                }
            } else if line.chars().count() + 1 + word_len <= width {
                line.push(' ');
                line.push_str(word);
            } else {
                out.push(std::mem::take(&mut line));
                if word_len <= width {
                    line.push_str(word);
                } else {
                    out.extend(chunk_word(word, width));
                }
            }
        }
        if !line.is_empty() {
            out.push(line);
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

fn chunk_word(word: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

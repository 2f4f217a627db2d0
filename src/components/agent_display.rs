use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{AskPage, AskPageProps, ChatWidget, ChatWidgetProps, Component};
use crate::action::Action;
use crate::state::{AppState, View};

/// Props for AgentDisplay - read-only view of state
pub struct AgentDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Top-level component: the active view plus the key hint bar
#[derive(Default)]
pub struct AgentDisplay {
    ask: AskPage,
    chat: ChatWidget,
}

impl AgentDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for AgentDisplay {
    type Props<'a> = AgentDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Tab | KeyCode::BackTab => return vec![Action::UiSwitchView],
                KeyCode::Esc => return vec![Action::Quit],
                KeyCode::Char('c') if ctrl => return vec![Action::Quit],
                _ => {}
            }
        }

        let state = props.state;
        match state.view {
            View::Ask => self
                .ask
                .handle_event(
                    event,
                    AskPageProps {
                        state,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect(),
            View::Chat => self
                .chat
                .handle_event(
                    event,
                    ChatWidgetProps {
                        chat: &state.chat,
                        tick_count: state.tick_count,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: AgentDisplayProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Active view
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let state = props.state;
        match state.view {
            View::Ask => self.ask.render(
                frame,
                chunks[0],
                AskPageProps {
                    state,
                    is_focused: props.is_focused,
                },
            ),
            View::Chat => self.chat.render(
                frame,
                chunks[0],
                ChatWidgetProps {
                    chat: &state.chat,
                    tick_count: state.tick_count,
                    is_focused: props.is_focused,
                },
            ),
        }

        let other = state.view.toggle().label();
        let hints = match state.view {
            View::Ask => vec![
                StatusBarHint::new("enter", "ask"),
                StatusBarHint::new("ctrl+r", "reset"),
                StatusBarHint::new("tab", other),
                StatusBarHint::new("esc", "quit"),
            ],
            View::Chat => vec![
                StatusBarHint::new("enter", "send"),
                StatusBarHint::new("↑↓", "scroll"),
                StatusBarHint::new("tab", other),
                StatusBarHint::new("esc", "quit"),
            ],
        };

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

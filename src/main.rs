//! Weather Agent TUI

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_agent::action::Action;
use weather_agent::client::{AgentClient, Question};
use weather_agent::components::{AgentDisplay, AgentDisplayProps, Component};
use weather_agent::config::{AgentConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use weather_agent::effect::Effect;
use weather_agent::logging;
use weather_agent::normalize::normalize;
use weather_agent::reducer::reducer;
use weather_agent::state::{AppState, LOADING_ANIM_TICK_MS, View};

/// Weather Agent - ask a weather agent from the terminal
#[derive(Parser, Debug)]
#[command(name = "weather-agent")]
#[command(about = "Ask a natural-language weather agent from the terminal")]
struct Args {
    /// Base URL of the agent backend
    #[arg(long, env = "WEATHER_AGENT_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds (minimum 1)
    #[arg(long, short, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// View shown at startup
    #[arg(long, value_enum, default_value_t = View::Ask)]
    view: View,

    /// Ask one question, print the answer and exit
    #[arg(long, value_name = "QUESTION")]
    ask: Option<String>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum AgentComponentId {
    Ask,
    Chat,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum AgentContext {
    Ask,
    Chat,
}

impl EventRoutingState<AgentComponentId, AgentContext> for AppState {
    fn focused(&self) -> Option<AgentComponentId> {
        match self.view {
            View::Ask => Some(AgentComponentId::Ask),
            View::Chat => Some(AgentComponentId::Chat),
        }
    }

    fn modal(&self) -> Option<AgentComponentId> {
        None
    }

    fn binding_context(&self, id: AgentComponentId) -> AgentContext {
        match id {
            AgentComponentId::Ask => AgentContext::Ask,
            AgentComponentId::Chat => AgentContext::Chat,
        }
    }

    fn default_context(&self) -> AgentContext {
        AgentContext::Ask
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        base_url,
        timeout,
        view,
        ask,
        log_file,
        debug: debug_args,
    } = Args::parse();

    logging::init(log_file.as_deref())?;

    let config = AgentConfig::new(base_url, Duration::from_secs(timeout));
    let client = AgentClient::new(config).map_err(io::Error::other)?;
    tracing::info!(base_url = %client.config().base_url, "agent client ready");

    if let Some(question) = ask {
        return ask_once(&client, &question).await;
    }

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(view))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, client, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

/// Headless mode: one question, normalized answer on stdout.
async fn ask_once(client: &AgentClient, text: &str) -> io::Result<()> {
    let Ok(question) = Question::parse(text) else {
        eprintln!("Error: the question is empty.");
        std::process::exit(2);
    };

    match client.ask(&question).await {
        Ok(reply) => {
            for line in normalize(&reply).summary_lines() {
                println!("{line}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: could not reach the weather agent at {}.", client.config().base_url);
            eprintln!("Details: {}", e);
            std::process::exit(1);
        }
    }
}

struct AgentUi {
    display: AgentDisplay,
}

impl AgentUi {
    fn new() -> Self {
        Self {
            display: AgentDisplay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<AgentComponentId>,
    ) {
        let (active, inactive) = match state.view {
            View::Ask => (AgentComponentId::Ask, AgentComponentId::Chat),
            View::Chat => (AgentComponentId::Chat, AgentComponentId::Ask),
        };
        event_ctx.set_component_area(active, area);
        event_ctx.component_areas.remove(&inactive);

        let props = AgentDisplayProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.display.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = AgentDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: AgentClient,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(AgentUi::new()));
    let mut bus: EventBus<AppState, Action, AgentComponentId, AgentContext> = EventBus::new();
    let keybindings: Keybindings<AgentContext> = Keybindings::new();

    for id in [AgentComponentId::Ask, AgentComponentId::Chat] {
        let ui_handler = Rc::clone(&ui);
        bus.register(id, move |event, state| {
            ui_handler.borrow_mut().handle_event(&event.kind, state)
        });
    }

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Render),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &client),
        )
        .await
}

/// Handle effects by spawning tasks; each view has its own task key.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: &AgentClient) {
    tracing::debug!(?effect, "handling effect");
    match effect {
        Effect::AskAgent { question } => {
            let client = client.clone();
            ctx.tasks().spawn("ask", async move {
                match client.ask(&question).await {
                    Ok(reply) => Action::AskDidLoad(reply),
                    Err(e) => Action::AskDidError(e.to_string()),
                }
            });
        }
        Effect::SendChat { question } => {
            let client = client.clone();
            ctx.tasks().spawn("chat", async move {
                match client.ask(&question).await {
                    Ok(reply) => Action::ChatDidReply(reply),
                    Err(e) => Action::ChatDidError(e.to_string()),
                }
            });
        }
        Effect::FetchCityWeather { city } => {
            let client = client.clone();
            ctx.tasks().spawn("chat", async move {
                match client.city_weather(&city).await {
                    Ok(reply) => Action::ChatDidReply(reply),
                    Err(e) => Action::ChatDidError(e.to_string()),
                }
            });
        }
    }
}

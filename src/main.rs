//! pokebrowse - paged Pokémon browser on tui-dispatch

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pokebrowse::action::Action;
use pokebrowse::api;
use pokebrowse::components::{browser_layout, BrowserView, BrowserViewProps, Component};
use pokebrowse::config::{BrowserConfig, DEFAULT_BASE_URL, DEFAULT_DEBOUNCE_MS};
use pokebrowse::effect::{Effect, FILTER_TASK, PAGE_TASK};
use pokebrowse::logging;
use pokebrowse::reducer::reducer;
use pokebrowse::state::{AppState, ViewPhase};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

const TICK_MS: u64 = 90;

#[derive(Parser, Debug)]
#[command(name = "pokebrowse")]
#[command(about = "Page through the PokeAPI dex from the terminal")]
struct Args {
    /// PokeAPI base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Records per page (server default when omitted)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    page_size: Option<u32>,

    /// Quiet period before a typed search is applied
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    /// Write tracing output to this file (filter with POKEBROWSE_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum BrowserComponentId {
    Browser,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum BrowserContext {
    Main,
    Search,
}

impl EventRoutingState<BrowserComponentId, BrowserContext> for AppState {
    fn focused(&self) -> Option<BrowserComponentId> {
        if self.search.active {
            Some(BrowserComponentId::Search)
        } else {
            Some(BrowserComponentId::Browser)
        }
    }

    fn modal(&self) -> Option<BrowserComponentId> {
        if self.search.active {
            Some(BrowserComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: BrowserComponentId) -> BrowserContext {
        match id {
            BrowserComponentId::Browser => BrowserContext::Main,
            BrowserComponentId::Search => BrowserContext::Search,
        }
    }

    fn default_context(&self) -> BrowserContext {
        BrowserContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        base_url,
        page_size,
        debounce_ms,
        log_file,
        debug: debug_args,
    } = Args::parse();

    if let Some(path) = log_file.as_deref() {
        logging::init(path).map_err(io::Error::other)?;
    }

    let config = BrowserConfig::new(base_url, page_size, debounce_ms);
    tracing::info!(start_url = %config.start_url(), "starting pokebrowse");

    let debug = DebugSession::new(debug_args);
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(config))
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

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
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    tracing::info!("pokebrowse exited");
    Ok(())
}

struct BrowserUi {
    view: BrowserView,
}

impl BrowserUi {
    fn new() -> Self {
        Self {
            view: BrowserView::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<BrowserComponentId>,
    ) {
        event_ctx.set_component_area(BrowserComponentId::Browser, area);
        if state.phase() != ViewPhase::InitialLoading {
            let layout = browser_layout(area, state);
            event_ctx.set_component_area(BrowserComponentId::Search, layout.search);
        }

        let props = BrowserViewProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.view.render(frame, area, props);
    }

    fn handle_browser_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = BrowserViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.view.handle_event(event, props).into_iter().collect();
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

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions = self.view.handle_search_event(event, state);
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
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
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(BrowserUi::new()));
    let mut bus: EventBus<AppState, Action, BrowserComponentId, BrowserContext> = EventBus::new();
    let keybindings: Keybindings<BrowserContext> = Keybindings::new();

    let ui_browser = Rc::clone(&ui);
    bus.register(BrowserComponentId::Browser, move |event, state| {
        ui_browser
            .borrow_mut()
            .handle_browser_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(BrowserComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(TICK_MS), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchPage { request, url } => {
            tracing::debug!(request, %url, "fetching page");
            ctx.tasks().spawn(TaskKey::new(PAGE_TASK), async move {
                match api::fetch_page(api::shared_source(), &url).await {
                    Ok(page) => {
                        tracing::info!(request, records = page.records.len(), "page loaded");
                        Action::PageDidLoad { request, page }
                    }
                    Err(error) => {
                        tracing::error!(request, %url, %error, "page fetch failed");
                        Action::PageDidError {
                            request,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
        Effect::DebounceFilter { revision, delay_ms } => {
            ctx.tasks()
                .debounce(FILTER_TASK, Duration::from_millis(delay_ms), async move {
                    Action::FilterDidFire(revision)
                });
        }
        Effect::CancelFilter => {
            ctx.tasks().cancel(&TaskKey::new(FILTER_TASK));
        }
    }
}

//! skycast - weather TUI

use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use skycast::action::Action;
use skycast::api::{self, GeocodingClient, WeatherClient};
use skycast::components::{
    Component, SearchOverlay, SearchOverlayProps, WeatherDisplay, WeatherDisplayProps, Palette,
};
use skycast::effect::Effect;
use skycast::handler::{Services, handle_effect};
use skycast::location::{Coordinates, LocationHelper};
use skycast::preferences::{self, Preferences};
use skycast::reducer::{reducer, startup_action};
use skycast::state::{AppState, SPINNER_TICK_MS};
use tui_dispatch::{
    EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use tracing_subscriber::EnvFilter;

/// Weather, hourly and daily forecast and air quality for a city or your location
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "Weather, forecast and air quality in the terminal")]
struct Args {
    /// City to show on startup (skips the location lookup)
    #[arg(long, short)]
    city: Option<String>,

    /// City shown when location is not available
    #[arg(long, default_value = "London")]
    default_city: String,

    /// Latitude of this device
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of this device
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Never use the device position
    #[arg(long)]
    deny_location: bool,

    /// Refresh interval in seconds (minimum 1)
    #[arg(long, short, default_value = "600", value_parser = clap::value_parser!(u64).range(1..))]
    refresh_interval: u64,

    /// Open-Meteo forecast base URL
    #[arg(long, default_value = api::OPEN_METEO_URL)]
    weather_url: String,

    /// Open-Meteo air-quality base URL
    #[arg(long, default_value = api::AIR_QUALITY_URL)]
    air_quality_url: String,

    /// Nominatim base URL
    #[arg(long, default_value = api::NOMINATIM_URL)]
    geocoding_url: String,

    /// Directory holding preferences.json
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Log file (the terminal belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum SkycastComponentId {
    Display,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum SkycastContext {
    Main,
    Search,
}

impl EventRoutingState<SkycastComponentId, SkycastContext> for AppState {
    fn focused(&self) -> Option<SkycastComponentId> {
        if self.search_mode {
            Some(SkycastComponentId::Search)
        } else {
            Some(SkycastComponentId::Display)
        }
    }

    fn modal(&self) -> Option<SkycastComponentId> {
        self.search_mode.then_some(SkycastComponentId::Search)
    }

    fn binding_context(&self, id: SkycastComponentId) -> SkycastContext {
        match id {
            SkycastComponentId::Display => SkycastContext::Main,
            SkycastComponentId::Search => SkycastContext::Search,
        }
    }

    fn default_context(&self) -> SkycastContext {
        SkycastContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    init_logging(args.log_file.as_deref())?;

    let debug = DebugSession::new(args.debug);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let preferences_path = preferences::default_path(args.config_dir.as_deref());
    let prefs = preferences::load(&preferences_path).unwrap_or_else(|e| {
        tracing::warn!(path = %preferences_path.display(), error = %e, "ignoring preferences");
        Preferences::default()
    });

    let position = args.lat.zip(args.lon).map(|(lat, lon)| Coordinates { lat, lon });
    let location = LocationHelper::fixed(position, args.deny_location);
    let initial_action = startup_action(
        args.city.as_deref(),
        location.has_permission(),
        &args.default_city,
    );
    tracing::info!(?initial_action, "starting");

    let services = Services {
        weather: WeatherClient::new(args.weather_url, args.air_quality_url),
        geocoding: GeocodingClient::new(args.geocoding_url).map_err(io::Error::other)?,
        location,
        preferences_path,
    };

    let theme = prefs.theme;
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(theme))
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

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        args.refresh_interval,
        replay_actions,
        initial_action,
        Arc::new(services),
    )
    .await;

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

fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let path = match log_file {
        Some(path) => path.to_path_buf(),
        None => dirs_next::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skycast")
            .join("skycast.log"),
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skycast=info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

struct SkycastUi {
    display: WeatherDisplay,
    search: SearchOverlay,
}

impl SkycastUi {
    fn new() -> Self {
        Self {
            display: WeatherDisplay,
            search: SearchOverlay::new(),
        }
    }

    fn search_props<'a>(state: &'a AppState, is_focused: bool) -> SearchOverlayProps<'a> {
        SearchOverlayProps {
            query: &state.search_query,
            notice: state.notice.as_deref(),
            is_focused,
            palette: Palette::for_theme(state.theme),
            on_query_change: Action::SearchQueryChange,
            on_query_submit: Action::SearchQuerySubmit,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<SkycastComponentId>,
    ) {
        event_ctx.set_component_area(SkycastComponentId::Display, area);

        let props = WeatherDisplayProps {
            state,
            is_focused: render_ctx.is_focused() && !state.search_mode,
        };
        self.display.render(frame, area, props);

        self.search.set_open(state.search_mode);
        if state.search_mode {
            let modal_area = centered_rect(60, 7, area);
            event_ctx.set_component_area(SkycastComponentId::Search, modal_area);
            let props = Self::search_props(state, render_ctx.is_focused());
            self.search.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&SkycastComponentId::Search);
        }
    }

    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherDisplayProps {
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

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.search_mode);
        let props = Self::search_props(state, true);
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
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
    refresh_interval: u64,
    replay_actions: Vec<ReplayItem<Action>>,
    initial_action: Action,
    services: Arc<Services>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(SkycastUi::new()));
    let mut bus: EventBus<AppState, Action, SkycastComponentId, SkycastContext> = EventBus::new();
    let keybindings: Keybindings<SkycastContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(SkycastComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(SkycastComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

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
            Some(initial_action),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );

                runtime.subscriptions().interval(
                    "refresh",
                    Duration::from_secs(refresh_interval),
                    || Action::WeatherFetch,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, Arc::clone(&services)),
        )
        .await
}

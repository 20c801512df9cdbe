//! SkyForecast terminal UI
//!
//! ```sh
//! # Static candidate lists, Fahrenheit
//! skyforecast
//!
//! # Open-Meteo geocoder, Celsius, reverse-geolocate the header
//! skyforecast --source open-meteo --celsius --lat 52.52 --lon 13.40
//! ```

use std::cell::RefCell;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use skyforecast_core::{EffectRuntime, LoggingMiddleware};

use skyforecast::config::{Args, Settings, SourceKind};
use skyforecast::geolocate::NominatimClient;
use skyforecast::reducer::{reducer, startup_effects};
use skyforecast::search::{CandidateSource, OpenMeteoCandidates, StaticCandidates};
use skyforecast::state::LOADING_ANIM_TICK_MS;
use skyforecast::weather::MockWeatherProvider;
use skyforecast::{logging, Action, AppState, EffectHandler, Page};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = Settings::load(&args).context("failed to load configuration")?;

    logging::init(&settings.log_file)
        .with_context(|| format!("failed to open log file {}", settings.log_file.display()))?;
    tracing::info!(
        source = ?settings.source,
        unit = ?settings.unit,
        search_latency_ms = settings.search_latency.as_millis() as u64,
        weather_latency_ms = settings.weather_latency.as_millis() as u64,
        "Starting SkyForecast"
    );

    let handler = build_handler(&settings)?;

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, settings, handler).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "UI loop failed");
    }
    result.context("terminal UI failed")
}

fn build_handler(settings: &Settings) -> anyhow::Result<EffectHandler> {
    let catalog = Arc::new(settings.catalog.clone());
    let source: Arc<dyn CandidateSource> = match settings.source {
        SourceKind::Static => {
            Arc::new(StaticCandidates::new(catalog).with_latency(settings.search_latency))
        }
        SourceKind::OpenMeteo => Arc::new(
            OpenMeteoCandidates::new(catalog).context("failed to build geocoding client")?,
        ),
    };

    let mut handler =
        EffectHandler::new(source, MockWeatherProvider::new(settings.weather_latency));
    if settings.coordinates.is_some() {
        let geolocator = NominatimClient::new().context("failed to build geolocation client")?;
        handler = handler.with_geolocator(geolocator);
    }
    Ok(handler)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    settings: Settings,
    handler: EffectHandler,
) -> io::Result<()> {
    let mut state = AppState::new(settings.catalog, settings.unit);
    let startup = startup_effects(settings.coordinates, &mut state);

    let mut runtime = EffectRuntime::new(state, reducer, LoggingMiddleware::new());

    // Spinner frames; the reducer ignores ticks while idle
    runtime
        .subscriptions()
        .interval("tick", Duration::from_millis(LOADING_ANIM_TICK_MS), || {
            Action::Tick
        });

    {
        let mut ctx = runtime.effect_context();
        for effect in startup {
            handler.handle(effect, &mut ctx);
        }
    }

    let page = RefCell::new(Page::new());

    runtime
        .run(
            terminal,
            |frame, area, state| page.borrow_mut().render(frame, area, state),
            |event, state| page.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
            |effect, ctx| handler.handle(effect, ctx),
        )
        .await
}

use clap::{Parser, ValueEnum};
use geolocator::api::{DisplaySurface, MapLink};
use geolocator::logging;
use geolocator::{
    AppConfig, Coordinates, GeolocationProvider, Geolocator, MockGeolocation, PositionError,
    PositionSample,
};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Drive the geolocation front-end against a scripted location source
#[derive(Debug, Parser)]
#[command(name = "geolocator", version, about)]
struct Cli {
    /// Scenario to play
    #[arg(long, value_enum, default_value_t = Scenario::Locate)]
    scenario: Scenario,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = logging::default_filter())]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// One-shot lookup that succeeds
    Locate,
    /// One-shot lookup that fails
    Failure,
    /// One-shot lookup on a host without geolocation
    Unsupported,
    /// Start watching, receive a short track, stop
    Watch,
    /// Start watching while the sensor keeps failing, then stop
    WatchFailure,
}

/// Prints every display update to stdout
struct TerminalDisplay;

impl DisplaySurface for TerminalDisplay {
    fn set_status(&self, text: &str) {
        println!("[status] {}", text);
    }

    fn set_map_link(&self, link: &MapLink) {
        if link.is_empty() {
            println!("[map]    (cleared)");
        } else {
            println!("[map]    {} -> {}", link.label, link.href);
        }
    }

    fn alert(&self, message: &str) {
        println!("[ALERT]  {}", message);
    }
}

// A walk along the Embarcadero, San Francisco
const TRACK: [(f64, f64); 4] = [
    (37.7749, -122.4194),
    (37.7755, -122.4189),
    (37.7761, -122.4183),
    (37.7768, -122.4176),
];

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level)?;

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };

    let mock = Rc::new(MockGeolocation::new());
    let provider = match cli.scenario {
        Scenario::Unsupported => None,
        _ => Some(mock.clone() as Rc<dyn GeolocationProvider>),
    };
    let mut app = Geolocator::new(&config, provider, Rc::new(TerminalDisplay))?;

    tracing::info!(scenario = ?cli.scenario, "running scenario");
    match cli.scenario {
        Scenario::Locate => {
            app.find_me()?;
            let (latitude, longitude) = TRACK[0];
            mock.deliver_current(PositionSample::new(
                Coordinates::new(latitude, longitude, 10.0),
                now_ms(),
            ));
        }
        Scenario::Failure => {
            app.find_me()?;
            mock.fail_current(PositionError::from_code(1, "User denied Geolocation"));
        }
        Scenario::Unsupported => {
            if let Err(e) = app.find_me() {
                tracing::info!(error = %e, "lookup refused");
            }
        }
        Scenario::Watch => {
            let id = app.watch_me()?.handle();
            // Second start is a no-op
            app.watch_me()?;
            for (step, (latitude, longitude)) in TRACK.iter().enumerate() {
                let coords = Coordinates::new(*latitude, *longitude, 5.0)
                    .with_altitude(4.0, 3.0)
                    .with_motion(45.0, 1.4);
                mock.deliver_watch(id, PositionSample::new(coords, now_ms() + step as u64 * 1000));
            }
            app.stop_watching();
        }
        Scenario::WatchFailure => {
            let id = app.watch_me()?.handle();
            for _ in 0..3 {
                mock.fail_watch(id, PositionError::from_code(2, "Position unavailable"));
            }
            tracing::info!(state = ?app.watch_state(), "still subscribed after failures");
            app.stop_watching();
        }
    }

    Ok(())
}

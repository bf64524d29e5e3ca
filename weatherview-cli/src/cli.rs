use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode, Select};
use std::sync::Arc;
use weatherview_core::{
    Config, Coordinates, LocationMode, Session, ViewState, WeatherImage, WeatherView,
    display::{detail_cards, format_celsius},
    geolocation::{FixedGeolocator, Geolocator, geolocator_from_config},
    provider::provider_from_config,
};

use crate::{app, logging};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherview", version, about = "Current weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and how to find your location.
    Configure,

    /// Open the live weather view (default).
    Watch {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Print the weather once and exit.
    Show {
        #[command(flatten)]
        location: LocationArgs,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct LocationArgs {
    /// Place name to look up instead of locating this machine.
    pub place: Option<String>,

    /// Latitude to use instead of the configured geolocation.
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude to use instead of the configured geolocation.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

impl LocationArgs {
    fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.lat?, self.lon?))
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => {
                logging::init_stderr();
                configure()
            }
            Some(Command::Show { location }) => {
                logging::init_stderr();
                show(location).await
            }
            Some(Command::Watch { location }) => watch(location).await,
            None => watch(LocationArgs::default()).await,
        }
    }
}

fn build_session(
    config: &Config,
    location: &LocationArgs,
) -> anyhow::Result<(Session, tokio::sync::mpsc::UnboundedReceiver<weatherview_core::Event>)> {
    let provider = provider_from_config(config)?;
    let geolocator: Box<dyn Geolocator> = match location.coordinates() {
        Some(coords) => Box::new(FixedGeolocator(coords)),
        None => geolocator_from_config(config)?,
    };

    Ok(Session::new(Arc::from(provider), Arc::from(geolocator)))
}

/// Either look up the given place or start from geolocation.
fn start(view: &mut WeatherView, session: &mut Session, location: &LocationArgs) {
    let command = match &location.place {
        Some(place) => {
            view.set_input(place.clone());
            view.submit()
        }
        None => Some(view.mount()),
    };

    if let Some(command) = command {
        session.dispatch(command);
    }
}

async fn watch(location: LocationArgs) -> anyhow::Result<()> {
    logging::init_file()?;

    let config = Config::load()?;
    let (mut session, events) = build_session(&config, &location)?;
    let mut view = WeatherView::new();

    start(&mut view, &mut session, &location);

    app::run(view, session, events).await
}

async fn show(location: LocationArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let (mut session, mut events) = build_session(&config, &location)?;
    let mut view = WeatherView::new();

    start(&mut view, &mut session, &location);
    session.settle(&mut view, &mut events).await;

    match view.state() {
        ViewState::Ready(snapshot) => {
            let image = WeatherImage::select(snapshot);
            println!("{}", snapshot.name);
            for row in image.glyph() {
                println!("  {row}");
            }
            println!("  {}", format_celsius(snapshot.main.temp));
            println!();
            for card in detail_cards(snapshot) {
                println!("{:<16}{}", card.title, card.value);
            }
            Ok(())
        }
        ViewState::Failed(message) => bail!("{message}\nPlease search another city."),
        ViewState::Idle | ViewState::Loading => {
            bail!("No location to look up. Pass a place name or --lat/--lon.")
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        bail!("The API key must not be empty.");
    }
    config.set_api_key(api_key.trim().to_string());

    let mode = Select::new("How should your location be found?", LocationMode::all().to_vec())
        .prompt()
        .context("Failed to read location mode")?;
    config.location.mode = mode;

    if mode == LocationMode::Fixed {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please type a number, e.g. 48.85")
            .prompt()
            .context("Failed to read latitude")?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please type a number, e.g. 2.35")
            .prompt()
            .context("Failed to read longitude")?;
        config.location.latitude = Some(latitude);
        config.location.longitude = Some(longitude);
    }

    let saved = config.save()?;
    println!("Configuration saved to {}", saved.display());

    Ok(())
}

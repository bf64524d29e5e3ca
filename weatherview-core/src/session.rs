//! Runs the view's commands on the tokio runtime.

use chrono::Local;
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::debug;

use crate::{
    clock::format_clock,
    geolocation::Geolocator,
    provider::WeatherProvider,
    view::{Command, Event, RequestId, WeatherView},
};

pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// Stops the clock task when dropped.
#[derive(Debug)]
pub struct ClockGuard {
    handle: JoinHandle<()>,
}

impl Drop for ClockGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Debug)]
pub struct Session {
    provider: Arc<dyn WeatherProvider>,
    geolocator: Arc<dyn Geolocator>,
    events: UnboundedSender<Event>,
    in_flight: Option<(RequestId, JoinHandle<()>)>,
}

impl Session {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        geolocator: Arc<dyn Geolocator>,
    ) -> (Self, UnboundedReceiver<Event>) {
        let (events, rx) = mpsc::unbounded_channel();
        let session = Self {
            provider,
            geolocator,
            events,
            in_flight: None,
        };
        (session, rx)
    }

    /// Run a command in the background. A still running older request is
    /// aborted; its result would be discarded by the view anyway.
    pub fn dispatch(&mut self, command: Command) {
        if let Some((old, handle)) = self.in_flight.take() {
            if !handle.is_finished() {
                debug!("Aborting request {old} superseded by {}", command.id());
                handle.abort();
            }
        }

        let id = command.id();
        let events = self.events.clone();

        let handle = match command {
            Command::Locate { id } => {
                let geolocator = Arc::clone(&self.geolocator);
                tokio::spawn(async move {
                    let result = geolocator.locate().await;
                    let _ = events.send(Event::Located { id, result });
                })
            }
            Command::Fetch { id, query } => {
                let provider = Arc::clone(&self.provider);
                tokio::spawn(async move {
                    let result = provider.current(&query).await;
                    let _ = events.send(Event::Fetched { id, result });
                })
            }
        };

        self.in_flight = Some((id, handle));
    }

    /// Emit a formatted clock reading every `period`, starting immediately.
    pub fn start_clock(&self, period: Duration) -> ClockGuard {
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                if events.send(Event::Tick(format_clock(&Local::now()))).is_err() {
                    break;
                }
            }
        });
        ClockGuard { handle }
    }

    /// Drive the view until nothing is loading any more.
    pub async fn settle(&mut self, view: &mut WeatherView, rx: &mut UnboundedReceiver<Event>) {
        while !view.is_settled() {
            let Some(event) = rx.recv().await else {
                break;
            };
            if let Some(command) = view.apply(event) {
                self.dispatch(command);
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.in_flight.take() {
            handle.abort();
        }
    }
}

//! State of the weather widget and the transitions between its states.
//!
//! The view never performs I/O. Every operation returns the [`Command`] the
//! caller has to run, and results come back through [`WeatherView::apply`]
//! tagged with the [`RequestId`] they were issued under. Only the newest id
//! is accepted, so a slow answer to an old request cannot overwrite a newer
//! one.

use chrono::{DateTime, TimeZone};
use tracing::{debug, info, warn};

use crate::{
    FetchError, GeolocationError,
    clock::format_clock,
    model::{Coordinates, WeatherQuery, WeatherSnapshot},
};

pub const DEFAULT_PLACEHOLDER: &str = "Enter your city";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the widget currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Ready(WeatherSnapshot),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            ViewState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Side effect requested by the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Locate { id: RequestId },
    Fetch { id: RequestId, query: WeatherQuery },
}

impl Command {
    pub fn id(&self) -> RequestId {
        match self {
            Command::Locate { id } | Command::Fetch { id, .. } => *id,
        }
    }
}

/// Result delivered back to the view.
#[derive(Debug)]
pub enum Event {
    Located {
        id: RequestId,
        result: Result<Coordinates, GeolocationError>,
    },
    Fetched {
        id: RequestId,
        result: Result<WeatherSnapshot, FetchError>,
    },
    Tick(String),
}

#[derive(Debug, Default)]
pub struct WeatherView {
    state: ViewState,
    coordinates: Option<Coordinates>,
    input: String,
    place_override: Option<String>,
    last_place: Option<String>,
    clock: String,
    last_issued: u64,
}

impl WeatherView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    pub fn clock(&self) -> &str {
        &self.clock
    }

    /// Hint shown in the empty input field.
    pub fn placeholder(&self) -> &str {
        self.last_place.as_deref().unwrap_or(DEFAULT_PLACEHOLDER)
    }

    pub fn latest_request(&self) -> Option<RequestId> {
        (self.last_issued > 0).then_some(RequestId(self.last_issued))
    }

    /// Settled once nothing is loading any more.
    pub fn is_settled(&self) -> bool {
        !self.state.is_loading()
    }

    fn issue(&mut self) -> RequestId {
        self.last_issued += 1;
        self.state = ViewState::Loading;
        RequestId(self.last_issued)
    }

    fn is_current(&self, id: RequestId) -> bool {
        id.0 == self.last_issued
    }

    /// First appearance: ask for the device position.
    pub fn mount(&mut self) -> Command {
        let id = self.issue();
        debug!("Mounted, locating under {id}");
        Command::Locate { id }
    }

    /// The place to query right now: a submitted name beats coordinates.
    pub fn fetch_query(&self) -> Option<WeatherQuery> {
        if let Some(name) = &self.place_override {
            return Some(WeatherQuery::ByName(name.clone()));
        }
        self.coordinates.map(WeatherQuery::ByCoordinates)
    }

    fn fetch(&mut self) -> Option<Command> {
        let query = self.fetch_query()?;
        let id = self.issue();
        debug!("Fetching {query} under {id}");
        Some(Command::Fetch { id, query })
    }

    /// Submit the current input.
    ///
    /// Non-empty text becomes the place override. Empty text drops the
    /// override and falls back to the known coordinates, if any.
    pub fn submit(&mut self) -> Option<Command> {
        let text = self.input.trim();
        self.place_override = (!text.is_empty()).then(|| text.to_string());
        self.fetch()
    }

    pub fn apply_location(
        &mut self,
        id: RequestId,
        result: Result<Coordinates, GeolocationError>,
    ) -> Option<Command> {
        if !self.is_current(id) {
            debug!("Discarding stale location result {id}");
            return None;
        }

        match result {
            Ok(coords) => {
                debug!("Located at {coords}");
                self.coordinates = Some(coords);
                // A submitted place still takes precedence over the new position.
                self.fetch()
            }
            Err(e) => {
                warn!("Geolocation failed: {e}");
                self.coordinates = None;
                self.state = ViewState::Failed(e.to_string());
                None
            }
        }
    }

    /// Returns whether the result was accepted.
    pub fn apply_fetch(
        &mut self,
        id: RequestId,
        result: Result<WeatherSnapshot, FetchError>,
    ) -> bool {
        if !self.is_current(id) {
            debug!("Discarding stale weather result {id}");
            return false;
        }

        match result {
            Ok(snapshot) => {
                info!("Weather for '{}' accepted under {id}", snapshot.name);
                if let Some(coords) = snapshot.coordinates() {
                    self.coordinates = Some(coords);
                }
                if !snapshot.name.is_empty() {
                    self.last_place = Some(snapshot.name.clone());
                }
                self.state = ViewState::Ready(snapshot);
            }
            Err(e) => {
                warn!("Weather request {id} failed: {e}");
                self.state = ViewState::Failed(e.to_string());
            }
        }
        true
    }

    pub fn tick<Tz>(&mut self, now: &DateTime<Tz>)
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.clock = format_clock(now);
    }

    pub fn apply(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Located { id, result } => self.apply_location(id, result),
            Event::Fetched { id, result } => {
                self.apply_fetch(id, result);
                None
            }
            Event::Tick(clock) => {
                self.clock = clock;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coord;
    use chrono::Utc;

    fn snapshot(name: &str, lat: f64, lon: f64) -> WeatherSnapshot {
        let mut s = WeatherSnapshot::default();
        s.name = name.to_string();
        s.coord = Some(Coord { lat, lon });
        s.main.temp = Some(290.0);
        s
    }

    fn not_found() -> FetchError {
        FetchError::Transport {
            status: 404,
            status_text: "Not Found".into(),
        }
    }

    fn located(view: &mut WeatherView, coords: Coordinates) -> Command {
        let Command::Locate { id } = view.mount() else {
            panic!("mount must locate");
        };
        view.apply_location(id, Ok(coords))
            .expect("coordinates trigger a fetch")
    }

    #[test]
    fn mount_starts_loading() {
        let mut view = WeatherView::new();
        assert_eq!(view.state(), &ViewState::Idle);

        let cmd = view.mount();
        assert_eq!(cmd, Command::Locate { id: RequestId(1) });
        assert!(view.state().is_loading());
    }

    #[test]
    fn location_triggers_coordinate_fetch() {
        let mut view = WeatherView::new();
        let here = Coordinates::new(48.85, 2.35);

        let cmd = located(&mut view, here);

        assert_eq!(
            cmd,
            Command::Fetch {
                id: RequestId(2),
                query: WeatherQuery::ByCoordinates(here),
            }
        );
        assert_eq!(view.coordinates(), Some(here));
        assert!(view.state().is_loading());
    }

    #[test]
    fn geolocation_failure_resets_coordinates() {
        let mut view = WeatherView::new();
        let Command::Locate { id } = view.mount() else {
            panic!("mount must locate");
        };

        let next = view.apply_location(id, Err(GeolocationError::Denied));

        assert!(next.is_none());
        assert_eq!(view.coordinates(), None);
        assert_eq!(view.state().failure(), Some("User denied Geolocation"));
        assert!(view.is_settled());
    }

    #[test]
    fn successful_fetch_clears_failure() {
        let mut view = WeatherView::new();
        view.set_input("Atlantis");
        let Some(Command::Fetch { id, .. }) = view.submit() else {
            panic!("submit must fetch");
        };
        view.apply_fetch(id, Err(not_found()));
        assert_eq!(view.state().failure(), Some("Not Found"));

        view.set_input("Paris");
        let Some(Command::Fetch { id, .. }) = view.submit() else {
            panic!("submit must fetch");
        };
        assert!(view.apply_fetch(id, Ok(snapshot("Paris", 48.85, 2.35))));

        assert_eq!(view.state().failure(), None);
        assert_eq!(view.state().snapshot().map(|s| s.name.as_str()), Some("Paris"));
    }

    #[test]
    fn failed_fetch_is_not_loading() {
        let mut view = WeatherView::new();
        let Command::Fetch { id, .. } = located(&mut view, Coordinates::new(0.5, 0.5)) else {
            panic!("expected fetch");
        };

        view.apply_fetch(id, Err(not_found()));

        assert!(!view.state().is_loading());
        assert_eq!(view.state(), &ViewState::Failed("Not Found".into()));
    }

    #[test]
    fn submitted_name_wins_over_coordinates() {
        let mut view = WeatherView::new();
        located(&mut view, Coordinates::new(40.71, -74.0));

        view.set_input("  Paris ");
        let cmd = view.submit().expect("name submit fetches");

        assert_eq!(
            cmd,
            Command::Fetch {
                id: RequestId(3),
                query: WeatherQuery::ByName("Paris".into()),
            }
        );
    }

    #[test]
    fn empty_submit_falls_back_to_coordinates() {
        let mut view = WeatherView::new();
        let here = Coordinates::new(1.0, 2.0);
        located(&mut view, here);

        view.set_input("   ");
        let cmd = view.submit().expect("coordinates are known");

        assert!(matches!(
            cmd,
            Command::Fetch { query: WeatherQuery::ByCoordinates(c), .. } if c == here
        ));
    }

    #[test]
    fn empty_submit_without_coordinates_does_nothing() {
        let mut view = WeatherView::new();
        assert!(view.submit().is_none());
        assert_eq!(view.state(), &ViewState::Idle);
        assert_eq!(view.latest_request(), None);
    }

    #[test]
    fn stale_fetch_is_discarded() {
        let mut view = WeatherView::new();
        let Command::Fetch { id: old, .. } = located(&mut view, Coordinates::new(1.0, 1.0)) else {
            panic!("expected fetch");
        };

        view.set_input("Paris");
        let Some(Command::Fetch { id: new, .. }) = view.submit() else {
            panic!("submit must fetch");
        };

        assert!(view.apply_fetch(new, Ok(snapshot("Paris", 48.85, 2.35))));
        assert!(!view.apply_fetch(old, Ok(snapshot("Somewhere", 1.0, 1.0))));
        assert!(!view.apply_fetch(old, Err(not_found())));

        assert_eq!(view.state().snapshot().map(|s| s.name.as_str()), Some("Paris"));
    }

    #[test]
    fn stale_result_keeps_newer_request_loading() {
        let mut view = WeatherView::new();
        let Command::Fetch { id: old, .. } = located(&mut view, Coordinates::new(1.0, 1.0)) else {
            panic!("expected fetch");
        };
        view.set_input("Paris");
        view.submit();

        view.apply_fetch(old, Err(not_found()));

        assert!(view.state().is_loading());
    }

    #[test]
    fn stale_location_is_discarded() {
        let mut view = WeatherView::new();
        let Command::Locate { id } = view.mount() else {
            panic!("mount must locate");
        };
        view.set_input("Paris");
        view.submit();

        assert!(view.apply_location(id, Ok(Coordinates::new(5.0, 5.0))).is_none());
        assert_eq!(view.coordinates(), None);
        assert!(view.state().is_loading());
    }

    #[test]
    fn accepted_snapshot_moves_coordinates_and_placeholder() {
        let mut view = WeatherView::new();
        assert_eq!(view.placeholder(), DEFAULT_PLACEHOLDER);

        view.set_input("Paris");
        let Some(cmd) = view.submit() else {
            panic!("submit must fetch");
        };
        view.apply_fetch(cmd.id(), Ok(snapshot("Paris", 48.85, 2.35)));

        assert_eq!(view.coordinates(), Some(Coordinates::new(48.85, 2.35)));
        assert_eq!(view.placeholder(), "Paris");
    }

    #[test]
    fn relocating_with_a_submitted_place_refetches_by_name() {
        let mut view = WeatherView::new();
        view.set_input("Paris");
        let Some(cmd) = view.submit() else {
            panic!("submit must fetch");
        };
        view.apply_fetch(cmd.id(), Ok(snapshot("Paris", 48.85, 2.35)));

        let Command::Locate { id } = view.mount() else {
            panic!("mount must locate");
        };
        let next = view.apply_location(id, Ok(Coordinates::new(9.0, 9.0)));

        assert_eq!(
            next,
            Some(Command::Fetch {
                id: RequestId(3),
                query: WeatherQuery::ByName("Paris".into()),
            })
        );
        assert!(view.state().is_loading());
        assert_eq!(view.coordinates(), Some(Coordinates::new(9.0, 9.0)));

        assert!(view.apply_fetch(RequestId(3), Ok(snapshot("Paris", 48.85, 2.35))));
        assert_eq!(view.state().snapshot().map(|s| s.name.as_str()), Some("Paris"));
    }

    #[test]
    fn snapshot_without_coord_keeps_known_coordinates() {
        let mut view = WeatherView::new();
        let here = Coordinates::new(1.0, 2.0);
        located(&mut view, here);

        view.set_input("Paris");
        let Some(cmd) = view.submit() else {
            panic!("submit must fetch");
        };
        let body: WeatherSnapshot =
            serde_json::from_str(r#"{"name": "Paris"}"#).expect("sparse body");
        view.apply_fetch(cmd.id(), Ok(body));

        assert_eq!(view.coordinates(), Some(here));

        view.set_input("");
        let next = view.submit();
        assert!(matches!(
            next,
            Some(Command::Fetch { query: WeatherQuery::ByCoordinates(c), .. }) if c == here
        ));
    }

    #[test]
    fn snapshot_without_coord_leaves_coordinates_unknown() {
        let mut view = WeatherView::new();
        view.set_input("Paris");
        let Some(cmd) = view.submit() else {
            panic!("submit must fetch");
        };
        let body: WeatherSnapshot =
            serde_json::from_str(r#"{"name": "Paris"}"#).expect("sparse body");
        view.apply_fetch(cmd.id(), Ok(body));

        assert_eq!(view.coordinates(), None);
        view.set_input("");
        assert!(view.submit().is_none());
    }

    #[test]
    fn tick_formats_clock() {
        let mut view = WeatherView::new();
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 5, 0).unwrap();

        view.tick(&now);

        assert_eq!(view.clock(), "Monday, October 19 9:05 AM");
    }

    #[test]
    fn apply_routes_events() {
        let mut view = WeatherView::new();
        let Command::Locate { id } = view.mount() else {
            panic!("mount must locate");
        };

        let next = view.apply(Event::Located {
            id,
            result: Ok(Coordinates::new(3.0, 4.0)),
        });
        let Some(Command::Fetch { id, .. }) = next else {
            panic!("location must trigger fetch");
        };

        assert!(view.apply(Event::Fetched { id, result: Err(not_found()) }).is_none());
        assert_eq!(view.state().failure(), Some("Not Found"));

        view.apply(Event::Tick("Monday, October 19 9:05 AM".into()));
        assert_eq!(view.clock(), "Monday, October 19 9:05 AM");
    }
}

//! Dashboard controller: turns triggers (startup, search, retry, refresh,
//! geolocation) into provider calls and render updates.
//!
//! Current conditions and the forecast are independent chains, each keyed by
//! its own request generation. A chain that finishes after a newer chain for
//! the same resource has started drops its result instead of rendering it, so
//! the most recently *started* request wins the display.

use chrono::{Local, Timelike};
use parking_lot::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

use crate::{
    config::DEFAULT_CITY,
    error::{LocationError, TriggerError},
    forecast,
    model::{Coordinates, UvReading, WeatherSnapshot},
    present::{self, date_label, forecast_cards},
    provider::WeatherApi,
    render::{Field, RenderTarget},
    store::SnapshotStore,
    theme,
};

pub const FORECAST_UNAVAILABLE: &str = "Unable to load forecast data";

/// The city the dashboard considers active for retry and refresh.
///
/// Triggers take the current session and hand back a new one on success;
/// a failed trigger leaves the caller's session as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    city: String,
}

impl Session {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_CITY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Error,
    Displaying,
}

#[derive(Debug, Clone, Copy)]
enum Target<'a> {
    City(&'a str),
    Coords(Coordinates),
}

#[derive(Debug)]
pub struct Dashboard<A, R> {
    api: A,
    render: Mutex<R>,
    store: Option<SnapshotStore>,
    state: Mutex<ViewState>,
    current_generation: AtomicU64,
    forecast_generation: AtomicU64,
}

impl<A: WeatherApi, R: RenderTarget> Dashboard<A, R> {
    pub fn new(api: A, render: R) -> Self {
        Self {
            api,
            render: Mutex::new(render),
            store: None,
            state: Mutex::new(ViewState::Idle),
            current_generation: AtomicU64::new(0),
            forecast_generation: AtomicU64::new(0),
        }
    }

    /// Persist every successful snapshot for [`Dashboard::restore_saved`].
    pub fn with_store(mut self, store: SnapshotStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn state(&self) -> ViewState {
        *self.state.lock()
    }

    /// Direct access to the render target, e.g. for inspection.
    pub fn target(&self) -> MutexGuard<'_, R> {
        self.render.lock()
    }

    /// Initial load: current conditions and forecast run side by side.
    pub async fn startup(&self, session: &Session) -> Result<Session, TriggerError> {
        self.show_date();

        let city = session.city();
        let (current, ()) = tokio::join!(self.show_current(Target::City(city)), self.show_forecast(city));
        current
    }

    /// A blank query is rejected without touching the network.
    pub async fn search(&self, session: &Session, query: &str) -> Result<Session, TriggerError> {
        let city = query.trim();
        if city.is_empty() {
            let err = TriggerError::EmptyQuery;
            self.render.lock().show_error(&err.to_string());
            *self.state.lock() = ViewState::Error;
            return Err(err);
        }

        info!(city, previous = session.city(), "searching");
        self.load_city(city).await
    }

    pub async fn retry(&self, session: &Session) -> Result<Session, TriggerError> {
        self.load_city(session.city()).await
    }

    /// Periodic refresh of the session city.
    pub async fn refresh(&self, session: &Session) -> Result<Session, TriggerError> {
        debug!(city = session.city(), "auto-refresh");
        self.load_city(session.city()).await
    }

    /// Handles a one-shot geolocation result. Denials and coordinate lookup
    /// failures are logged and fall back to loading the session city.
    pub async fn geolocated(
        &self,
        session: &Session,
        position: Result<Coordinates, LocationError>,
    ) -> Result<Session, TriggerError> {
        self.show_date();

        let coord = match position {
            Ok(coord) => coord,
            Err(err) => {
                warn!(error = %err, "geolocation failed, loading session city");
                return self.load_city(session.city()).await;
            }
        };

        match self.show_current(Target::Coords(coord)).await {
            Ok(resolved) => {
                self.show_forecast(resolved.city()).await;
                Ok(resolved)
            }
            Err(TriggerError::Superseded) => Err(TriggerError::Superseded),
            Err(err) => {
                warn!(error = %err, lat = coord.lat, lon = coord.lon, "coordinate lookup failed, loading session city");
                self.load_city(session.city()).await
            }
        }
    }

    /// Shows the last saved snapshot, without a UV reading. Returns the saved
    /// session, or `None` when there is nothing to show.
    pub fn restore_saved(&self) -> Option<Session> {
        let store = self.store.as_ref()?;
        let saved = match store.load() {
            Ok(saved) => saved?,
            Err(err) => {
                warn!(error = %err, "could not read saved snapshot");
                return None;
            }
        };

        let mut render = self.render.lock();
        display(&mut *render, &saved.snapshot, &UvReading::absent());
        render.hide_error();
        render.set_loading(false);
        *self.state.lock() = ViewState::Displaying;

        Some(Session::new(saved.city))
    }

    /// The header date is written on page load only, never on refresh.
    fn show_date(&self) {
        self.render
            .lock()
            .set_field(Field::Date, &date_label(&Local::now()));
    }

    /// Current conditions, then (only on success) the forecast.
    async fn load_city(&self, city: &str) -> Result<Session, TriggerError> {
        let session = self.show_current(Target::City(city)).await?;
        self.show_forecast(city).await;
        Ok(session)
    }

    async fn show_current(&self, target: Target<'_>) -> Result<Session, TriggerError> {
        let generation = self.current_generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut render = self.render.lock();
            render.set_loading(true);
            render.hide_error();
            *self.state.lock() = ViewState::Loading;
        }

        let fetched = match target {
            Target::City(city) => self.api.current_by_name(city).await,
            Target::Coords(coord) => self.api.current_by_coords(coord).await,
        };
        let fetched = match fetched {
            Ok(snapshot) => {
                let uv = self.api.uv_index(snapshot.coord).await;
                Ok((snapshot, uv))
            }
            Err(err) => Err(err),
        };

        let mut render = self.render.lock();
        if self.current_generation.load(Ordering::SeqCst) != generation {
            debug!(generation, ?target, "dropping stale weather result");
            return Err(TriggerError::Superseded);
        }

        let (snapshot, uv) = match fetched {
            Ok(fetched) => fetched,
            // Coordinate failures are retried by name instead of being shown.
            Err(err) if matches!(target, Target::Coords(_)) => return Err(err.into()),
            Err(err) => {
                warn!(error = %err, ?target, "weather request failed");
                render.show_error(err.user_message());
                render.set_loading(false);
                *self.state.lock() = ViewState::Error;
                return Err(err.into());
            }
        };

        let city = match target {
            Target::City(city) => city.to_string(),
            Target::Coords(_) => snapshot.city.clone(),
        };

        display(&mut *render, &snapshot, &uv);
        render.set_loading(false);
        *self.state.lock() = ViewState::Displaying;
        drop(render);

        if let Some(store) = &self.store {
            if let Err(err) = store.save(&city, &snapshot) {
                warn!(error = %err, "could not save snapshot");
            }
        }

        Ok(Session::new(city))
    }

    /// Forecast failures stay inside the forecast area.
    async fn show_forecast(&self, city: &str) {
        let generation = self.forecast_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.api.forecast_by_name(city).await;

        let mut render = self.render.lock();
        if self.forecast_generation.load(Ordering::SeqCst) != generation {
            debug!(generation, city, "dropping stale forecast result");
            return;
        }

        match result {
            Ok(entries) => render.set_forecast(&forecast_cards(&forecast::aggregate(&entries))),
            Err(err) => {
                warn!(error = %err, city, "forecast request failed");
                render.set_forecast_error(FORECAST_UNAVAILABLE);
            }
        }
    }
}

fn display<R: RenderTarget + ?Sized>(render: &mut R, snapshot: &WeatherSnapshot, uv: &UvReading) {
    let fields = present::present(snapshot, uv, &Local);
    for (field, value) in fields.entries() {
        render.set_field(field, value);
    }

    let theme = theme::select(&snapshot.condition, snapshot.temperature_c, Local::now().hour());
    render.apply_theme(&theme);
}

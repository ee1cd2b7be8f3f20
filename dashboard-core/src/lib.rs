//! Core library for the `weather-dash` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the [`WeatherApi`] trait
//! - Forecast aggregation, presentation mapping and background theming
//! - The [`Dashboard`] controller that drives a [`RenderTarget`]
//!
//! It is used by `dashboard-cli`, but any front-end that implements
//! [`RenderTarget`] can drive it.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod model;
pub mod present;
pub mod provider;
pub mod render;
pub mod store;
pub mod theme;

pub use config::Config;
pub use dashboard::{Dashboard, Session, ViewState};
pub use error::{FetchError, LocationError, TriggerError};
pub use model::{Condition, Coordinates, DayForecast, ForecastEntry, UvReading, WeatherSnapshot};
pub use present::{DisplayFields, ForecastCard};
pub use provider::{WeatherApi, openweather::OpenWeatherProvider, provider_from_config};
pub use render::{Field, RenderTarget};
pub use store::SnapshotStore;
pub use theme::{Theme, ThemeClass};

use crate::{
    Config,
    error::FetchError,
    model::{Coordinates, ForecastEntry, UvReading, WeatherSnapshot},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The four read-only provider calls the dashboard depends on. Each call is
/// a single attempt: no retries and no caching.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    async fn current_by_name(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;

    async fn current_by_coords(&self, coord: Coordinates) -> Result<WeatherSnapshot, FetchError>;

    /// Never fails; any failure degrades to [`UvReading::absent`].
    async fn uv_index(&self, coord: Coordinates) -> UvReading;

    async fn forecast_by_name(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError>;
}

/// Construct the provider from config, resolving the API key.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.resolve_api_key()?;
    Ok(OpenWeatherProvider::new(api_key).with_base_url(&config.base_url))
}

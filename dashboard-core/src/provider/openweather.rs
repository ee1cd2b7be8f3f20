use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use tracing::debug;

use crate::{
    error::FetchError,
    model::{Condition, Coordinates, ForecastEntry, UvReading, WeatherSnapshot},
};

use super::WeatherApi;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const FORECAST_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

/// Whether a 404 means "no such city" for this call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    ByName,
    Other,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the provider at another host, e.g. a mock server in tests.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        lookup: Lookup,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, ?params, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, endpoint, "OpenWeather returned an error status");
            return Err(classify_status(status, &body, lookup));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn classify_status(status: StatusCode, body: &str, lookup: Lookup) -> FetchError {
    match status {
        StatusCode::NOT_FOUND if lookup == Lookup::ByName => FetchError::NotFound,
        StatusCode::UNAUTHORIZED => FetchError::Unauthorized,
        _ => FetchError::Status {
            status,
            body: truncate_body(body),
        },
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    visibility: Option<f64>,
    clouds: OwClouds,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwUvResponse {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    #[serde(deserialize_with = "forecast_time")]
    dt_txt: NaiveDateTime,
    main: OwForecastMain,
    weather: Vec<OwForecastWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn forecast_time<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, FORECAST_TIME_FORMAT).map_err(serde::de::Error::custom)
}

impl From<OwCurrentResponse> for WeatherSnapshot {
    fn from(parsed: OwCurrentResponse) -> Self {
        let (condition, description, icon) = match parsed.weather.into_iter().next() {
            Some(w) => (Condition::from_main(&w.main), w.description, w.icon),
            None => (
                Condition::Other("unknown".to_string()),
                "Unknown".to_string(),
                String::new(),
            ),
        };

        WeatherSnapshot {
            city: parsed.name,
            coord: Coordinates {
                lat: parsed.coord.lat,
                lon: parsed.coord.lon,
            },
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            visibility_m: parsed.visibility,
            pressure_hpa: parsed.main.pressure,
            cloudiness_pct: parsed.clouds.all,
            condition,
            description,
            icon,
            sunrise: unix_to_utc(parsed.sys.sunrise),
            sunset: unix_to_utc(parsed.sys.sunset),
        }
    }
}

impl From<OwForecastEntry> for ForecastEntry {
    fn from(entry: OwForecastEntry) -> Self {
        let (description, icon) = entry
            .weather
            .into_iter()
            .next()
            .map(|w| (w.description, w.icon))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

        ForecastEntry {
            timestamp: entry.dt_txt,
            temperature_c: entry.main.temp,
            icon,
            description,
        }
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherProvider {
    async fn current_by_name(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let parsed: OwCurrentResponse = self
            .get(
                "weather",
                &[("q", city.to_string()), ("units", "metric".to_string())],
                Lookup::ByName,
            )
            .await?;

        Ok(parsed.into())
    }

    async fn current_by_coords(&self, coord: Coordinates) -> Result<WeatherSnapshot, FetchError> {
        let parsed: OwCurrentResponse = self
            .get(
                "weather",
                &[
                    ("lat", coord.lat.to_string()),
                    ("lon", coord.lon.to_string()),
                    ("units", "metric".to_string()),
                ],
                Lookup::Other,
            )
            .await?;

        Ok(parsed.into())
    }

    async fn uv_index(&self, coord: Coordinates) -> UvReading {
        let result: Result<OwUvResponse, FetchError> = self
            .get(
                "uvi",
                &[("lat", coord.lat.to_string()), ("lon", coord.lon.to_string())],
                Lookup::Other,
            )
            .await;

        match result {
            Ok(uv) => UvReading::new(uv.value),
            Err(err) => {
                debug!(error = %err, "UV index not available");
                UvReading::absent()
            }
        }
    }

    async fn forecast_by_name(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError> {
        let parsed: OwForecastResponse = self
            .get(
                "forecast",
                &[("q", city.to_string()), ("units", "metric".to_string())],
                Lookup::Other,
            )
            .await?;

        Ok(parsed.list.into_iter().map(ForecastEntry::from).collect())
    }
}

fn unix_to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_default()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

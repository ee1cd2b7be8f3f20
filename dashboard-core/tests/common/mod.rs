//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use dashboard_core::{Field, ForecastCard, OpenWeatherProvider, RenderTarget, Theme};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const API_KEY: &str = "TEST_KEY";

pub fn provider(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::new(API_KEY.to_string()).with_base_url(&server.uri())
}

/// Render target that remembers the last value written to every slot.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub fields: HashMap<Field, String>,
    pub loading: bool,
    pub error: Option<String>,
    pub forecast: Vec<ForecastCard>,
    pub forecast_error: Option<String>,
    pub theme: Option<Theme>,
}

impl RecordingTarget {
    pub fn field(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }
}

impl RenderTarget for RecordingTarget {
    fn set_field(&mut self, field: Field, value: &str) {
        self.fields.insert(field, value.to_string());
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn hide_error(&mut self) {
        self.error = None;
    }

    fn set_forecast(&mut self, cards: &[ForecastCard]) {
        self.forecast = cards.to_vec();
        self.forecast_error = None;
    }

    fn set_forecast_error(&mut self, message: &str) {
        self.forecast.clear();
        self.forecast_error = Some(message.to_string());
    }

    fn apply_theme(&mut self, theme: &Theme) {
        self.theme = Some(theme.clone());
    }
}

/// A `/weather` response body.
pub fn current_json(name: &str, temp: f64, main: &str) -> Value {
    json!({
        "coord": { "lon": 2.35, "lat": 48.85 },
        "weather": [{ "id": 802, "main": main, "description": "scattered clouds", "icon": "03d" }],
        "base": "stations",
        "main": {
            "temp": temp,
            "feels_like": temp - 1.0,
            "temp_min": temp - 2.0,
            "temp_max": temp + 2.0,
            "pressure": 1013,
            "humidity": 64
        },
        "visibility": 10000,
        "wind": { "speed": 10.0, "deg": 240 },
        "clouds": { "all": 40 },
        "dt": 1773993600,
        "sys": { "country": "FR", "sunrise": 1773983100, "sunset": 1774028700 },
        "timezone": 3600,
        "id": 2988507,
        "name": name,
        "cod": 200
    })
}

pub fn uv_json(value: f64) -> Value {
    json!({ "lat": 48.85, "lon": 2.35, "date_iso": "2026-03-20T12:00:00Z", "date": 1774008000, "value": value })
}

/// Two evening samples for "today" (2026-03-19) followed by `days` full days
/// of 3-hourly samples.
pub fn forecast_json(days: u32) -> Value {
    let mut list = vec![
        forecast_item("2026-03-19 18:00:00", 9.0, "04n"),
        forecast_item("2026-03-19 21:00:00", 8.0, "04n"),
    ];
    for day in 0..days {
        for slot in 0..8 {
            let ts = format!("2026-03-{:02} {:02}:00:00", 20 + day, slot * 3);
            let icon = if slot * 3 == 12 { "01d" } else { "02n" };
            list.push(forecast_item(&ts, 10.0 + f64::from(day), icon));
        }
    }

    json!({ "cod": "200", "cnt": list.len(), "list": list, "city": { "name": "Paris", "country": "FR" } })
}

fn forecast_item(dt_txt: &str, temp: f64, icon: &str) -> Value {
    json!({
        "dt": 0,
        "main": { "temp": temp, "feels_like": temp, "humidity": 70 },
        "weather": [{ "id": 800, "main": "Clear", "description": format!("sky {icon}"), "icon": icon }],
        "dt_txt": dt_txt
    })
}

pub fn not_found_json() -> Value {
    json!({ "cod": "404", "message": "city not found" })
}

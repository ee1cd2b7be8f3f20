//! Pure mapping from provider data to display strings.

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    model::{DayForecast, UvReading, WeatherSnapshot},
    render::Field,
};

pub const NOT_AVAILABLE: &str = "N/A";

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Every labeled string the current-conditions panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFields {
    pub city: String,
    pub temperature: String,
    pub description: String,
    pub icon_url: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind_speed: String,
    pub visibility: String,
    pub pressure: String,
    pub uv_index: String,
    pub cloudiness: String,
    pub sunrise: String,
    pub sunset: String,
}

impl DisplayFields {
    pub fn entries(&self) -> [(Field, &str); 13] {
        [
            (Field::City, self.city.as_str()),
            (Field::Temperature, self.temperature.as_str()),
            (Field::Description, self.description.as_str()),
            (Field::Icon, self.icon_url.as_str()),
            (Field::FeelsLike, self.feels_like.as_str()),
            (Field::Humidity, self.humidity.as_str()),
            (Field::WindSpeed, self.wind_speed.as_str()),
            (Field::Visibility, self.visibility.as_str()),
            (Field::Pressure, self.pressure.as_str()),
            (Field::UvIndex, self.uv_index.as_str()),
            (Field::Cloudiness, self.cloudiness.as_str()),
            (Field::Sunrise, self.sunrise.as_str()),
            (Field::Sunset, self.sunset.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastCard {
    pub date: String,
    pub icon_url: String,
    pub temperature: String,
    pub description: String,
}

/// Rounds half-way values toward positive infinity (`-2.5` -> `-2`).
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    // Compare the fraction instead of adding 0.5, which rounds up
    // 0.49999999999999994.
    if value - floor >= 0.5 { floor as i64 + 1 } else { floor as i64 }
}

pub fn present<Tz: TimeZone>(snapshot: &WeatherSnapshot, uv: &UvReading, tz: &Tz) -> DisplayFields
where
    Tz::Offset: std::fmt::Display,
{
    DisplayFields {
        city: snapshot.city.clone(),
        temperature: degrees(snapshot.temperature_c),
        description: snapshot.description.clone(),
        icon_url: format!("{ICON_BASE_URL}/{}@4x.png", snapshot.icon),
        feels_like: degrees(snapshot.feels_like_c),
        humidity: format!("{}%", snapshot.humidity_pct),
        wind_speed: format!("{} km/h", round_half_up(snapshot.wind_speed_mps * 3.6)),
        visibility: match snapshot.visibility_m {
            Some(meters) => format!("{:.1} km", meters / 1000.0),
            None => NOT_AVAILABLE.to_string(),
        },
        pressure: format!("{} hPa", snapshot.pressure_hpa),
        uv_index: match uv.value() {
            Some(value) => round_half_up(value).to_string(),
            None => NOT_AVAILABLE.to_string(),
        },
        cloudiness: format!("{}%", snapshot.cloudiness_pct),
        sunrise: clock_time(snapshot.sunrise, tz),
        sunset: clock_time(snapshot.sunset, tz),
    }
}

pub fn forecast_cards(days: &[DayForecast]) -> Vec<ForecastCard> {
    days.iter()
        .map(|day| ForecastCard {
            date: day.date.format("%a, %b %-d").to_string(),
            icon_url: format!("{ICON_BASE_URL}/{}@2x.png", day.icon),
            temperature: format!("{:.1}°C", day.avg_temperature_c),
            description: day.description.clone(),
        })
        .collect()
}

/// Long-form date for the page header, e.g. `Monday, October 19, 2026`.
pub fn date_label<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%A, %B %-d, %Y").to_string()
}

fn degrees(value: f64) -> String {
    format!("{}°", round_half_up(value))
}

fn clock_time<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.with_timezone(tz).format("%I:%M %p").to_string()
}

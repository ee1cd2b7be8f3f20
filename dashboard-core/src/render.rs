use crate::{present::ForecastCard, theme::Theme};

/// Named display slots the dashboard writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    City,
    Temperature,
    Description,
    Icon,
    Date,
    FeelsLike,
    Humidity,
    WindSpeed,
    Visibility,
    Pressure,
    UvIndex,
    Cloudiness,
    Sunrise,
    Sunset,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::City => "City",
            Field::Temperature => "Temperature",
            Field::Description => "Conditions",
            Field::Icon => "Icon",
            Field::Date => "Date",
            Field::FeelsLike => "Feels like",
            Field::Humidity => "Humidity",
            Field::WindSpeed => "Wind",
            Field::Visibility => "Visibility",
            Field::Pressure => "Pressure",
            Field::UvIndex => "UV index",
            Field::Cloudiness => "Cloudiness",
            Field::Sunrise => "Sunrise",
            Field::Sunset => "Sunset",
        }
    }
}

/// Surface the dashboard renders into. Implementations own layout and
/// styling; the dashboard only assigns values.
pub trait RenderTarget: Send {
    fn set_field(&mut self, field: Field, value: &str);

    fn set_loading(&mut self, loading: bool);

    fn show_error(&mut self, message: &str);

    fn hide_error(&mut self);

    /// Replaces the whole forecast list.
    fn set_forecast(&mut self, cards: &[ForecastCard]);

    /// Replaces the forecast list with an inline message.
    fn set_forecast_error(&mut self, message: &str);

    /// Replaces any previously applied theme.
    fn apply_theme(&mut self, theme: &Theme);
}

use std::{collections::HashMap, fmt::Write as _};

use dashboard_core::{Field, ForecastCard, RenderTarget, Theme};

const DETAIL_FIELDS: [Field; 9] = [
    Field::FeelsLike,
    Field::Humidity,
    Field::WindSpeed,
    Field::Visibility,
    Field::Pressure,
    Field::UvIndex,
    Field::Cloudiness,
    Field::Sunrise,
    Field::Sunset,
];

/// Keeps the latest value of every slot and prints the panel on demand.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    fields: HashMap<Field, String>,
    loading: bool,
    error: Option<String>,
    forecast: Vec<ForecastCard>,
    forecast_error: Option<String>,
    theme: Theme,
}

impl TerminalRenderer {
    fn field(&self, field: Field) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("--")
    }

    pub fn print(&self) {
        println!("{}", self.to_text());
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();

        if self.loading {
            out.push_str("Loading...\n");
        }
        if let Some(error) = &self.error {
            let _ = writeln!(out, "! {error}");
        }

        // Nothing fetched yet.
        if !self.fields.contains_key(&Field::City) {
            return out;
        }

        let _ = writeln!(out, "== {} ==  {}", self.field(Field::City), self.field(Field::Date));
        let _ = writeln!(
            out,
            "{}  {}",
            self.field(Field::Temperature),
            self.field(Field::Description)
        );
        let _ = writeln!(out, "{}", self.field(Field::Icon));

        for field in DETAIL_FIELDS {
            let _ = writeln!(out, "  {:<12}{}", field.label(), self.field(field));
        }

        let classes: Vec<_> = self.theme.classes().iter().map(|c| c.as_str()).collect();
        let _ = writeln!(out, "  {:<12}{}", "Theme", classes.join(" "));

        out.push_str("\n5-day forecast\n");
        match &self.forecast_error {
            Some(message) => {
                let _ = writeln!(out, "  {message}");
            }
            None => {
                for card in &self.forecast {
                    let _ = writeln!(
                        out,
                        "  {:<12}{:>8}  {}",
                        card.date, card.temperature, card.description
                    );
                }
            }
        }

        out
    }
}

impl RenderTarget for TerminalRenderer {
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
        self.theme = theme.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_renderer_prints_only_status() {
        let mut renderer = TerminalRenderer::default();
        renderer.show_error("Please enter a city name");

        assert_eq!(renderer.to_text(), "! Please enter a city name\n");
    }

    #[test]
    fn panel_lists_details_and_forecast() {
        let mut renderer = TerminalRenderer::default();
        renderer.set_field(Field::City, "Paris");
        renderer.set_field(Field::Temperature, "22°");
        renderer.set_field(Field::UvIndex, "N/A");
        renderer.set_forecast(&[ForecastCard {
            date: "Fri, Mar 20".into(),
            icon_url: String::new(),
            temperature: "10.0°C".into(),
            description: "clear sky".into(),
        }]);

        let text = renderer.to_text();
        assert!(text.starts_with("== Paris =="));
        assert!(text.contains("UV index    N/A"));
        assert!(text.contains("Fri, Mar 20"));
        assert!(text.contains("clear sky"));
    }

    #[test]
    fn forecast_error_replaces_cards() {
        let mut renderer = TerminalRenderer::default();
        renderer.set_field(Field::City, "Paris");
        renderer.set_forecast(&[ForecastCard {
            date: "Fri, Mar 20".into(),
            icon_url: String::new(),
            temperature: "10.0°C".into(),
            description: "clear sky".into(),
        }]);
        renderer.set_forecast_error("Unable to load forecast data");

        let text = renderer.to_text();
        assert!(text.contains("Unable to load forecast data"));
        assert!(!text.contains("clear sky"));
    }
}

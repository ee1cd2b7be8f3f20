//! Background theme heuristics. These are hand-tuned rules, and the
//! precedence below is load-bearing: temperature band first, then the
//! condition fallback (which consults the chosen band), then the night
//! overlay.

use crate::model::Condition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeClass {
    TempCold,
    TempCool,
    TempModerate,
    TempWarm,
    TempHot,
    TempExtreme,
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Night,
}

impl ThemeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeClass::TempCold => "temp-cold",
            ThemeClass::TempCool => "temp-cool",
            ThemeClass::TempModerate => "temp-moderate",
            ThemeClass::TempWarm => "temp-warm",
            ThemeClass::TempHot => "temp-hot",
            ThemeClass::TempExtreme => "temp-extreme",
            ThemeClass::Sunny => "weather-bg-sunny",
            ThemeClass::Cloudy => "weather-bg-cloudy",
            ThemeClass::Rainy => "weather-bg-rainy",
            ThemeClass::Snowy => "weather-bg-snowy",
            ThemeClass::Night => "weather-bg-night",
        }
    }

    pub fn is_temperature_band(&self) -> bool {
        matches!(
            self,
            ThemeClass::TempCold
                | ThemeClass::TempCool
                | ThemeClass::TempModerate
                | ThemeClass::TempWarm
                | ThemeClass::TempHot
                | ThemeClass::TempExtreme
        )
    }
}

impl std::fmt::Display for ThemeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered set of classes for one render. Built from scratch on each call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Theme {
    classes: Vec<ThemeClass>,
}

impl Theme {
    pub fn classes(&self) -> &[ThemeClass] {
        &self.classes
    }

    pub fn contains(&self, class: ThemeClass) -> bool {
        self.classes.contains(&class)
    }

    pub fn band(&self) -> Option<ThemeClass> {
        self.classes.iter().copied().find(ThemeClass::is_temperature_band)
    }

    fn add(&mut self, class: ThemeClass) {
        if !self.contains(class) {
            self.classes.push(class);
        }
    }
}

/// Inclusive upper bounds; a NaN temperature matches no band.
pub fn temperature_band(temperature_c: f64) -> Option<ThemeClass> {
    if temperature_c <= 0.0 {
        Some(ThemeClass::TempCold)
    } else if temperature_c <= 10.0 {
        Some(ThemeClass::TempCool)
    } else if temperature_c <= 20.0 {
        Some(ThemeClass::TempModerate)
    } else if temperature_c <= 30.0 {
        Some(ThemeClass::TempWarm)
    } else if temperature_c <= 35.0 {
        Some(ThemeClass::TempHot)
    } else if temperature_c > 35.0 {
        Some(ThemeClass::TempExtreme)
    } else {
        None
    }
}

pub fn is_night(hour: u32) -> bool {
    hour < 6 || hour > 18
}

pub fn select(condition: &Condition, temperature_c: f64, hour: u32) -> Theme {
    let mut theme = Theme::default();

    if let Some(band) = temperature_band(temperature_c) {
        theme.add(band);
    }

    match condition {
        Condition::Clear => {
            let already_bright = theme.contains(ThemeClass::TempWarm)
                || theme.contains(ThemeClass::TempHot)
                || theme.contains(ThemeClass::TempExtreme);
            if !already_bright {
                theme.add(ThemeClass::Sunny);
            }
        }
        Condition::Clouds => {
            if !theme.contains(ThemeClass::TempCold) && !theme.contains(ThemeClass::TempCool) {
                theme.add(ThemeClass::Cloudy);
            }
        }
        Condition::Rain | Condition::Drizzle | Condition::Thunderstorm => {
            theme.add(ThemeClass::Rainy)
        }
        Condition::Snow => theme.add(ThemeClass::Snowy),
        Condition::Other(_) => {
            if theme.classes.is_empty() {
                theme.add(ThemeClass::Cloudy);
            }
        }
    }

    if is_night(hour) {
        theme.add(ThemeClass::Night);
    }

    theme
}

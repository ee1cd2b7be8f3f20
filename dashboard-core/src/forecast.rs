//! Collapses the provider's 3-hourly forecast list into one summary per day.

use chrono::{NaiveDate, Timelike};

use crate::model::{DayForecast, ForecastEntry};

/// Number of future days shown.
pub const FORECAST_DAYS: usize = 5;

const MIDDAY: i64 = 12;

/// Groups entries by calendar date and summarises each day.
///
/// The first date group is treated as today and skipped: the provider always
/// starts the list with the current day, so no comparison against the local
/// clock is made. Up to [`FORECAST_DAYS`] following groups are kept in the
/// order they first appear.
pub fn aggregate(entries: &[ForecastEntry]) -> Vec<DayForecast> {
    let mut buckets: Vec<(NaiveDate, Vec<&ForecastEntry>)> = Vec::new();

    for entry in entries {
        let date = entry.timestamp.date();
        match buckets.iter_mut().find(|(d, _)| *d == date) {
            Some((_, samples)) => samples.push(entry),
            None => buckets.push((date, vec![entry])),
        }
    }

    buckets
        .into_iter()
        .skip(1)
        .take(FORECAST_DAYS)
        .filter_map(|(date, samples)| summarize(date, &samples))
        .collect()
}

fn summarize(date: NaiveDate, samples: &[&ForecastEntry]) -> Option<DayForecast> {
    let (first, rest) = samples.split_first()?;

    let total: f64 = samples.iter().map(|s| s.temperature_c).sum();
    let avg_temperature_c = total / samples.len() as f64;

    // Strict comparison: ties keep the earlier sample.
    let representative = rest.iter().fold(*first, |best, candidate| {
        if distance_from_midday(candidate) < distance_from_midday(best) {
            candidate
        } else {
            best
        }
    });

    Some(DayForecast {
        date,
        avg_temperature_c,
        icon: representative.icon.clone(),
        description: representative.description.clone(),
    })
}

fn distance_from_midday(entry: &ForecastEntry) -> i64 {
    (i64::from(entry.timestamp.hour()) - MIDDAY).abs()
}

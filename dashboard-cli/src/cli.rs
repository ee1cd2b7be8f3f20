use std::{future::Future, io::Write as _, time::Duration};

use anyhow::Context;
use clap::{Parser, Subcommand};
use dashboard_core::{
    Config, Coordinates, Dashboard, FetchError, OpenWeatherProvider, Session, SnapshotStore,
    TriggerError, WeatherApi, provider_from_config,
};
use futures::{
    StreamExt,
    future::{FutureExt, LocalBoxFuture},
    stream::FuturesUnordered,
};
use inquire::{Password, PasswordDisplayMode, Text};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    time::{Instant, interval_at},
};
use tracing::warn;

use crate::terminal::TerminalRenderer;

type TerminalDashboard = Dashboard<OpenWeatherProvider, TerminalRenderer>;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dash", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the default city.
    Configure,

    /// Show current conditions and the 5-day forecast once.
    Show {
        /// City name; defaults to the configured city.
        city: Option<String>,
    },

    /// Show weather for a coordinate pair.
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Keep the dashboard open. Type a city to search, `r` to retry, `q` to quit.
    Watch {
        /// City name; defaults to the configured city.
        city: Option<String>,
    },
}

/// A dashboard trigger issued from the watch loop.
#[derive(Debug, Clone)]
enum Trigger {
    Startup,
    Refresh,
    Retry,
    Search(String),
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => {
                let config = Config::load()?;
                let dash = build_dashboard(&config)?;
                let session = Session::new(city.unwrap_or_else(|| config.default_city.clone()));

                let outcome = dash.startup(&session).await;
                if let Err(TriggerError::Fetch(FetchError::Network(_))) = &outcome {
                    if dash.restore_saved().is_some() {
                        println!("(offline: showing the last saved conditions)");
                    }
                }
                dash.target().print();

                outcome.map(|_| ()).map_err(Into::into)
            }
            Command::Locate { lat, lon } => {
                let config = Config::load()?;
                let dash = build_dashboard(&config)?;
                let session = Session::new(config.default_city.clone());

                let outcome = dash.geolocated(&session, Ok(Coordinates { lat, lon })).await;
                dash.target().print();

                outcome.map(|_| ()).map_err(Into::into)
            }
            Command::Watch { city } => {
                let config = Config::load()?;
                let dash = build_dashboard(&config)?;
                let session = Session::new(city.unwrap_or_else(|| config.default_city.clone()));
                let stdin = BufReader::new(tokio::io::stdin());
                let shutdown = async {
                    if let Err(err) = tokio::signal::ctrl_c().await {
                        warn!(error = %err, "could not listen for ctrl-c");
                        std::future::pending::<()>().await;
                    }
                };

                watch(&dash, session, stdin, config.refresh_interval(), shutdown).await?;
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;

    config.api_key = Some(api_key.trim().to_string());
    config.default_city = default_city.trim().to_string();
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn build_dashboard(config: &Config) -> anyhow::Result<TerminalDashboard> {
    let provider = provider_from_config(config)?;

    let dash = Dashboard::new(provider, TerminalRenderer::default());
    match SnapshotStore::open_default() {
        Ok(store) => Ok(dash.with_store(store)),
        Err(err) => {
            warn!(error = %err, "snapshot store unavailable");
            Ok(dash)
        }
    }
}

fn launch<A: WeatherApi>(
    dash: &Dashboard<A, TerminalRenderer>,
    trigger: Trigger,
    session: Session,
) -> LocalBoxFuture<'_, Result<Session, TriggerError>> {
    async move {
        match trigger {
            Trigger::Startup => dash.startup(&session).await,
            Trigger::Refresh => dash.refresh(&session).await,
            Trigger::Retry => dash.retry(&session).await,
            Trigger::Search(query) => dash.search(&session, &query).await,
        }
    }
    .boxed_local()
}

fn prompt() {
    print!("city / r / q > ");
    let _ = std::io::stdout().flush();
}

/// Interactive loop: startup, periodic refresh, and one trigger per input
/// line. Triggers run concurrently with each other and with `shutdown`; the
/// dashboard's generation guard keeps a slow, older request from overwriting
/// a newer one. At end of input, in-flight triggers are drained before
/// returning. Returns the final session.
pub async fn watch<A, I, S>(
    dash: &Dashboard<A, TerminalRenderer>,
    mut session: Session,
    input: I,
    refresh_every: Duration,
    shutdown: S,
) -> anyhow::Result<Session>
where
    A: WeatherApi,
    I: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
{
    let mut lines = input.lines();
    let mut input_open = true;
    let mut inflight = FuturesUnordered::new();
    inflight.push(launch(dash, Trigger::Startup, session.clone()));

    // Startup already covers the first period.
    let mut ticker = interval_at(Instant::now() + refresh_every, refresh_every);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            Some(outcome) = inflight.next(), if !inflight.is_empty() => {
                if let Ok(next) = outcome {
                    session = next;
                }
                dash.target().print();
                if !input_open && inflight.is_empty() {
                    break;
                }
                prompt();
            }
            _ = ticker.tick() => inflight.push(launch(dash, Trigger::Refresh, session.clone())),
            line = lines.next_line(), if input_open => match line.context("Failed to read input")? {
                None => {
                    input_open = false;
                    if inflight.is_empty() {
                        break;
                    }
                }
                Some(line) => {
                    let trigger = match line.trim() {
                        "q" | "quit" => break,
                        "r" | "retry" => Trigger::Retry,
                        query => Trigger::Search(query.to_string()),
                    };
                    inflight.push(launch(dash, trigger, session.clone()));
                }
            },
        }
    }

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use dashboard_core::{Condition, ForecastEntry, UvReading, WeatherSnapshot};

    const HOUR: Duration = Duration::from_secs(3600);

    /// Answers instantly, except `Paris` (slow) and `Stuck` (never).
    #[derive(Debug)]
    struct ScriptedApi;

    fn snapshot(city: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            city: city.to_string(),
            coord: Coordinates { lat: 0.0, lon: 0.0 },
            temperature_c: 18.0,
            feels_like_c: 17.0,
            humidity_pct: 50,
            wind_speed_mps: 2.0,
            visibility_m: Some(10_000.0),
            pressure_hpa: 1012,
            cloudiness_pct: 0,
            condition: Condition::Clear,
            description: "clear sky".into(),
            icon: "01d".into(),
            sunrise: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            sunset: Utc.timestamp_opt(1_700_040_000, 0).unwrap(),
        }
    }

    #[async_trait]
    impl WeatherApi for ScriptedApi {
        async fn current_by_name(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
            match city {
                "Stuck" => std::future::pending().await,
                "Paris" => tokio::time::sleep(Duration::from_millis(200)).await,
                _ => {}
            }
            Ok(snapshot(city))
        }

        async fn current_by_coords(&self, _coord: Coordinates) -> Result<WeatherSnapshot, FetchError> {
            Err(FetchError::NotFound)
        }

        async fn uv_index(&self, _coord: Coordinates) -> UvReading {
            UvReading::absent()
        }

        async fn forecast_by_name(&self, _city: &str) -> Result<Vec<ForecastEntry>, FetchError> {
            Ok(Vec::new())
        }
    }

    fn dashboard() -> Dashboard<ScriptedApi, TerminalRenderer> {
        Dashboard::new(ScriptedApi, TerminalRenderer::default())
    }

    #[tokio::test]
    async fn shutdown_interrupts_a_hanging_search() {
        let dash = dashboard();
        let shutdown = tokio::time::sleep(Duration::from_millis(50));

        let session = tokio::time::timeout(
            Duration::from_secs(2),
            watch(&dash, Session::new("Rome"), &b"Stuck\n"[..], HOUR, shutdown),
        )
        .await
        .expect("watch returned after shutdown")
        .unwrap();

        assert_eq!(session.city(), "Rome");
    }

    #[tokio::test]
    async fn quit_does_not_wait_for_a_hanging_search() {
        let dash = dashboard();

        let session = tokio::time::timeout(
            Duration::from_secs(2),
            watch(
                &dash,
                Session::new("Rome"),
                &b"Stuck\nq\n"[..],
                HOUR,
                std::future::pending(),
            ),
        )
        .await
        .expect("watch returned on quit")
        .unwrap();

        assert_eq!(session.city(), "Rome");
    }

    #[tokio::test]
    async fn newer_search_wins_over_slower_earlier_one() {
        let dash = dashboard();

        let session = tokio::time::timeout(
            Duration::from_secs(2),
            watch(
                &dash,
                Session::new("London"),
                &b"Paris\nRome\n"[..],
                HOUR,
                std::future::pending(),
            ),
        )
        .await
        .expect("watch drained in-flight searches")
        .unwrap();

        assert_eq!(session.city(), "Rome");
        assert!(dash.target().to_text().contains("== Rome =="));
    }
}

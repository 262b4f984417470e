use std::env;

use anyhow::Context;
use migration::{Migrator, MigratorTrait};

use crate::{prelude::*, sv};

#[derive(Debug, Clone)]
pub struct Config {
  pub database_url: String,
  pub port: u16,
  /// Period of the reconciliation sweep, zero disables it.
  pub sweep_interval: Duration,
  pub expiring_window_days: u32,
}

impl Config {
  pub fn from_env() -> anyhow::Result<Self> {
    Self::from_vars(|key| env::var(key).ok())
  }

  pub fn from_vars(
    var: impl Fn(&str) -> Option<String>,
  ) -> anyhow::Result<Self> {
    let database_url =
      var("DATABASE_URL").unwrap_or_else(|| "sqlite:xtream.db?mode=rwc".into());

    let port = match var("PORT") {
      Some(port) => port.trim().parse().context("Invalid PORT")?,
      None => 3000,
    };

    let sweep_interval = match var("SWEEP_INTERVAL") {
      Some(interval) => humantime::parse_duration(interval.trim())
        .context("Invalid SWEEP_INTERVAL")?,
      None => Duration::from_secs(15 * 60),
    };

    let expiring_window_days = match var("EXPIRING_WINDOW_DAYS") {
      Some(days) => {
        days.trim().parse().context("Invalid EXPIRING_WINDOW_DAYS")?
      }
      None => 7,
    };

    Ok(Self { database_url, port, sweep_interval, expiring_window_days })
  }
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub config: Config,
  pub plans: sv::PlanTable,
}

impl AppState {
  pub async fn new(config: Config) -> anyhow::Result<Self> {
    let db = Database::connect(config.database_url.as_str())
      .await
      .context("Failed to connect to database")?;

    Migrator::up(&db, None).await.context("Failed to run migrations")?;

    Ok(Self { db, config, plans: sv::PlanTable::default() })
  }

  pub fn sv(&self) -> sv::Services<'_> {
    sv::Services::new(&self.db, &self.plans)
  }
}

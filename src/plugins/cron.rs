use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::{self, MissedTickBehavior};

use crate::{
  plugins::Plugin,
  prelude::*,
  state::AppState,
  sv::Sweep,
  utils::{format_date, format_remaining},
};

/// Periodically reconciles stored statuses with plan end dates.
pub struct Reconcile;

#[async_trait]
impl Plugin for Reconcile {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let period = app.config.sweep_interval;
    if period.is_zero() {
      info!("Reconcile disabled via config (0 interval)");
      return Ok(());
    }

    info!(
      "Reconcile started (interval: {})",
      humantime::format_duration(period)
    );

    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
      interval.tick().await;

      if let Err(err) = run_reconcile(&app).await {
        error!("Reconcile failed: {err}");
      }
    }
  }
}

async fn run_reconcile(app: &AppState) -> anyhow::Result<()> {
  let sv = app.sv();

  let changed = Sweep::new(&sv.account).run().await?;
  if changed > 0 {
    info!("Reconcile: {changed} account(s) changed");
  }

  let window = app.config.expiring_window_days;
  let expiring = sv.account.expiring(window).await?;
  if expiring.is_empty() {
    return Ok(());
  }

  info!("{} account(s) expire within {window} day(s)", expiring.len());
  for alert in &expiring {
    debug!(
      "{:?} {} ends {} ({})",
      alert.account.kind,
      alert.account.id,
      format_date(alert.account.end_date),
      format_remaining(alert.days_remaining)
    );
  }

  Ok(())
}

use async_trait::async_trait;
use serde::Serialize;

use crate::{prelude::*, sv::period};

pub const TRIAL_PLAN: &str = "Demo (24 Hrs)";

/// Fallback for plans nobody can resolve.
pub const DEFAULT_MONTHS: u32 = 1;

const BUILTIN: &[(&str, u32)] = &[
  (TRIAL_PLAN, 0),
  ("1 Mes", 1),
  ("3 Meses", 3),
  ("4 Meses", 4),
  ("6 Meses", 6),
  ("7 Meses", 7),
  ("12 Meses", 12),
  ("14 Meses", 14),
];

/// Source of custom plan durations.
#[async_trait]
pub trait PlanLookup: Send + Sync {
  async fn months_for_plan(&self, name: &str) -> Result<Option<u32>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanDefinition {
  pub name: String,
  pub months: u32,
  pub is_custom: bool,
}

/// Immutable table of built-in plans.
#[derive(Debug, Clone)]
pub struct PlanTable {
  months: HashMap<String, u32>,
}

impl Default for PlanTable {
  fn default() -> Self {
    Self::new(BUILTIN.iter().copied())
  }
}

impl PlanTable {
  pub fn new<S: Into<String>>(
    plans: impl IntoIterator<Item = (S, u32)>,
  ) -> Self {
    let months = plans.into_iter().map(|(name, m)| (name.into(), m)).collect();
    Self { months }
  }

  pub fn get(&self, name: &str) -> Option<u32> {
    self.months.get(name).copied()
  }

  pub fn contains(&self, name: &str) -> bool {
    self.months.contains_key(name)
  }

  /// Built-in plans ordered by duration.
  pub fn definitions(&self) -> Vec<PlanDefinition> {
    let mut plans: Vec<_> = self
      .months
      .iter()
      .map(|(name, &months)| PlanDefinition {
        name: name.clone(),
        months,
        is_custom: false,
      })
      .collect();
    plans.sort_by(|a, b| a.months.cmp(&b.months).then(a.name.cmp(&b.name)));
    plans
  }

  /// Months for `name` without consulting any lookup.
  /// Unknown plans silently count as [`DEFAULT_MONTHS`].
  pub fn months(&self, name: &str) -> u32 {
    self.get(name).unwrap_or(DEFAULT_MONTHS)
  }

  /// Non-blocking end date, for callers that can't wait on the catalog.
  pub fn end_date(&self, name: &str, start: Option<DateTime>) -> DateTime {
    let start = start.unwrap_or_else(|| Utc::now().naive_utc());
    period::plan_end(start, self.months(name))
  }
}

/// Resolves plan names using the built-in table first and `lookup` second.
pub struct Catalog<'a, L> {
  table: &'a PlanTable,
  lookup: L,
}

impl<'a, L: PlanLookup> Catalog<'a, L> {
  pub fn new(table: &'a PlanTable, lookup: L) -> Self {
    Self { table, lookup }
  }

  /// Never fails: lookup errors and unknown plans resolve to
  /// [`DEFAULT_MONTHS`] so date computation can't block on the catalog.
  pub async fn resolve_months(&self, name: &str) -> u32 {
    if let Some(months) = self.table.get(name) {
      return months;
    }

    match self.lookup.months_for_plan(name).await {
      Ok(Some(months)) => months,
      Ok(None) => {
        warn!("Unknown plan `{name}`, using {DEFAULT_MONTHS} month(s)");
        DEFAULT_MONTHS
      }
      Err(err) => {
        let err = Error::CatalogUnavailable(err.to_string());
        warn!("{err}, using {DEFAULT_MONTHS} month(s) for `{name}`");
        DEFAULT_MONTHS
      }
    }
  }

  pub async fn end_date(
    &self,
    name: &str,
    start: Option<DateTime>,
  ) -> DateTime {
    let start = start.unwrap_or_else(|| Utc::now().naive_utc());
    period::plan_end(start, self.resolve_months(name).await)
  }
}

use crate::prelude::*;

pub fn format_date(date: DateTime) -> String {
  date.format("%d.%m.%Y %H:%M").to_string()
}

pub fn format_remaining(days: i64) -> String {
  match days {
    d if d < 0 => format!("expired {}d ago", -d),
    0 => "expires today".to_string(),
    1 => "1 day left".to_string(),
    d => format!("{d} days left"),
  }
}

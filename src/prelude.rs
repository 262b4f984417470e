pub use std::{collections::HashMap, sync::Arc, time::Duration};

pub use chrono::{Days, Months, NaiveDateTime as DateTime, TimeDelta, Utc};
pub use sea_orm::{
  ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, Database,
  DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
  Set, TransactionTrait,
};
pub use tracing::{debug, error, info, trace, warn};
pub use uuid::Uuid;

pub use crate::error::{Error, Result};

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use uuid::Uuid;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("database error: {0}")]
  Db(#[from] sea_orm::DbErr),
  #[error("account not found")]
  RecordNotFound,
  /// The canonical status write failed or reported no success.
  /// `signal` holds whatever the backend returned.
  #[error("could not update status of {id}: {signal}")]
  Sync { id: Uuid, signal: String },
  #[error("plan catalog unavailable: {0}")]
  CatalogUnavailable(String),
  #[error("email `{0}` is already registered")]
  EmailExists(String),
  #[error("plan `{0}` not found")]
  PlanNotFound(String),
  #[error("plan `{0}` already exists")]
  PlanExists(String),
  #[error("plan `{0}` is assigned to {1} account(s)")]
  PlanInUse(String, u64),
  #[error("invalid arguments: {0}")]
  InvalidArgs(String),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Self::RecordNotFound | Self::PlanNotFound(_) => StatusCode::NOT_FOUND,
      Self::EmailExists(_) | Self::PlanExists(_) | Self::PlanInUse(..) => {
        StatusCode::CONFLICT
      }
      Self::InvalidArgs(_) => StatusCode::UNPROCESSABLE_ENTITY,
      Self::Sync { .. } | Self::CatalogUnavailable(_) => {
        StatusCode::BAD_GATEWAY
      }
      Self::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let msg = match &self {
      Self::Sync { .. } => "could not update status".to_string(),
      Self::Db(_) => "internal error".to_string(),
      other => other.to_string(),
    };

    if status.is_server_error() {
      tracing::error!("request failed: {self}");
    }

    (status, Json(json::json!({ "success": false, "msg": msg })))
      .into_response()
  }
}

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
  entity::{client, plan, reseller},
  prelude::*,
  state::AppState,
  sv::{
    Sweep, SyncReport, account::ExpiringAccount, account::Subscription,
    catalog::PlanDefinition,
  },
};

type App = State<Arc<AppState>>;

#[derive(Serialize)]
pub struct Status {
  success: bool,
  msg: Option<String>,
}

pub async fn health() -> Json<Status> {
  Json(Status { success: true, msg: None })
}

#[derive(Serialize)]
pub struct SweepResponse {
  changed: u64,
}

pub async fn sweep(State(app): App) -> Result<Json<SweepResponse>> {
  let changed = Sweep::new(&app.sv().account).run().await?;
  Ok(Json(SweepResponse { changed }))
}

pub async fn expiring(State(app): App) -> Result<Json<Vec<ExpiringAccount>>> {
  let window = app.config.expiring_window_days;
  Ok(Json(app.sv().account.expiring(window).await?))
}

pub async fn account(
  State(app): App,
  Path(id): Path<Uuid>,
) -> Result<Json<Subscription>> {
  Ok(Json(app.sv().account.get(id).await?))
}

pub async fn sync(
  State(app): App,
  Path(id): Path<Uuid>,
) -> Result<Json<SyncReport>> {
  Ok(Json(app.sv().account.resync(id).await?))
}

pub async fn activate(
  State(app): App,
  Path(id): Path<Uuid>,
) -> Result<Json<SyncReport>> {
  Ok(Json(app.sv().account.activate(id).await?))
}

#[derive(Deserialize)]
pub struct RenewReq {
  plan: Option<String>,
}

pub async fn renew(
  State(app): App,
  Path(id): Path<Uuid>,
  Json(req): Json<RenewReq>,
) -> Result<Json<SyncReport>> {
  Ok(Json(app.sv().account.renew(id, req.plan.as_deref()).await?))
}

#[derive(Deserialize)]
pub struct ChangePlanReq {
  plan: String,
  end_date: Option<DateTime>,
}

pub async fn change_plan(
  State(app): App,
  Path(id): Path<Uuid>,
  Json(req): Json<ChangePlanReq>,
) -> Result<Json<SyncReport>> {
  let report =
    app.sv().account.change_plan(id, &req.plan, req.end_date).await?;
  Ok(Json(report))
}

#[derive(Deserialize)]
pub struct CreateResellerReq {
  email: String,
  full_name: Option<String>,
  plan: String,
  start_date: Option<DateTime>,
}

pub async fn create_reseller(
  State(app): App,
  Json(req): Json<CreateResellerReq>,
) -> Result<(StatusCode, Json<reseller::Model>)> {
  let reseller = app
    .sv()
    .account
    .create_reseller(&req.email, req.full_name, &req.plan, req.start_date)
    .await?;
  Ok((StatusCode::CREATED, Json(reseller)))
}

#[derive(Deserialize)]
pub struct CreateClientReq {
  reseller_id: Option<Uuid>,
  name: String,
  phone: Option<String>,
  plan: String,
  start_date: Option<DateTime>,
}

pub async fn create_client(
  State(app): App,
  Json(req): Json<CreateClientReq>,
) -> Result<(StatusCode, Json<client::Model>)> {
  let client = app
    .sv()
    .account
    .create_client(
      req.reseller_id,
      &req.name,
      req.phone,
      &req.plan,
      req.start_date,
    )
    .await?;
  Ok((StatusCode::CREATED, Json(client)))
}

pub async fn plans(State(app): App) -> Result<Json<Vec<PlanDefinition>>> {
  Ok(Json(app.sv().plan.all().await?))
}

#[derive(Deserialize)]
pub struct CreatePlanReq {
  name: String,
  months: u32,
}

pub async fn create_plan(
  State(app): App,
  Json(req): Json<CreatePlanReq>,
) -> Result<(StatusCode, Json<plan::Model>)> {
  let plan = app.sv().plan.create(&req.name, req.months).await?;
  Ok((StatusCode::CREATED, Json(plan)))
}

pub async fn delete_plan(
  State(app): App,
  Path(name): Path<String>,
) -> Result<Json<Status>> {
  app.sv().plan.delete(&name).await?;
  Ok(Json(Status { success: true, msg: None }))
}

#[cfg(test)]
mod tests {
  use axum::{
    body::{Body, to_bytes},
    http::Request,
  };
  use tower::ServiceExt;

  use super::*;
  use crate::{
    plugins::server::router,
    state::Config,
    sv::{PlanTable, test_utils::test_db},
  };

  async fn app() -> Arc<AppState> {
    let config = Config::from_vars(|_| None).unwrap();
    Arc::new(AppState {
      db: test_db::setup().await,
      config,
      plans: PlanTable::default(),
    })
  }

  async fn call(
    app: &Arc<AppState>,
    method: &str,
    uri: &str,
    body: json::Value,
  ) -> (StatusCode, json::Value) {
    let req = Request::builder()
      .method(method)
      .uri(uri)
      .header("content-type", "application/json")
      .body(Body::from(body.to_string()))
      .unwrap();

    let res = router(app.clone()).oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, json::from_slice(&bytes).unwrap_or(json::Value::Null))
  }

  #[tokio::test]
  async fn test_reseller_flow() {
    let app = app().await;

    let (status, reseller) = call(
      &app,
      "POST",
      "/api/resellers",
      json::json!({ "email": "x@example.com", "plan": "3 Meses" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(reseller["status"], "pending");

    let id = reseller["id"].as_str().unwrap();
    let (status, report) = call(
      &app,
      "POST",
      &format!("/api/accounts/{id}/activate"),
      json::Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["written"], "active");

    let (_, sweep) = call(&app, "POST", "/api/sweep", json::Value::Null).await;
    assert_eq!(sweep["changed"], 0);
  }

  #[tokio::test]
  async fn test_client_renew_and_plan_change() {
    let app = app().await;

    let (status, client) = call(
      &app,
      "POST",
      "/api/clients",
      json::json!({
        "name": "Marta",
        "phone": "+34600000000",
        "plan": "1 Mes",
        "start_date": "2020-01-01T10:00:00",
      }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(client["status"], "inactive");

    let id = client["id"].as_str().unwrap();
    let (status, report) = call(
      &app,
      "POST",
      &format!("/api/accounts/{id}/renew"),
      json::json!({ "plan": "3 Meses" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["written"], "active");

    let (status, report) = call(
      &app,
      "POST",
      &format!("/api/accounts/{id}/plan"),
      json::json!({ "plan": "6 Meses", "end_date": "2020-02-01T10:00:00" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["written"], "inactive");

    let (_, account) =
      call(&app, "GET", &format!("/api/accounts/{id}"), json::Value::Null)
        .await;
    assert_eq!(account["plan_name"], "6 Meses");
    assert_eq!(account["end_date"], "2020-02-01T10:00:00");
  }

  #[tokio::test]
  async fn test_expiring_lists_trials() {
    let app = app().await;

    for (name, plan) in [("Trial", "Demo (24 Hrs)"), ("Year", "12 Meses")] {
      let (status, _) = call(
        &app,
        "POST",
        "/api/clients",
        json::json!({ "name": name, "plan": plan }),
      )
      .await;
      assert_eq!(status, StatusCode::CREATED);
    }

    let (status, expiring) =
      call(&app, "GET", "/api/accounts/expiring", json::Value::Null).await;
    assert_eq!(status, StatusCode::OK);

    let expiring = expiring.as_array().unwrap();
    assert_eq!(expiring.len(), 1);
    assert_eq!(expiring[0]["kind"], "client");
    assert_eq!(expiring[0]["days_remaining"], 1);
  }

  #[tokio::test]
  async fn test_duplicate_reseller_is_409() {
    let app = app().await;
    let body = json::json!({ "email": "dup@example.com", "plan": "1 Mes" });

    let (status, _) = call(&app, "POST", "/api/resellers", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&app, "POST", "/api/resellers", body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
  }

  #[tokio::test]
  async fn test_unknown_account_is_404() {
    let app = app().await;
    let uri = format!("/api/accounts/{}/sync", Uuid::new_v4());

    let (status, body) = call(&app, "POST", &uri, json::Value::Null).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
  }

  #[tokio::test]
  async fn test_plan_admin() {
    let app = app().await;

    let (status, _) = call(
      &app,
      "POST",
      "/api/plans",
      json::json!({ "name": "Quincena", "months": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call(
      &app,
      "POST",
      "/api/plans",
      json::json!({ "name": "Quincena", "months": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, plans) = call(&app, "GET", "/api/plans", json::Value::Null).await;
    assert!(plans.as_array().unwrap().iter().any(|p| p["name"] == "Quincena"));

    let (status, _) =
      call(&app, "DELETE", "/api/plans/Quincena", json::Value::Null).await;
    assert_eq!(status, StatusCode::OK);
  }
}

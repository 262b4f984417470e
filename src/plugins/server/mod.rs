mod handlers;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use async_trait::async_trait;
use axum::{
  Router,
  routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::{prelude::*, state::AppState};

pub struct Plugin;

pub fn router(app: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(handlers::health))
    .route("/api/sweep", post(handlers::sweep))
    .route("/api/accounts/expiring", get(handlers::expiring))
    .route("/api/accounts/{id}", get(handlers::account))
    .route("/api/accounts/{id}/sync", post(handlers::sync))
    .route("/api/accounts/{id}/activate", post(handlers::activate))
    .route("/api/accounts/{id}/renew", post(handlers::renew))
    .route("/api/accounts/{id}/plan", post(handlers::change_plan))
    .route("/api/resellers", post(handlers::create_reseller))
    .route("/api/clients", post(handlers::create_client))
    .route("/api/plans", get(handlers::plans).post(handlers::create_plan))
    .route("/api/plans/{name}", delete(handlers::delete_plan))
    .with_state(app)
}

#[async_trait]
impl super::Plugin for Plugin {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let governor_conf = Arc::new(
      GovernorConfigBuilder::default()
        .per_second(2)
        .burst_size(100)
        .finish()
        .context("Failed to build rate limiter config")?,
    );

    let governor_limiter = governor_conf.limiter().clone();

    tokio::spawn(async move {
      loop {
        tokio::time::sleep(Duration::from_secs(60)).await;
        governor_limiter.retain_recent();
      }
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], app.config.port));

    let router = router(app)
      .layer(
        ServiceBuilder::new()
          .layer(TraceLayer::new_for_http())
          .layer(GovernorLayer::new(governor_conf))
          .layer(
            CorsLayer::new()
              .allow_origin(Any)
              .allow_methods(Any)
              .allow_headers(Any),
          ),
      )
      .into_make_service_with_connect_info::<SocketAddr>();

    let listener = tokio::net::TcpListener::bind(addr)
      .await
      .with_context(|| format!("Failed to bind {addr}"))?;

    info!("HTTP Server listening on {addr}");
    axum::serve(listener, router).await.context("Server error")?;

    Ok(())
  }
}

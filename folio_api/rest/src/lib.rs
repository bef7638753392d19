use std::{net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::{http::HeaderValue, Router};
use folio_core_forms_contracts::FormFeatureService;
use folio_core_health_contracts::HealthFeatureService;
use folio_utils::Apply;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Forms> {
    health: Health,
    forms: Forms,
    config: RestServerConfig,
}

#[derive(Debug, Clone, Default)]
pub struct RestServerConfig {
    allowed_origins: Option<Arc<[HeaderValue]>>,
}

impl RestServerConfig {
    /// Cross-origin requests are only allowed if `allowed_origins` is not
    /// empty.
    pub fn new(allowed_origins: &[String]) -> anyhow::Result<Self> {
        let allowed_origins = allowed_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid allowed origin: {origin:?}"))
            })
            .collect::<anyhow::Result<Arc<[_]>>>()?;

        Ok(Self {
            allowed_origins: (!allowed_origins.is_empty()).then_some(allowed_origins),
        })
    }
}

impl<Health, Forms> RestServer<Health, Forms>
where
    Health: HealthFeatureService,
    Forms: FormFeatureService,
{
    pub fn new(health: Health, forms: Forms, config: RestServerConfig) -> Self {
        Self {
            health,
            forms,
            config,
        }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        info!("Starting REST API server on {host}:{port}");
        axum::serve(listener, router)
            .await
            .context("Failed to start HTTP server")
    }

    fn router(self) -> Router<()> {
        Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::forms::router(self.forms.into()))
            .apply(middlewares::panic_handler::add)
            .apply(middlewares::trace::add)
            .apply(middlewares::request_id::add)
            .apply_map(self.config.allowed_origins, middlewares::cors::add)
    }
}

//! Module wiring and lifecycle

use crate::auth::TokenService;
use crate::config::Config;
use crate::domain::Service;
use crate::infra::storage::{
    migrations::Migrator, SeaOrmProgressRepository, SeaOrmTerminationRepository,
    SeaOrmUserRepository, SeaOrmVideoRepository,
};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Training service module
#[derive(Default)]
pub struct TrainingServiceModule {
    service: RwLock<Option<Arc<Service>>>,
    tokens: RwLock<Option<Arc<TokenService>>>,
}

impl TrainingServiceModule {
    /// Apply pending schema migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("Training service migrations completed");
        Ok(())
    }

    /// Build repositories, service and token verifier, then seed the
    /// bootstrap administrator if one is configured
    pub async fn init(&self, cfg: Config, db: Arc<DatabaseConnection>) -> Result<()> {
        let users = Arc::new(SeaOrmUserRepository::new(db.clone()));
        let terminations = Arc::new(SeaOrmTerminationRepository::new(db.clone()));
        let videos = Arc::new(SeaOrmVideoRepository::new(db.clone()));
        let progress = Arc::new(SeaOrmProgressRepository::new(db));

        if cfg.uses_default_jwt_secret() {
            tracing::warn!(
                "jwt_secret is not configured; bearer tokens are signed with the built-in development secret"
            );
        }

        let tokens = Arc::new(TokenService::new(&cfg.jwt_secret, cfg.token_ttl_secs));
        let bootstrap_admin = cfg.bootstrap_admin.clone();

        let service = Arc::new(Service::new(users, terminations, videos, progress, cfg));

        if let Some(seed) = bootstrap_admin {
            if let Some(admin) = service.ensure_admin(&seed).await? {
                tracing::info!(user_id = admin.id, username = %admin.username, "bootstrap admin created");
            }
        }

        *self.service.write() = Some(service);
        *self.tokens.write() = Some(tokens);

        tracing::info!("Training service initialized");
        Ok(())
    }

    /// Domain service, available after `init`
    pub fn service(&self) -> Option<Arc<Service>> {
        self.service.read().clone()
    }

    /// Mount the REST routes onto `router`
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self
            .service()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))?;
        let tokens = self
            .tokens
            .read()
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Token service not initialized"))?;

        tracing::info!("Registering training service REST routes");
        Ok(crate::api::rest::routes::register_routes(router, service, tokens))
    }
}

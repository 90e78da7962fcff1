// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        AuditRepository, CrmRepository, DashboardRepository, EventRepository,
        InventoryRepository, OrderRepository, RbacRepository, SettingsRepository,
        UserRepository,
    },
    services::{
        auth::AuthService, crm_service::CrmService, dashboard_service::DashboardService,
        event_service::EventService, inventory_service::InventoryService,
        order_service::OrderService, rbac_service::RbacService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,

    pub auth_service: AuthService,
    pub inventory_service: InventoryService,
    pub order_service: OrderService,
    pub rbac_service: RbacService,
    pub crm_service: CrmService,
    pub event_service: EventService,
    pub dashboard_service: DashboardService,

    // Repos the guards and a few thin handlers talk to directly
    pub user_repo: UserRepository,
    pub rbac_repo: RbacRepository,
    pub audit_repo: AuditRepository,
    pub settings_repo: SettingsRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?;

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("database connection established");

        // --- dependency graph ---
        let user_repo = UserRepository::new(db_pool.clone());
        let rbac_repo = RbacRepository::new(db_pool.clone());
        let audit_repo = AuditRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let crm_repo = CrmRepository::new(db_pool.clone());
        let event_repo = EventRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret, db_pool.clone());
        let inventory_service =
            InventoryService::new(inventory_repo, audit_repo.clone(), db_pool.clone());
        let order_service = OrderService::new(
            order_repo,
            inventory_service.clone(),
            audit_repo.clone(),
            db_pool.clone(),
        );
        let rbac_service =
            RbacService::new(rbac_repo.clone(), audit_repo.clone(), db_pool.clone());
        let crm_service = CrmService::new(crm_repo, audit_repo.clone(), db_pool.clone());
        let event_service = EventService::new(event_repo, audit_repo.clone(), db_pool.clone());
        let dashboard_service = DashboardService::new(dashboard_repo);

        Ok(Self {
            db_pool,
            auth_service,
            inventory_service,
            order_service,
            rbac_service,
            crm_service,
            event_service,
            dashboard_service,
            user_repo,
            rbac_repo,
            audit_repo,
            settings_repo,
        })
    }
}

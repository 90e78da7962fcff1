pub mod audit_repo;
pub mod crm_repo;
pub mod dashboard_repo;
pub mod event_repo;
pub mod inventory_repo;
pub mod order_repo;
pub mod rbac_repo;
pub mod settings_repo;
pub mod user_repo;

pub use audit_repo::AuditRepository;
pub use crm_repo::CrmRepository;
pub use dashboard_repo::DashboardRepository;
pub use event_repo::EventRepository;
pub use inventory_repo::InventoryRepository;
pub use order_repo::OrderRepository;
pub use rbac_repo::RbacRepository;
pub use settings_repo::SettingsRepository;
pub use user_repo::UserRepository;

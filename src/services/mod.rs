pub mod access_control;
pub mod auth;
pub mod crm_service;
pub mod dashboard_service;
pub mod event_service;
pub mod inventory_service;
pub mod ledger;
pub mod order_service;
pub mod rbac_service;

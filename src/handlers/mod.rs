pub mod audit;
pub mod auth;
pub mod crm;
pub mod dashboard;
pub mod events;
pub mod inventory;
pub mod orders;
pub mod rbac;
pub mod settings;
pub mod stock;
pub mod users;

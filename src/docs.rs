// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::get_my_permissions,
        handlers::users::list_users,
        handlers::users::update_user_role,
        handlers::users::set_user_active,

        // --- Inventory ---
        handlers::inventory::list_products,
        handlers::inventory::get_product,
        handlers::inventory::create_product,
        handlers::inventory::update_product,
        handlers::inventory::list_categories,
        handlers::inventory::create_category,
        handlers::inventory::update_category,
        handlers::inventory::delete_category,

        // --- Stock ---
        handlers::stock::create_movement,
        handlers::stock::list_movements,
        handlers::stock::low_stock_report,

        // --- Orders ---
        handlers::orders::create_order,
        handlers::orders::checkout,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::update_order_status,

        // --- Access control ---
        handlers::rbac::list_roles,
        handlers::rbac::list_permissions,
        handlers::rbac::create_role,
        handlers::rbac::update_role,
        handlers::rbac::delete_role,

        // --- Customers ---
        handlers::crm::list_customers,
        handlers::crm::get_customer,
        handlers::crm::create_customer,
        handlers::crm::update_customer,

        // --- Events ---
        handlers::events::list_events,
        handlers::events::create_event,
        handlers::events::register_attendee,
        handlers::events::list_registrations,

        // --- Dashboard ---
        handlers::dashboard::stats,

        // --- Audit ---
        handlers::audit::list_audit_logs,

        // --- Settings ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::UpdateUserRolePayload,
            models::auth::SetUserActivePayload,
            models::auth::AuthResponse,

            // --- Access control ---
            models::rbac::PermissionModule,
            models::rbac::PermissionAction,
            models::rbac::Permission,
            models::rbac::Role,
            models::rbac::CreateRolePayload,
            models::rbac::UpdateRolePayload,

            // --- Inventory ---
            models::inventory::Product,
            models::inventory::ProductWithStatus,
            models::inventory::StockStatus,
            models::inventory::CriticalityTier,
            models::inventory::MovementType,
            models::inventory::StockMovement,
            models::inventory::Category,
            models::inventory::CategoryWithStats,
            models::inventory::CreateProductPayload,
            models::inventory::UpdateProductPayload,
            models::inventory::CreateCategoryPayload,
            models::inventory::UpdateCategoryPayload,
            models::inventory::CreateMovementPayload,

            // --- Orders ---
            models::orders::OrderStatus,
            models::orders::Order,
            models::orders::OrderItem,
            models::orders::OrderDetail,
            models::orders::OrderItemPayload,
            models::orders::CreateOrderPayload,
            models::orders::UpdateOrderStatusPayload,

            // --- Customers ---
            models::crm::Customer,
            models::crm::CustomerWithStats,
            models::crm::CreateCustomerPayload,
            models::crm::UpdateCustomerPayload,

            // --- Events ---
            models::events::Event,
            models::events::EventWithStats,
            models::events::EventRegistration,
            models::events::CreateEventPayload,
            models::events::RegisterAttendeePayload,

            // --- Dashboard ---
            models::dashboard::DashboardStats,

            // --- Audit ---
            models::audit::AuditEntityType,
            models::audit::AuditLog,

            // --- Settings ---
            models::settings::CompanySettings,
            models::settings::UpdateSettingsPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Sign-up and sign-in"),
        (name = "Users", description = "Accounts and role assignment"),
        (name = "Inventory", description = "Product catalog"),
        (name = "Stock", description = "Stock ledger and movements"),
        (name = "Orders", description = "Orders and POS checkout"),
        (name = "Access control", description = "Roles and the permission catalog"),
        (name = "Customers", description = "Customer records"),
        (name = "Events", description = "Events and registrations"),
        (name = "Dashboard", description = "Headline numbers"),
        (name = "Audit", description = "Audit trail"),
        (name = "Settings", description = "Company settings")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

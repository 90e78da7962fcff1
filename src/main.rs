// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // If configuration fails the application should not start.
    let app_state = AppState::new()
        .await
        .expect("failed to initialize application state");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("failed to run database migrations");

    tracing::info!("database migrations applied");

    // Public routes
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Everything below goes through the auth guard; per-route authorization
    // happens in the guard extractors on each handler.
    let user_routes = Router::new()
        .route("/", get(handlers::users::list_users))
        .route("/me", get(handlers::auth::get_me))
        .route("/me/permissions", get(handlers::auth::get_my_permissions))
        .route("/{id}/role", put(handlers::users::update_user_role))
        .route("/{id}/active", put(handlers::users::set_user_active));

    let product_routes = Router::new()
        .route(
            "/",
            post(handlers::inventory::create_product).get(handlers::inventory::list_products),
        )
        .route(
            "/{id}",
            get(handlers::inventory::get_product).put(handlers::inventory::update_product),
        );

    let category_routes = Router::new()
        .route(
            "/",
            post(handlers::inventory::create_category).get(handlers::inventory::list_categories),
        )
        .route(
            "/{id}",
            put(handlers::inventory::update_category).delete(handlers::inventory::delete_category),
        );

    let stock_routes = Router::new()
        .route(
            "/movements",
            post(handlers::stock::create_movement).get(handlers::stock::list_movements),
        )
        .route("/low", get(handlers::stock::low_stock_report));

    let order_routes = Router::new()
        .route(
            "/",
            post(handlers::orders::create_order).get(handlers::orders::list_orders),
        )
        .route("/checkout", post(handlers::orders::checkout))
        .route("/{id}", get(handlers::orders::get_order))
        .route("/{id}/status", put(handlers::orders::update_order_status));

    let role_routes = Router::new()
        .route(
            "/",
            post(handlers::rbac::create_role).get(handlers::rbac::list_roles),
        )
        .route(
            "/{id}",
            put(handlers::rbac::update_role).delete(handlers::rbac::delete_role),
        );

    let customer_routes = Router::new()
        .route(
            "/",
            post(handlers::crm::create_customer).get(handlers::crm::list_customers),
        )
        .route(
            "/{id}",
            get(handlers::crm::get_customer).put(handlers::crm::update_customer),
        );

    let event_routes = Router::new()
        .route(
            "/",
            post(handlers::events::create_event).get(handlers::events::list_events),
        )
        .route(
            "/{id}/registrations",
            post(handlers::events::register_attendee).get(handlers::events::list_registrations),
        );

    let protected_routes = Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/products", product_routes)
        .nest("/api/categories", category_routes)
        .nest("/api/stock", stock_routes)
        .nest("/api/orders", order_routes)
        .nest("/api/roles", role_routes)
        .nest("/api/customers", customer_routes)
        .nest("/api/events", event_routes)
        .route("/api/permissions", get(handlers::rbac::list_permissions))
        .route("/api/dashboard", get(handlers::dashboard::stats))
        .route("/api/audit", get(handlers::audit::list_audit_logs))
        .route(
            "/api/settings",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(protected_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("failed to bind TCP listener");
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app).await.expect("server error");
}

//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ErrorBody, ErrorResponse};
use super::middleware::{authorize, AuthState, RoleGate};
use super::modules::{application, auth, cars, health, metrics, request_id, tasks};
use crate::application::{AuthService, CarService, TaskService};
use crate::config::AppConfig;
use crate::domain::{RepositoryProvider, Role};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::shared::PaginationMeta;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /v1/auth/login or /v1/auth/register"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        application::handle_root,
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::whoami,
        // Cars
        cars::list_cars,
        cars::get_car,
        cars::create_car,
        cars::update_car,
        cars::delete_car,
        cars::rent_car,
        // Tasks
        tasks::list_tasks,
        tasks::get_task,
        tasks::create_task,
        tasks::update_task,
        tasks::delete_task,
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorBody,
            PaginationMeta,
            application::RootResponse,
            health::HealthResponse,
            health::ComponentHealth,
            auth::LoginRequest,
            auth::RegisterRequest,
            auth::TokenResponse,
            auth::WhoAmIResponse,
            cars::CarDto,
            cars::CarRequest,
            cars::ListCarsResponse,
            cars::ListMeta,
            cars::RentCarRequest,
            cars::RentalDto,
            tasks::TaskDto,
            tasks::TaskRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Application", description = "Service status"),
        (name = "Health", description = "Liveness and database reachability"),
        (name = "Authentication", description = "Login, customer registration and caller identity"),
        (name = "Cars", description = "Car catalogue and rentals"),
        (name = "Tasks", description = "Task records"),
    ),
    info(
        title = "BCR API",
        version = "1.0.0",
        description = "Car rental REST API",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    app_cfg: &AppConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let auth_state = AuthState {
        jwt_config: jwt_config.clone(),
    };
    let admin_only =
        middleware::from_fn_with_state(RoleGate::new(&auth_state, Role::Admin), authorize);
    let customer_only =
        middleware::from_fn_with_state(RoleGate::new(&auth_state, Role::Customer), authorize);

    // ── Services ───────────────────────────────────────────────
    let car_service = Arc::new(CarService::new(
        repos.clone(),
        app_cfg.rental.conflict_check,
    ));
    let task_service = Arc::new(TaskService::new(repos.clone()));
    let auth_service = Arc::new(AuthService::new(repos, jwt_config));

    // ── Cars ───────────────────────────────────────────────────
    let car_routes = Router::new()
        .route(
            "/v1/cars",
            get(cars::list_cars).merge(post(cars::create_car).route_layer(admin_only.clone())),
        )
        .route(
            "/v1/cars/{id}",
            get(cars::get_car).merge(
                put(cars::update_car)
                    .delete(cars::delete_car)
                    .route_layer(admin_only.clone()),
            ),
        )
        .route(
            "/v1/cars/{id}/rent",
            post(cars::rent_car).route_layer(customer_only.clone()),
        )
        .with_state(cars::CarHandlerState {
            car_service,
            pagination: app_cfg.pagination,
        });

    // ── Tasks ──────────────────────────────────────────────────
    let task_routes = Router::new()
        .route(
            "/v1/tasks",
            get(tasks::list_tasks).merge(post(tasks::create_task).route_layer(admin_only.clone())),
        )
        .route(
            "/v1/tasks/{id}",
            get(tasks::get_task).merge(
                put(tasks::update_task)
                    .delete(tasks::delete_task)
                    .route_layer(admin_only),
            ),
        )
        .with_state(tasks::TaskHandlerState { task_service });

    // ── Auth ───────────────────────────────────────────────────
    let auth_routes = Router::new()
        .route("/v1/auth/login", post(auth::login))
        .route("/v1/auth/register", post(auth::register))
        .route(
            "/v1/auth/whoami",
            get(auth::whoami).route_layer(customer_only),
        )
        .with_state(auth::AuthHandlerState { auth_service });

    // ── Shell ──────────────────────────────────────────────────
    let root_routes = Router::new()
        .route("/", get(application::handle_root))
        .with_state(application::ApplicationState {
            service_name: app_cfg.server.name.clone(),
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState {
            handle: prometheus_handle,
        });

    let swagger_routes =
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(swagger_routes)
        .merge(root_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .merge(auth_routes)
        .merge(car_routes)
        .merge(task_routes)
        .fallback(application::handle_not_found)
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::request_id_middleware))
}

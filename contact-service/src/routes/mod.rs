use axum::{
    extract::Request,
    http::{header::CONTENT_TYPE, Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use contact_shared::models::MessageResponse;
use contact_shared::store::{dynamo::DynamoContactStore, memory::MemoryContactStore, ContactStore};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::{AllowedOrigin, ServiceConfig, StoreBackend};
use crate::handlers::contact_handlers::{create_contact, delete_contact, list_contacts};

/// Creates a router backed by the configured store.
///
/// The store is constructed once here and shared by every request.
pub async fn create_router(config: &ServiceConfig) -> Router {
    let store: Arc<dyn ContactStore> = match config.store_backend {
        StoreBackend::Dynamo => {
            let dynamo_store = DynamoContactStore::new().await;
            info!(
                "Creating router with DynamoDB store (table: {})",
                dynamo_store.table_name()
            );
            Arc::new(dynamo_store)
        }
        StoreBackend::Memory => {
            info!("Creating router with in-memory store");
            Arc::new(MemoryContactStore::new())
        }
    };

    create_router_with_store(store, config)
}

fn cors_layer(allowed_origin: &AllowedOrigin) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    match allowed_origin {
        AllowedOrigin::Any => {
            info!("CORS configured for all origins");
            cors.allow_origin(Any)
        }
        AllowedOrigin::Exact(origin) => {
            info!("CORS configured for origin {:?}", origin);
            cors.allow_origin(AllowOrigin::exact(origin.clone()))
        }
    }
}

// Logging middleware to trace all requests
async fn logging_middleware(req: Request, next: middleware::Next) -> impl IntoResponse {
    info!(
        "Router received request: method={}, uri={}",
        req.method(),
        req.uri()
    );
    let response = next.run(req).await;
    info!("Responding with status {}", response.status());
    response
}

async fn fallback(req: Request) -> impl IntoResponse {
    warn!("No route matched for: {} {}", req.method(), req.uri());
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse::new("The requested resource was not found")),
    )
}

/// Creates a router with a given store implementation
pub fn create_router_with_store<S>(store: Arc<S>, config: &ServiceConfig) -> Router
where
    S: ContactStore + ?Sized,
{
    let prefix = config.api_prefix.as_str();
    info!("Setting up API routes with prefix: '{}'", prefix);

    // POST on the delete path serves clients that cannot issue DELETE
    let api_routes = Router::new()
        .route(
            "/api/contacts",
            get(list_contacts::<S>).post(create_contact::<S>),
        )
        .route("/api/contacts/:id", delete(delete_contact::<S>))
        .route(
            "/api/contacts/delete/:id",
            delete(delete_contact::<S>).post(delete_contact::<S>),
        )
        .with_state(store);

    let router = if prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(prefix, api_routes)
    };

    router
        .fallback(fallback)
        .layer(cors_layer(&config.allowed_origin))
        .layer(middleware::from_fn(logging_middleware))
}

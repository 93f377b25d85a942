use axum::{routing::get, Router};
use std::time::Duration;

use crate::{
    handlers::{
        health_check, index,
        pets::{get_pet_by_id, get_pets_by_species},
    },
    middleware::create_middleware_stack,
    repository::SharedPetRepository,
};

/// Create the Axum router with all endpoints and middleware
pub fn create_router(repo: SharedPetRepository, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/pets/:id", get(get_pet_by_id))
        .route("/species/:species", get(get_pets_by_species))
        .with_state(repo)
        .layer(create_middleware_stack(request_timeout))
}

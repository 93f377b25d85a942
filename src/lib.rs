// Library root for the pet directory API

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod repository;
pub mod routes;
pub mod seed;
pub mod views;

// Re-export commonly used types
pub use db::Database;
pub use error::ApiError;
pub use repository::{InMemoryPetRepository, PetRepository};

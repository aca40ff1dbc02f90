pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod lifecycle;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

pub use error::{AppError, AppResult};

pub mod aggregate;
pub mod config;
pub mod db;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

pub use config::Config;
pub use state::AppState;

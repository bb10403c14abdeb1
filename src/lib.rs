pub mod api;
pub mod clock;
pub mod db;
pub mod error;
pub mod models;
pub mod period;
pub mod services;
pub mod state;

//! PDI engine
//!
//! Pre-delivery inspection core for dealership back-office tooling: checklist
//! templates, inspections instantiated from them, item results, defects,
//! photo and sign-off ledgers, and follow-up task derivation.

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use engine::Engine;
pub use error::{AppError, AppResult};

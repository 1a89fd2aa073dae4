pub mod cli;
pub mod config;
pub mod error;
pub mod fixture;
pub mod observability;

pub use config::Config;
pub use error::AppError;
pub use fixture::Fixture;

pub mod config;
pub mod error;
pub mod event;
pub mod github;
pub mod logger;
pub mod release;
pub mod version;

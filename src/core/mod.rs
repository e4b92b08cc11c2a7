// src/core/mod.rs
//! Core services: configuration, file access and the parsing service client

pub mod config_manager;
pub mod fs_ops;
pub mod service_client;

pub use config_manager::{ConfigManager, ConfigOverrides};
pub use fs_ops::FsOps;
pub use service_client::{ParseService, ServiceClient};

pub mod auth_service;
pub mod dataset;
pub mod export_service;
pub mod map_service;
pub mod pg_store;
pub mod report_service;
pub mod store;
pub mod user_service;

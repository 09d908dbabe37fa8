pub mod access_control;
pub mod activity_logger;
pub mod auth_service;

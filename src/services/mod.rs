pub mod api_client;
pub mod error;
pub mod file_service;
pub mod logger_service;
pub mod media_service;
pub mod tag_service;
pub mod toast_service;

pub mod api_client;
pub mod application_service;
pub mod career_service;

pub mod application_dto;
pub mod career_dto;

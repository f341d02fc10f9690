pub mod application;
pub mod career;

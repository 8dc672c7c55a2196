pub mod auth_dto;
pub mod data_dto;
pub mod user_dto;

pub mod generate_dto;
pub mod quiz_dto;

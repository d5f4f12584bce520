pub mod application_dto;
pub mod reference_dto;

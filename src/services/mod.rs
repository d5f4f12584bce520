pub mod form_service;
pub mod submission_service;

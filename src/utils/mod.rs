pub mod files;
pub mod validation;

pub mod application;
pub mod document;
pub mod draft;
pub mod job;

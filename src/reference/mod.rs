pub mod countries;
pub mod openings;

pub mod common;
pub mod dashboard;

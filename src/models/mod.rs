pub mod dish;
pub mod form;
pub mod submission;

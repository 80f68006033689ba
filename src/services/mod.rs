pub mod dishes_client;
pub mod form_session;
pub mod pages;
pub mod validation;

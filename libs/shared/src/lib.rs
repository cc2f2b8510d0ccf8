pub mod form;
pub mod local_store;
pub mod masking;
pub mod models;
pub mod utils;
pub mod validation;

pub mod handlers;
pub mod store;
pub(crate) mod validation;

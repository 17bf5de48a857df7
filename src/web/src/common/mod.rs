pub mod default_handler;
pub mod localize;

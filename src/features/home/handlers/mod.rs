mod home_handler;

pub use home_handler::{health_check, home};

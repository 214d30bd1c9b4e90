pub mod home;
pub mod members;
pub mod settings;

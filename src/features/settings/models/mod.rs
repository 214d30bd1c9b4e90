mod registry_settings;

pub use registry_settings::{ConfigMissing, RegistrySettings};

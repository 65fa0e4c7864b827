pub mod attendance;
pub mod configuration;

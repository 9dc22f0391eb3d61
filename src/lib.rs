pub mod configuration;
pub mod domain;
pub mod fixtures;
pub mod quote_client;
pub mod telemetry;
pub mod utils;
pub mod workflows;

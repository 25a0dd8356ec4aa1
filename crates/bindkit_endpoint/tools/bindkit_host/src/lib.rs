//! bindkit_host: a minimal host runtime used to exercise `EnvironmentEndpoint`
//! under concurrent bind/unbind notifications.

pub mod config;
pub mod demo;
pub mod harness;

//! Persistent storage: configuration file loading.

pub mod config;

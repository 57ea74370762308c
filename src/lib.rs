pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod service;
pub mod store;
pub mod timeseries;

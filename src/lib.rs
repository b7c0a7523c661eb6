//! Core library for the `cannon` CLI.
//!
//! `cannon` fires HTTP requests at a single target from a fixed pool of
//! workers until a time limit, an interrupt, or a request quota stops it, then
//! prints how many attempts succeeded and how many failed.
pub mod app;
pub mod args;
pub mod config;
pub mod domain;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod shutdown;
pub mod shutdown_handlers;

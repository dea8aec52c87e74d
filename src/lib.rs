//! Document Lookup API Library
//!
//! This library provides the core functionality for the document lookup
//! service: form validation, the simulated lookup, data models, and the HTTP
//! handlers that expose them.
//!
//! # Modules
//!
//! - `api`: API-layer namespace.
//! - `core`: Domain-layer namespace.
//! - `cli`: Argument handling for the lookup CLI.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers and router.
//! - `models`: Payload and result models.
//! - `simulator`: Simulated lookup with injectable clock and random source.
//! - `validation`: Form validation rules.

pub mod api;
pub mod core;

pub mod cli;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod simulator;
pub mod validation;

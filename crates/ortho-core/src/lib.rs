//! # ortho-core
//!
//! Core types, traits, configuration, and error handling for the Ortho relay.

pub mod activation;
pub mod config;
pub mod error;
pub mod message;
pub mod text;
pub mod traits;

//! # ortho-channels
//!
//! Messaging platform integrations for Ortho.

pub mod telegram;

//! # ortho-grammar
//!
//! Grammar-checking engine integrations for Ortho.

pub mod languagetool;

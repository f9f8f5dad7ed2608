//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository loads into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod family_service;

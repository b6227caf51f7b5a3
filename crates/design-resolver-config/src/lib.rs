// crates/design-resolver-config/src/lib.rs
// ============================================================================
// Module: Design Resolver Config
// Description: Canonical configuration model, loading, and validation.
// Purpose: Single source of truth for resolution engine configuration.
// Dependencies: design-resolver-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! This crate defines the TOML configuration model for the resolution engine
//! and converts a validated file into the core's [`EngineConfig`], preset
//! table, and audit sink.
//!
//! [`EngineConfig`]: design_resolver_core::EngineConfig

pub mod config;

pub use config::*;

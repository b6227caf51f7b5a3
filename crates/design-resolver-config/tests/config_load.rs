//! Config file loading tests for design-resolver-config.
// crates/design-resolver-config/tests/config_load.rs
// =============================================================================
// Module: Config Loading Tests
// Description: Load configs from disk and enforce file limits.
// Purpose: Ensure loading fails closed on unreadable, oversized, or malformed files.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;

use design_resolver_config::ConfigError;
use design_resolver_config::DesignResolverConfig;
use design_resolver_config::MAX_CONFIG_FILE_SIZE;
use design_resolver_core::NodeId;
use design_resolver_core::ResolutionAuditEvent;
use design_resolver_core::ResolutionTier;

mod common;

type TestResult = Result<(), String>;

#[test]
fn load_reads_thresholds_and_aliases() -> TestResult {
    let (_dir, path) = common::write_config(
        r#"
        [thresholds]
        tier1_min_confidence = 0.8
        color_distance_ceiling = 12

        [aliases]
        primary = ["brand", "accent"]
        "#,
    )?;
    let config = DesignResolverConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    let engine = config.engine_config().map_err(|err| err.to_string())?;
    assert!((engine.tier1_min_confidence - 0.8).abs() < 1e-12);
    assert!((engine.color_distance_ceiling - 12.0).abs() < 1e-12);
    assert_eq!(
        engine.extra_aliases.get("primary"),
        Some(&vec!["brand".to_string(), "accent".to_string()])
    );
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    match DesignResolverConfig::load(Some(&path)) {
        Err(ConfigError::Io(_)) => Ok(()),
        other => Err(format!("expected io error, got {other:?}")),
    }
}

#[test]
fn malformed_toml_is_a_parse_error() -> TestResult {
    let (_dir, path) = common::write_config("[thresholds\ntier1_min_confidence = ")?;
    match DesignResolverConfig::load(Some(&path)) {
        Err(ConfigError::Parse(_)) => Ok(()),
        other => Err(format!("expected parse error, got {other:?}")),
    }
}

#[test]
fn oversized_file_is_rejected() -> TestResult {
    let padding = "#".repeat(MAX_CONFIG_FILE_SIZE + 1);
    let (_dir, path) = common::write_config(&padding)?;
    match DesignResolverConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("size limit") => Ok(()),
        other => Err(format!("expected size limit error, got {other:?}")),
    }
}

#[test]
fn non_utf8_file_is_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("design-resolver.toml");
    fs::write(&path, [0xFF_u8, 0xFE, 0x00]).map_err(|err| err.to_string())?;
    match DesignResolverConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("utf-8") => Ok(()),
        other => Err(format!("expected utf-8 error, got {other:?}")),
    }
}

#[test]
fn overlong_path_component_is_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("x".repeat(300));
    match DesignResolverConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("component too long") => Ok(()),
        other => Err(format!("expected path error, got {other:?}")),
    }
}

#[test]
fn invalid_values_fail_load() -> TestResult {
    let (_dir, path) = common::write_config(
        r#"
        [thresholds]
        tier4_min_confidence = -0.1
        "#,
    )?;
    common::assert_invalid(
        DesignResolverConfig::load(Some(&path)).map(|_| ()),
        "thresholds.tier4_min_confidence",
    )
}

#[test]
fn file_audit_sink_appends_json_lines() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let audit_path = dir.path().join("audit.jsonl");
    let config_path = dir.path().join("design-resolver.toml");
    let contents = format!(
        "[audit]\nsink = \"file\"\npath = {:?}\n",
        audit_path.to_string_lossy()
    );
    fs::write(&config_path, contents).map_err(|err| err.to_string())?;
    let config = DesignResolverConfig::load(Some(&config_path)).map_err(|err| err.to_string())?;
    let sink = config.audit_sink().map_err(|err| err.to_string())?;
    sink.record(&ResolutionAuditEvent {
        event: "node_resolved",
        timestamp_ms: 1,
        node_id: NodeId::new("card"),
        tier: ResolutionTier::SystemDefault,
        method: ResolutionTier::SystemDefault.method().to_string(),
        confidence: 0.3,
        warning_count: 1,
        conflict_count: 0,
        attempted_tiers: ResolutionTier::ORDER.to_vec(),
        elapsed_micros: 10,
    });
    let written = fs::read_to_string(&audit_path).map_err(|err| err.to_string())?;
    let line = written.lines().next().ok_or("audit file is empty")?;
    let value: serde_json::Value = serde_json::from_str(line).map_err(|err| err.to_string())?;
    assert_eq!(value["event"], "node_resolved");
    assert_eq!(value["node_id"], "card");
    Ok(())
}

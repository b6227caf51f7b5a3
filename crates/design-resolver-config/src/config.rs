// crates/design-resolver-config/src/config.rs
// ============================================================================
// Module: Design Resolver Configuration
// Description: Configuration loading and validation for the resolution engine.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: design-resolver-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section is optional; missing sections take the engine defaults.
//! Invalid values fail closed with [`ConfigError`] instead of being clamped.
//!
//! ```toml
//! [thresholds]
//! tier1_min_confidence = 0.7
//! color_distance_ceiling = 10.0
//!
//! [tiers]
//! token_construction = true
//!
//! [defaults]
//! fill = "#FFFFFF"
//! padding = 16
//!
//! [aliases]
//! primary = ["brand", "accent"]
//!
//! [presets]
//! padding = 24
//!
//! [audit]
//! sink = "file"
//! path = "resolution-audit.jsonl"
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use design_resolver_core::EngineConfig;
use design_resolver_core::MonitoredProperty;
use design_resolver_core::PropertyValue;
use design_resolver_core::ResolutionAuditSink;
use design_resolver_core::Rgb;
use design_resolver_core::StyleTable;
use design_resolver_core::SystemDefaults;
use design_resolver_core::runtime::FileAuditSink;
use design_resolver_core::runtime::NoopAuditSink;
use design_resolver_core::runtime::StderrAuditSink;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "design-resolver.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "DESIGN_RESOLVER_CONFIG";
/// Maximum size of a config file in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum length of a full path.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of alias groups.
const MAX_ALIAS_GROUPS: usize = 256;

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Root configuration for the resolution engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignResolverConfig {
    /// Acceptance thresholds.
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    /// Tier toggles.
    #[serde(default)]
    pub tiers: TiersConfig,
    /// System default table.
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Extra alias groups, keyed by canonical name.
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
    /// User preset values, keyed by monitored property name.
    #[serde(default)]
    pub presets: BTreeMap<String, PresetValue>,
    /// Audit sink selection.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl DesignResolverConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The path argument wins over [`CONFIG_ENV_VAR`], which wins over
    /// [`DEFAULT_CONFIG_NAME`] in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        self.defaults.validate()?;
        validate_aliases(&self.aliases)?;
        self.preset_table()?;
        self.audit.validate()
    }

    /// Converts the validated config into the engine configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a default color does not parse.
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let thresholds = &self.thresholds;
        Ok(EngineConfig {
            tier1_min_confidence: thresholds.tier1_min_confidence,
            tier1_min_mappable: thresholds.tier1_min_mappable,
            fuzzy_threshold: thresholds.fuzzy_threshold,
            semantic_match_floor: thresholds.semantic_match_floor,
            hint_confidence_floor: thresholds.hint_confidence_floor,
            hint_coverage: thresholds.hint_coverage,
            color_distance_ceiling: thresholds.color_distance_ceiling,
            tier4_min_confidence: thresholds.tier4_min_confidence,
            tier3_enabled: self.tiers.token_construction,
            defaults: self.defaults.system_defaults()?,
            extra_aliases: self.aliases.clone(),
        })
    }

    /// Returns the preset table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a preset value does not fit its property.
    pub fn preset_table(&self) -> Result<StyleTable, ConfigError> {
        self.presets
            .iter()
            .map(|(name, value)| {
                let property = parse_property(name)?;
                Ok((property, value.to_property_value(property)?))
            })
            .collect()
    }

    /// Builds the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit file cannot be opened.
    pub fn audit_sink(&self) -> Result<Arc<dyn ResolutionAuditSink>, ConfigError> {
        self.audit.build()
    }
}

// ============================================================================
// SECTION: Thresholds
// ============================================================================

/// Acceptance thresholds for the tiers and the property mapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    /// Minimum mapping confidence for a tier-1 candidate.
    pub tier1_min_confidence: f64,
    /// Minimum mappable share for a tier-1 candidate.
    pub tier1_min_mappable: f64,
    /// Minimum similarity for fuzzy key and value matches.
    pub fuzzy_threshold: f64,
    /// Minimum confidence of an external semantic token match.
    pub semantic_match_floor: f64,
    /// Minimum per-hint confidence counted toward tier-3 coverage.
    pub hint_confidence_floor: f64,
    /// Minimum share of hints that must bind for tier 3 to accept.
    pub hint_coverage: f64,
    /// Exclusive perceptual distance ceiling for color matches.
    pub color_distance_ceiling: f64,
    /// Minimum mean confidence for tier 4 to accept.
    pub tier4_min_confidence: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            tier1_min_confidence: engine.tier1_min_confidence,
            tier1_min_mappable: engine.tier1_min_mappable,
            fuzzy_threshold: engine.fuzzy_threshold,
            semantic_match_floor: engine.semantic_match_floor,
            hint_confidence_floor: engine.hint_confidence_floor,
            hint_coverage: engine.hint_coverage,
            color_distance_ceiling: engine.color_distance_ceiling,
            tier4_min_confidence: engine.tier4_min_confidence,
        }
    }
}

impl ThresholdsConfig {
    /// Validates threshold ranges.
    fn validate(&self) -> Result<(), ConfigError> {
        let unit = [
            ("thresholds.tier1_min_confidence", self.tier1_min_confidence),
            ("thresholds.tier1_min_mappable", self.tier1_min_mappable),
            ("thresholds.fuzzy_threshold", self.fuzzy_threshold),
            ("thresholds.semantic_match_floor", self.semantic_match_floor),
            ("thresholds.hint_confidence_floor", self.hint_confidence_floor),
            ("thresholds.hint_coverage", self.hint_coverage),
            ("thresholds.tier4_min_confidence", self.tier4_min_confidence),
        ];
        for (field, value) in unit {
            if !(0.0 ..= 1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!("{field} must be within [0, 1]")));
            }
        }
        if !self.color_distance_ceiling.is_finite() || self.color_distance_ceiling <= 0.0 {
            return Err(ConfigError::Invalid(
                "thresholds.color_distance_ceiling must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Tier toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiersConfig {
    /// Enables tier-3 token construction.
    pub token_construction: bool,
}

impl Default for TiersConfig {
    fn default() -> Self {
        Self {
            token_construction: true,
        }
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// System default table as written in TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Container fill as `#RRGGBB`.
    pub fill: String,
    /// Container stroke as `#RRGGBB`.
    pub stroke: String,
    /// Text color as `#RRGGBB`.
    pub text_color: String,
    /// Padding in pixels.
    pub padding: f64,
    /// Item spacing in pixels.
    pub item_spacing: f64,
    /// Corner radius in pixels.
    pub corner_radius: f64,
    /// Font size in pixels.
    pub font_size: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let defaults = SystemDefaults::default();
        Self {
            fill: defaults.fill.to_hex(),
            stroke: defaults.stroke.to_hex(),
            text_color: defaults.text_color.to_hex(),
            padding: defaults.padding,
            item_spacing: defaults.item_spacing,
            corner_radius: defaults.corner_radius,
            font_size: defaults.font_size,
        }
    }
}

impl DefaultsConfig {
    /// Validates colors and dimensions.
    fn validate(&self) -> Result<(), ConfigError> {
        self.system_defaults().map(|_| ())
    }

    /// Parses the table into the engine's defaults.
    fn system_defaults(&self) -> Result<SystemDefaults, ConfigError> {
        let dimensions = [
            ("defaults.padding", self.padding),
            ("defaults.item_spacing", self.item_spacing),
            ("defaults.corner_radius", self.corner_radius),
            ("defaults.font_size", self.font_size),
        ];
        for (field, value) in dimensions {
            validate_dimension(field, value)?;
        }
        Ok(SystemDefaults {
            fill: parse_color("defaults.fill", &self.fill)?,
            stroke: parse_color("defaults.stroke", &self.stroke)?,
            text_color: parse_color("defaults.text_color", &self.text_color)?,
            padding: self.padding,
            item_spacing: self.item_spacing,
            corner_radius: self.corner_radius,
            font_size: self.font_size,
        })
    }
}

// ============================================================================
// SECTION: Presets
// ============================================================================

/// Preset value as written in TOML: a pixel number or a hex color string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PresetValue {
    /// Pixel dimension.
    Number(f64),
    /// Hex color.
    Text(String),
}

impl PresetValue {
    /// Converts the preset into a typed value for its property.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the value kind does not match the property.
    pub fn to_property_value(&self, property: MonitoredProperty) -> Result<PropertyValue, ConfigError> {
        let field = format!("presets.{property}");
        match (self, property.is_color()) {
            (Self::Text(raw), true) => Ok(PropertyValue::Color(parse_color(&field, raw)?)),
            (Self::Number(value), false) => {
                validate_dimension(&field, *value)?;
                Ok(PropertyValue::Number(*value))
            }
            (Self::Number(_), true) => {
                Err(ConfigError::Invalid(format!("{field} must be a hex color string")))
            }
            (Self::Text(_), false) => {
                Err(ConfigError::Invalid(format!("{field} must be a number of pixels")))
            }
        }
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit sink kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// Append-only JSON lines file.
    File,
}

/// Audit configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Sink kind.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// File path for the `file` sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates the sink selection.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, self.path.as_deref()) {
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for the file sink".to_string()))
            }
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (AuditSinkKind::None | AuditSinkKind::Stderr, Some(_)) => Err(ConfigError::Invalid(
                "audit.path is only valid for the file sink".to_string(),
            )),
            (AuditSinkKind::None | AuditSinkKind::Stderr, None) => Ok(()),
        }
    }

    /// Builds the sink.
    fn build(&self) -> Result<Arc<dyn ResolutionAuditSink>, ConfigError> {
        match (self.sink, self.path.as_deref()) {
            (AuditSinkKind::None, _) => Ok(Arc::new(NoopAuditSink)),
            (AuditSinkKind::Stderr, _) => Ok(Arc::new(StderrAuditSink)),
            (AuditSinkKind::File, Some(path)) => {
                let sink = FileAuditSink::new(Path::new(path.trim()))
                    .map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for the file sink".to_string()))
            }
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the argument, environment, or default name.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Enforces path length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path-valued string field.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Maps a preset key onto a monitored property.
fn parse_property(name: &str) -> Result<MonitoredProperty, ConfigError> {
    let key = name.trim();
    MonitoredProperty::ALL
        .into_iter()
        .find(|property| property.as_str() == key)
        .ok_or_else(|| ConfigError::Invalid(format!("presets.{key} is not a monitored property")))
}

/// Parses a hex color field.
fn parse_color(field: &str, raw: &str) -> Result<Rgb, ConfigError> {
    Rgb::from_hex(raw.trim()).map_err(|err| ConfigError::Invalid(format!("{field}: {err}")))
}

/// Rejects negative or non-finite pixel values.
fn validate_dimension(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{field} must be a non-negative number")))
    }
}

/// Rejects empty alias names and lists.
fn validate_aliases(aliases: &BTreeMap<String, Vec<String>>) -> Result<(), ConfigError> {
    if aliases.len() > MAX_ALIAS_GROUPS {
        return Err(ConfigError::Invalid(format!(
            "aliases exceeds {MAX_ALIAS_GROUPS} groups"
        )));
    }
    for (name, equivalents) in aliases {
        if name.trim().is_empty() {
            return Err(ConfigError::Invalid("aliases keys must be non-empty".to_string()));
        }
        if equivalents.is_empty() || equivalents.iter().any(|entry| entry.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "aliases.{name} must list at least one non-empty name"
            )));
        }
    }
    Ok(())
}

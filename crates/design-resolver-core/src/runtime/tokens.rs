// crates/design-resolver-core/src/runtime/tokens.rs
// ============================================================================
// Module: Design Resolver Token Resolver
// Description: Style-hint parsing and four-step token lookup.
// Purpose: Bind requested token names and hints to inventory tokens.
// Dependencies: crate::{core, interfaces}, thiserror, tracing
// ============================================================================

//! ## Overview
//! A style hint is `<prefix>-<query>` (e.g. `bg-primary`, `p-md`). The
//! prefix selects the styled property and therefore the token kind; the query
//! is looked up in four steps, first hit wins:
//!
//! 1. exact normalized token name (full name, then last path segment)
//! 2. alias table (hand-maintained synonym groups)
//! 3. external semantic match, accepted at or above the semantic floor
//! 4. perceptual proximity, color queries only, below the distance ceiling
//!
//! Classifier failures propagate so the caller can decline the tier.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::core::Inventory;
use crate::core::MonitoredProperty;
use crate::core::Rgb;
use crate::core::TokenDescriptor;
use crate::core::TokenKind;
use crate::core::TokenValue;
use crate::core::perceptual_distance;
use crate::interfaces::Classifier;
use crate::interfaces::ClassifierError;
use crate::interfaces::MatchContext;
use crate::interfaces::MatchRequest;

// ============================================================================
// SECTION: Hint Grammar
// ============================================================================

/// Property targeted by a style hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HintTarget {
    /// Fill color (`bg-`, `fill-`).
    Fill,
    /// Text color (`text-`).
    TextColor,
    /// Stroke color (`border-`, `stroke-`).
    Stroke,
    /// Padding (`p-`, `padding-`).
    Padding,
    /// Item spacing (`gap-`, `space-`).
    ItemSpacing,
    /// Corner radius (`rounded-`, `radius-`).
    CornerRadius,
}

impl HintTarget {
    /// Maps a hint prefix to its target.
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix.to_ascii_lowercase().as_str() {
            "bg" | "fill" => Some(Self::Fill),
            "text" => Some(Self::TextColor),
            "border" | "stroke" => Some(Self::Stroke),
            "p" | "padding" => Some(Self::Padding),
            "gap" | "space" => Some(Self::ItemSpacing),
            "rounded" | "radius" => Some(Self::CornerRadius),
            _ => None,
        }
    }

    /// Returns the token kind compatible with the target.
    #[must_use]
    pub const fn token_kind(self) -> TokenKind {
        match self {
            Self::Fill | Self::TextColor | Self::Stroke => TokenKind::Color,
            Self::Padding | Self::ItemSpacing | Self::CornerRadius => TokenKind::Number,
        }
    }

    /// Returns the monitored property, or `None` for text color.
    #[must_use]
    pub const fn monitored(self) -> Option<MonitoredProperty> {
        match self {
            Self::Fill => Some(MonitoredProperty::Fill),
            Self::TextColor => None,
            Self::Stroke => Some(MonitoredProperty::Stroke),
            Self::Padding => Some(MonitoredProperty::Padding),
            Self::ItemSpacing => Some(MonitoredProperty::ItemSpacing),
            Self::CornerRadius => Some(MonitoredProperty::CornerRadius),
        }
    }

    /// Returns the scope tag tokens use for this target.
    #[must_use]
    pub const fn scope(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::TextColor => "text",
            Self::Stroke => "stroke",
            Self::Padding => "padding",
            Self::ItemSpacing => "gap",
            Self::CornerRadius => "corner_radius",
        }
    }
}

impl fmt::Display for HintTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scope())
    }
}

/// Parsed style hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleHint {
    /// Hint as written.
    pub raw: String,
    /// Targeted property.
    pub target: HintTarget,
    /// Lookup query (the part after the prefix).
    pub query: String,
}

impl StyleHint {
    /// Builds a hint for a deferred reference on a known target.
    #[must_use]
    pub fn reference(target: HintTarget, name: &str) -> Self {
        Self {
            raw: name.to_string(),
            target,
            query: name.to_string(),
        }
    }
}

/// Errors raised when parsing a style hint.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HintParseError {
    /// Hint has no `-` separated query.
    #[error("style hint `{0}` has no query")]
    MissingQuery(String),
    /// Hint prefix is not recognized.
    #[error("style hint `{0}` has an unknown prefix")]
    UnknownPrefix(String),
}

/// Parses a `<prefix>-<query>` style hint.
///
/// # Errors
///
/// Returns [`HintParseError`] when the prefix is unknown or the query is empty.
pub fn parse_hint(raw: &str) -> Result<StyleHint, HintParseError> {
    let trimmed = raw.trim();
    let Some((prefix, query)) = trimmed.split_once('-') else {
        return Err(HintParseError::MissingQuery(raw.to_string()));
    };
    let query = query.trim();
    if query.is_empty() {
        return Err(HintParseError::MissingQuery(raw.to_string()));
    }
    let target =
        HintTarget::from_prefix(prefix).ok_or_else(|| HintParseError::UnknownPrefix(raw.to_string()))?;
    Ok(StyleHint {
        raw: trimmed.to_string(),
        target,
        query: query.to_string(),
    })
}

// ============================================================================
// SECTION: Alias Table
// ============================================================================

/// Built-in synonym groups: canonical name, then accepted aliases.
const DEFAULT_ALIASES: &[(&str, &[&str])] = &[
    ("primary", &["brand", "accent", "main"]),
    ("secondary", &["muted", "subtle", "alt"]),
    ("danger", &["error", "destructive", "critical"]),
    ("success", &["positive", "valid"]),
    ("warning", &["caution", "attention"]),
    ("background", &["surface", "canvas", "base"]),
    ("foreground", &["text", "content", "fg"]),
    ("border", &["outline", "divider", "stroke"]),
    ("sm", &["small", "s"]),
    ("md", &["medium", "m", "default"]),
    ("lg", &["large", "l"]),
    ("xl", &["extra-large", "x-large"]),
];

/// Synonym groups used by the alias lookup step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    /// Canonical name to aliases, all normalized.
    groups: BTreeMap<String, Vec<String>>,
}

impl Default for AliasTable {
    fn default() -> Self {
        let groups = DEFAULT_ALIASES
            .iter()
            .map(|(canonical, aliases)| {
                (
                    normalize_name(canonical),
                    aliases.iter().map(|alias| normalize_name(alias)).collect(),
                )
            })
            .collect();
        Self {
            groups,
        }
    }
}

impl AliasTable {
    /// Returns the built-in table extended with extra groups.
    ///
    /// Extra aliases for an existing canonical name are appended to it.
    #[must_use]
    pub fn with_extra(extra: &BTreeMap<String, Vec<String>>) -> Self {
        let mut table = Self::default();
        for (canonical, aliases) in extra {
            let group = table.groups.entry(normalize_name(canonical)).or_default();
            for alias in aliases {
                let alias = normalize_name(alias);
                if !group.contains(&alias) {
                    group.push(alias);
                }
            }
        }
        table
    }

    /// Returns every other name equivalent to `name`.
    #[must_use]
    pub fn equivalents(&self, name: &str) -> Vec<&str> {
        let name = normalize_name(name);
        let mut out = Vec::new();
        for (canonical, aliases) in &self.groups {
            if canonical == &name || aliases.contains(&name) {
                out.extend(
                    std::iter::once(canonical.as_str())
                        .chain(aliases.iter().map(String::as_str))
                        .filter(|candidate| *candidate != name),
                );
            }
        }
        out
    }
}

// ============================================================================
// SECTION: Token Matches
// ============================================================================

/// Lookup step that produced a token match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMatchStrategy {
    /// Exact normalized name.
    ExactName,
    /// Alias table.
    Alias,
    /// External semantic match.
    Semantic,
    /// Perceptual color proximity.
    Proximity,
}

/// Token bound to a query.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMatch<'a> {
    /// Bound token.
    pub token: &'a TokenDescriptor,
    /// Binding confidence in [0, 1].
    pub confidence: f64,
    /// Step that produced the match.
    pub strategy: TokenMatchStrategy,
}

// ============================================================================
// SECTION: Token Resolver
// ============================================================================

/// Confidence of a full-name match.
const FULL_NAME_CONFIDENCE: f64 = 1.0;
/// Confidence of a last-segment match.
const SEGMENT_CONFIDENCE: f64 = 0.95;
/// Confidence of an alias match.
const ALIAS_CONFIDENCE: f64 = 0.85;

/// Four-step token lookup over one inventory.
pub struct TokenResolver<'a> {
    /// Token source.
    inventory: &'a Inventory,
    /// Optional semantic matcher.
    classifier: Option<&'a dyn Classifier>,
    /// Synonym groups.
    aliases: &'a AliasTable,
    /// Minimum semantic-match confidence.
    semantic_floor: f64,
    /// Exclusive color distance ceiling for proximity matches.
    color_ceiling: f64,
}

impl<'a> TokenResolver<'a> {
    /// Creates a resolver.
    #[must_use]
    pub fn new(
        inventory: &'a Inventory,
        classifier: Option<&'a dyn Classifier>,
        aliases: &'a AliasTable,
        semantic_floor: f64,
        color_ceiling: f64,
    ) -> Self {
        Self {
            inventory,
            classifier,
            aliases,
            semantic_floor,
            color_ceiling,
        }
    }

    /// Resolves a hint to a token, or `None` when every step misses.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] when the semantic match call fails.
    pub async fn resolve(&self, hint: &StyleHint) -> Result<Option<TokenMatch<'a>>, ClassifierError> {
        let candidates: Vec<&'a TokenDescriptor> =
            self.inventory.tokens_of_kind(hint.target.token_kind()).collect();
        if candidates.is_empty() {
            return Ok(None);
        }

        if let Some(found) = exact_match(&candidates, &hint.query, hint.target) {
            return Ok(Some(found));
        }
        if let Some(found) = self.alias_match(&candidates, &hint.query, hint.target) {
            return Ok(Some(found));
        }
        if let Some(found) = self.semantic_match(&candidates, hint).await? {
            return Ok(Some(found));
        }
        if hint.target.token_kind() == TokenKind::Color {
            return Ok(self.proximity_match(&candidates, &hint.query));
        }
        Ok(None)
    }

    /// Looks up every alias of the query by exact name.
    fn alias_match(
        &self,
        candidates: &[&'a TokenDescriptor],
        query: &str,
        target: HintTarget,
    ) -> Option<TokenMatch<'a>> {
        self.aliases.equivalents(query).into_iter().find_map(|alias| {
            exact_match(candidates, alias, target).map(|found| TokenMatch {
                confidence: ALIAS_CONFIDENCE,
                strategy: TokenMatchStrategy::Alias,
                ..found
            })
        })
    }

    /// Asks the classifier to pick a candidate by name.
    async fn semantic_match(
        &self,
        candidates: &[&'a TokenDescriptor],
        hint: &StyleHint,
    ) -> Result<Option<TokenMatch<'a>>, ClassifierError> {
        let Some(classifier) = self.classifier else {
            return Ok(None);
        };
        let request = MatchRequest {
            query: hint.query.clone(),
            context: MatchContext::TokenLookup {
                property: hint.target.scope().to_string(),
                candidates: candidates.iter().map(|token| token.name.clone()).collect(),
            },
        };
        let suggestion = classifier.suggest(&request).await?;
        if suggestion.confidence.is_nan() || suggestion.confidence < self.semantic_floor {
            return Ok(None);
        }
        let Some(name) = suggestion.value else {
            return Ok(None);
        };
        let found = candidates.iter().find(|token| token.name == name);
        if found.is_none() {
            tracing::debug!(
                target: "design_resolver::tokens",
                hint = %hint.raw,
                suggested = %name,
                "semantic match named an unknown token"
            );
        }
        Ok(found.map(|token| TokenMatch {
            token,
            confidence: suggestion.confidence.clamp(0.0, 1.0),
            strategy: TokenMatchStrategy::Semantic,
        }))
    }

    /// Finds the nearest color token to a literal color query.
    fn proximity_match(
        &self,
        candidates: &[&'a TokenDescriptor],
        query: &str,
    ) -> Option<TokenMatch<'a>> {
        let wanted = parse_color_query(query)?;
        let mut best: Option<(&'a TokenDescriptor, f64)> = None;
        for token in candidates {
            let TokenValue::Color(color) = token.value else {
                continue;
            };
            let distance = perceptual_distance(wanted, color);
            if distance >= self.color_ceiling {
                continue;
            }
            if best.is_none_or(|(_, current)| distance < current) {
                best = Some((token, distance));
            }
        }
        best.map(|(token, distance)| TokenMatch {
            token,
            confidence: proximity_confidence(distance),
            strategy: TokenMatchStrategy::Proximity,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Normalizes a token or query name for comparison.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' | '.' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Returns the last `/`-separated segment of a normalized name.
fn last_segment(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Exact-name lookup, preferring tokens scoped to the hint target.
fn exact_match<'a>(
    candidates: &[&'a TokenDescriptor],
    query: &str,
    target: HintTarget,
) -> Option<TokenMatch<'a>> {
    let query = normalize_name(query);
    if let Some(token) = pick_scoped(candidates, target, |name| name == query) {
        return Some(TokenMatch {
            token,
            confidence: FULL_NAME_CONFIDENCE,
            strategy: TokenMatchStrategy::ExactName,
        });
    }
    pick_scoped(candidates, target, |name| last_segment(name) == query).map(|token| TokenMatch {
        token,
        confidence: SEGMENT_CONFIDENCE,
        strategy: TokenMatchStrategy::ExactName,
    })
}

/// Returns the first token whose normalized name matches, scoped tokens first.
fn pick_scoped<'a>(
    candidates: &[&'a TokenDescriptor],
    target: HintTarget,
    matches: impl Fn(&str) -> bool,
) -> Option<&'a TokenDescriptor> {
    let matching: Vec<&'a TokenDescriptor> = candidates
        .iter()
        .copied()
        .filter(|token| matches(&normalize_name(&token.name)))
        .collect();
    matching
        .iter()
        .copied()
        .find(|token| token.scopes.iter().any(|scope| scope.eq_ignore_ascii_case(target.scope())))
        .or_else(|| matching.first().copied())
}

/// Parses `#RRGGBB`, `[#RRGGBB]`, or bare hex color queries.
fn parse_color_query(query: &str) -> Option<Rgb> {
    let trimmed = query.trim().trim_start_matches('[').trim_end_matches(']');
    Rgb::from_hex(trimmed).ok()
}

/// Confidence of a proximity match by distance band.
fn proximity_confidence(distance: f64) -> f64 {
    if distance < 2.0 {
        0.9
    } else if distance < 5.0 {
        0.8
    } else {
        0.7
    }
}

// crates/design-resolver-core/src/runtime/conflict.rs
// ============================================================================
// Module: Design Resolver Conflict Resolver
// Description: Cross-source conflict detection for monitored style properties.
// Purpose: Pick one deterministic value per property and patch instructions.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Up to four sources can supply a value for each monitored property:
//! component-inherent (priority 1), user preset (2), request-declared (3), and
//! system default (4). A conflict exists when at least two present sources
//! disagree; the present source with the lowest priority number wins.
//!
//! For constructed containers the request-declared value is the value the
//! accepted tier bound for the property, falling back to the node literal.
//! Winners are spliced into component overrides or container styling; fields
//! for other properties are left untouched. A winner the instantiated
//! component cannot safely take (fill on an icon, padding without
//! auto-layout) stays recorded as a conflict but is not spliced, and the
//! outcome carries a component-mapping warning instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ComponentAnatomy;
use crate::core::ComponentDescriptor;
use crate::core::Conflict;
use crate::core::ConflictCandidate;
use crate::core::ConflictSource;
use crate::core::Instructions;
use crate::core::MonitoredProperty;
use crate::core::PropertyValue;
use crate::core::ResolutionWarning;
use crate::core::StyleBinding;
use crate::core::StyleTable;
use crate::core::StyleValue;
use crate::core::TargetNode;
use crate::core::WarningCategory;

// ============================================================================
// SECTION: Sources
// ============================================================================

/// Value tables for each conflict source.
#[derive(Debug, Clone, Copy)]
pub struct ConflictSources<'a> {
    /// Values inherent to the instantiated component, if any.
    pub component: Option<&'a StyleTable>,
    /// User preset values.
    pub presets: &'a StyleTable,
    /// Request-declared values.
    pub request: &'a StyleTable,
    /// System default values.
    pub defaults: &'a StyleTable,
}

impl ConflictSources<'_> {
    /// Returns present candidates for a property in priority order.
    fn candidates(&self, property: MonitoredProperty) -> Vec<ConflictCandidate> {
        [
            (ConflictSource::ComponentInherent, self.component.and_then(|table| table.get(&property))),
            (ConflictSource::UserPreset, self.presets.get(&property)),
            (ConflictSource::RequestDeclared, self.request.get(&property)),
            (ConflictSource::SystemDefault, self.defaults.get(&property)),
        ]
        .into_iter()
        .filter_map(|(source, value)| {
            value.map(|value| ConflictCandidate {
                source,
                value: *value,
                priority: source.priority(),
            })
        })
        .collect()
    }
}

/// Returns the literal monitored values a node declares.
#[must_use]
pub fn request_table(node: &TargetNode) -> StyleTable {
    let number = |value: Option<&StyleValue<f64>>| value.and_then(StyleValue::literal).copied();
    let mut table = StyleTable::new();
    let numbers = [
        (MonitoredProperty::Height, number(node.height.as_ref())),
        (MonitoredProperty::Width, number(node.width.as_ref())),
        (MonitoredProperty::Padding, node.literal_padding()),
        (MonitoredProperty::ItemSpacing, node.literal_item_spacing()),
        (MonitoredProperty::CornerRadius, node.literal_corner_radius()),
        (MonitoredProperty::FontSize, number(node.font_size.as_ref())),
    ];
    for (property, value) in numbers {
        if let Some(value) = value {
            table.insert(property, PropertyValue::Number(value));
        }
    }
    if let Some(color) = node.literal_fill() {
        table.insert(MonitoredProperty::Fill, PropertyValue::Color(color));
    }
    if let Some(color) = node.literal_stroke() {
        table.insert(MonitoredProperty::Stroke, PropertyValue::Color(color));
    }
    table
}

/// Returns the request-declared table for a resolved instruction set.
///
/// Constructed containers contribute the values their tier bound.
#[must_use]
pub fn declared_table(node: &TargetNode, instructions: &Instructions) -> StyleTable {
    let mut table = request_table(node);
    if let Instructions::Construct {
        styling, ..
    } = instructions
    {
        for (property, binding) in &styling.properties {
            table.insert(*property, binding.value());
        }
    }
    table
}

// ============================================================================
// SECTION: Detection
// ============================================================================

/// Detects conflicts across every monitored property.
///
/// # Invariants
/// - Single-source properties never produce a conflict.
/// - The winner is the present candidate with the lowest priority number.
#[must_use]
pub fn detect_conflicts(sources: &ConflictSources<'_>) -> Vec<Conflict> {
    MonitoredProperty::ALL
        .into_iter()
        .filter_map(|property| {
            let candidates = sources.candidates(property);
            let first = *candidates.first()?;
            if candidates.iter().all(|candidate| candidate.value == first.value) {
                return None;
            }
            let winner = candidates
                .iter()
                .copied()
                .min_by_key(|candidate| candidate.priority)
                .unwrap_or(first);
            Some(Conflict {
                property,
                justification: winner.source.justification().to_string(),
                winner,
                candidates,
            })
        })
        .collect()
}

// ============================================================================
// SECTION: Splicing
// ============================================================================

/// Writes conflict winners into the instruction fields they govern.
///
/// Returns a warning for every winner withheld from an unsafe override.
pub fn apply_conflicts(
    instructions: &mut Instructions,
    conflicts: &[Conflict],
    anatomy: Option<&ComponentAnatomy>,
) -> Vec<ResolutionWarning> {
    let mut warnings = Vec::new();
    for conflict in conflicts {
        match instructions {
            Instructions::Instantiate {
                overrides, ..
            } => {
                if conflict.winner.source == ConflictSource::ComponentInherent {
                    overrides.remove(&conflict.property);
                    continue;
                }
                let violation = anatomy.and_then(|anatomy| anatomy.override_violation(conflict.property));
                if let Some(reason) = violation {
                    overrides.remove(&conflict.property);
                    warnings.push(ResolutionWarning::new(
                        WarningCategory::ComponentMapping,
                        format!(
                            "{} {} not applied: {reason}",
                            conflict.property, conflict.winner.value
                        ),
                    ));
                } else {
                    overrides.insert(conflict.property, conflict.winner.value);
                }
            }
            Instructions::Construct {
                styling, ..
            } => {
                let current = styling.properties.get(&conflict.property).map(StyleBinding::value);
                if current != Some(conflict.winner.value) {
                    styling.properties.insert(
                        conflict.property,
                        StyleBinding::Raw {
                            value: conflict.winner.value,
                        },
                    );
                }
            }
        }
    }
    warnings
}

/// Conflicts found for one node and the warnings raised while applying them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedConflicts {
    /// Detected conflicts, in monitored-property order.
    pub conflicts: Vec<Conflict>,
    /// Winners withheld from the instantiated component.
    pub warnings: Vec<ResolutionWarning>,
}

/// Detects conflicts for a resolved node and patches its instructions.
pub fn resolve_conflicts(
    node: &TargetNode,
    instructions: &mut Instructions,
    component: Option<&ComponentDescriptor>,
    presets: &StyleTable,
    defaults: &StyleTable,
) -> ResolvedConflicts {
    let request = declared_table(node, instructions);
    let sources = ConflictSources {
        component: component.map(|component| &component.inherent),
        presets,
        request: &request,
        defaults,
    };
    let conflicts = detect_conflicts(&sources);
    let warnings = apply_conflicts(instructions, &conflicts, component.map(|component| &component.anatomy));
    ResolvedConflicts {
        conflicts,
        warnings,
    }
}

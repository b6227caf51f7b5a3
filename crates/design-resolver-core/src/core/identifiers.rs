// crates/design-resolver-core/src/core/identifiers.rs
// ============================================================================
// Module: Design Resolver Identifiers
// Description: Canonical opaque identifiers for nodes, inventory entries, and documents.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Identifiers are opaque strings assigned by the host document. The resolver
//! never normalizes or validates them; the newtypes only keep a node ID from
//! being passed where a component ID is expected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Declares a transparent string identifier with conversions and `Display`.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a host-assigned identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id! {
    /// Identifier of a requested target node.
    NodeId
}

string_id! {
    /// Identifier of a component in the host document's library.
    ComponentId
}

string_id! {
    /// Identifier of a design token.
    TokenId
}

string_id! {
    /// Identifier of a scanned host document; keys the frequency cache.
    DocumentId
}

//! Type-safe identifier wrappers.
//!
//! Every agent in the park (dogs and park objects alike) is addressed by an
//! [`AgentId`]. Identifiers are issued sequentially by the world in creation
//! order, so a seeded run hands out the same ids every time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around a sequential `u64` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub u64);

        impl $name {
            /// Wrap a raw sequence number.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the inner sequence number.
            pub const fn into_inner(self) -> u64 {
                self.0
            }

            /// Return the identifier that follows this one, or `None` on
            /// overflow.
            pub const fn next(self) -> Option<Self> {
                match self.0.checked_add(1) {
                    Some(raw) => Some(Self(raw)),
                    None => None,
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "#{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an agent (dog, tree, food bowl, or toy).
    AgentId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_is_sequential() {
        let id = AgentId::new(7);
        assert_eq!(id.next(), Some(AgentId::new(8)));
        assert_eq!(AgentId::new(u64::MAX).next(), None);
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = AgentId::new(42);
        let json = serde_json::to_string(&original).ok();
        assert_eq!(json.as_deref(), Some("42"));
        let restored: Result<AgentId, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(original));
    }

    #[test]
    fn ids_order_by_creation() {
        assert!(AgentId::new(1) < AgentId::new(2));
        assert_eq!(AgentId::new(3).to_string(), "#3");
    }
}

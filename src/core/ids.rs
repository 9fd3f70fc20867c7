//! Opaque identifiers for booking states and transitions.
//!
//! Both identifiers are thin string newtypes. They carry no validation of
//! their own: whether a state or transition is legal is decided solely by
//! its presence in a [`TransitionTable`](super::TransitionTable).

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! identifier {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from anything string-like.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is the empty string.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Consume the identifier, returning the inner string.
            pub fn into_inner(self) -> String {
                self.0
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

        impl From<&$name> for $name {
            fn from(value: &$name) -> Self {
                value.clone()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

identifier! {
    /// Key of a booking status, e.g. `"pending"` or `"confirmed"`.
    StateKey
}

identifier! {
    /// Name of a transition between two statuses, e.g. `"confirm"`.
    TransitionName
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn identifiers_compare_with_plain_strings() {
        let state = StateKey::from("pending");
        assert_eq!(state, "pending");
        assert_eq!(state.as_str(), "pending");
        assert_ne!(state, StateKey::from("confirmed"));
    }

    #[test]
    fn empty_transition_is_allowed() {
        let name = TransitionName::default();
        assert!(name.is_empty());
        assert_eq!(name.to_string(), "");
    }

    #[test]
    fn identifiers_serialize_as_bare_strings() {
        let name = TransitionName::new("confirm");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"confirm\"");

        let back: TransitionName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn map_lookup_by_str_borrow() {
        let mut map = BTreeMap::new();
        map.insert(StateKey::from("pending"), 1);
        assert_eq!(map.get("pending"), Some(&1));
    }
}

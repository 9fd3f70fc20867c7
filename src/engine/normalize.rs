//! Normalization of requested transition names.

use crate::core::TransitionName;
use std::collections::BTreeMap;

/// Maps the transition name a caller asked for to the one submitted to the
/// state machine.
pub trait TransitionNormalizer<B>: Send + Sync {
    fn normalize(&self, booking: &B, transition: TransitionName) -> TransitionName;
}

/// Passes transition names through unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityNormalizer;

impl<B> TransitionNormalizer<B> for IdentityNormalizer {
    fn normalize(&self, _booking: &B, transition: TransitionName) -> TransitionName {
        transition
    }
}

/// Replaces known aliases with their canonical transition name.
///
/// Names without an alias entry pass through unchanged. Aliases are not
/// chained: an alias resolving to another alias is submitted as-is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasNormalizer {
    aliases: BTreeMap<TransitionName, TransitionName>,
}

impl AliasNormalizer {
    pub fn new() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    pub fn with_alias(
        mut self,
        alias: impl Into<TransitionName>,
        canonical: impl Into<TransitionName>,
    ) -> Self {
        self.aliases.insert(alias.into(), canonical.into());
        self
    }

    pub fn aliases(&self) -> &BTreeMap<TransitionName, TransitionName> {
        &self.aliases
    }
}

impl From<BTreeMap<TransitionName, TransitionName>> for AliasNormalizer {
    fn from(aliases: BTreeMap<TransitionName, TransitionName>) -> Self {
        Self { aliases }
    }
}

impl<B> TransitionNormalizer<B> for AliasNormalizer {
    fn normalize(&self, _booking: &B, transition: TransitionName) -> TransitionName {
        match self.aliases.get(&transition) {
            Some(canonical) => canonical.clone(),
            None => transition,
        }
    }
}

impl<B, F> TransitionNormalizer<B> for F
where
    F: Fn(&B, TransitionName) -> TransitionName + Send + Sync,
{
    fn normalize(&self, booking: &B, transition: TransitionName) -> TransitionName {
        self(booking, transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_keeps_name() {
        let name = IdentityNormalizer.normalize(&(), TransitionName::from("confirm"));
        assert_eq!(name, "confirm");

        let empty = IdentityNormalizer.normalize(&(), TransitionName::default());
        assert!(empty.is_empty());
    }

    #[test]
    fn alias_resolves_to_canonical() {
        let normalizer = AliasNormalizer::new()
            .with_alias("approve", "confirm")
            .with_alias("accept", "confirm");

        assert_eq!(normalizer.normalize(&(), "approve".into()), "confirm");
        assert_eq!(normalizer.normalize(&(), "accept".into()), "confirm");
        assert_eq!(normalizer.normalize(&(), "cancel".into()), "cancel");
    }

    #[test]
    fn aliases_are_not_chained() {
        let normalizer = AliasNormalizer::new()
            .with_alias("a", "b")
            .with_alias("b", "c");

        assert_eq!(normalizer.normalize(&(), "a".into()), "b");
    }

    #[test]
    fn closures_can_normalize_using_the_booking() {
        let normalizer = |prefix: &&str, transition: TransitionName| {
            TransitionName::new(format!("{}-{}", prefix, transition))
        };

        assert_eq!(normalizer.normalize(&"vip", "confirm".into()), "vip-confirm");
    }
}

//! Generic override-chain traversal
//!
//! The two merge behaviors are written once here. `scalar` implements the
//! strict override: the scope's own explicit value, normalized, else
//! whatever the parent resolves. `union` implements the additive merge for
//! type-set options: the scope's own declared set unioned with the parent's
//! resolved set. Absence of an explicit value is the only thing that
//! triggers delegation; a present value always normalizes, because scopes
//! reject unrecognizable values at construction.

use std::collections::BTreeSet;

use crate::options::key::{MergeStrategy, OptionKey, RawValue};
use crate::options::policy::{
    BuilderStrategy, CollectionMappingStrategy, InjectionStrategy, MappingInheritanceStrategy,
    NullCollectionMappingStrategy, NullValueCheckStrategy, NullValueMappingStrategy,
    NullValuePropertyMappingStrategy, ReportingPolicy,
};
use crate::spec::{OptionScope, TypeRef};

/// Typed views of a raw option value.
pub(crate) trait OptionValue: Sized {
    fn from_raw(raw: &RawValue) -> Option<Self>;
}

impl OptionValue for String {
    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Text(text) => Some(text.clone()),
            _ => None,
        }
    }
}

impl OptionValue for bool {
    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl OptionValue for ReportingPolicy {
    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Text(token) => Self::from_token(token),
            _ => None,
        }
    }
}

impl OptionValue for InjectionStrategy {
    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Text(token) => Self::from_token(token),
            _ => None,
        }
    }
}

impl OptionValue for MappingInheritanceStrategy {
    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Text(token) => Self::from_token(token),
            _ => None,
        }
    }
}

impl OptionValue for CollectionMappingStrategy {
    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Text(token) => Self::from_token(token),
            _ => None,
        }
    }
}

impl OptionValue for BuilderStrategy {
    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Text(token) => Self::from_token(token),
            _ => None,
        }
    }
}

impl OptionValue for NullValueCheckStrategy {
    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Text(token) => Self::from_token(token),
            _ => None,
        }
    }
}

impl OptionValue for NullValuePropertyMappingStrategy {
    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Text(token) => Self::from_token(token),
            _ => None,
        }
    }
}

impl OptionValue for NullValueMappingStrategy {
    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Text(token) => Self::from_token(token),
            _ => None,
        }
    }
}

impl OptionValue for NullCollectionMappingStrategy {
    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Text(token) => Self::from_token(token),
            _ => None,
        }
    }
}

/// Resolve a strict-override option: the scope's own explicit value,
/// normalized, else the parent's resolution.
pub(crate) fn scalar<T: OptionValue>(
    scope: &OptionScope,
    key: OptionKey,
    inherit: impl FnOnce() -> T,
) -> T {
    debug_assert_eq!(key.merge_strategy(), MergeStrategy::Override);
    match scope.raw(key) {
        Some(raw) => {
            T::from_raw(raw).expect("scopes only admit kind-checked, recognized option values")
        }
        None => inherit(),
    }
}

/// Resolve an additive-union option: the scope's own declared set unioned
/// with the already resolved parent set.
pub(crate) fn union(
    scope: &OptionScope,
    key: OptionKey,
    inherited: BTreeSet<TypeRef>,
) -> BTreeSet<TypeRef> {
    debug_assert_eq!(key.merge_strategy(), MergeStrategy::Union);
    let mut resolved = inherited;
    if let Some(RawValue::Types(own)) = scope.raw(key) {
        resolved.extend(own.iter().cloned());
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::DeclarationId;

    fn scope() -> OptionScope {
        OptionScope::new(DeclarationId::new("mapping.toml", "CustomerMapper"))
    }

    fn type_refs(paths: &[&str]) -> Vec<TypeRef> {
        paths.iter().map(|p| TypeRef::parse(p).unwrap()).collect()
    }

    #[test]
    fn test_scalar_prefers_own_value() {
        let mut scope = scope();
        scope
            .try_insert(
                OptionKey::UnmappedTargetPolicy,
                RawValue::Text("error".to_string()),
            )
            .unwrap();

        let resolved: ReportingPolicy = scalar(&scope, OptionKey::UnmappedTargetPolicy, || {
            panic!("parent must not be consulted")
        });
        assert_eq!(resolved, ReportingPolicy::Error);
    }

    #[test]
    fn test_scalar_inherits_when_unset() {
        let scope = scope();
        let resolved: ReportingPolicy =
            scalar(&scope, OptionKey::UnmappedTargetPolicy, || ReportingPolicy::Ignore);
        assert_eq!(resolved, ReportingPolicy::Ignore);
    }

    #[test]
    fn test_union_merges_disjoint_sets() {
        let mut scope = scope();
        scope
            .try_insert(OptionKey::Uses, RawValue::Types(type_refs(&["a::TypeA"])))
            .unwrap();

        let inherited: BTreeSet<_> = type_refs(&["b::TypeB"]).into_iter().collect();
        let resolved = union(&scope, OptionKey::Uses, inherited);
        assert_eq!(resolved, type_refs(&["a::TypeA", "b::TypeB"]).into_iter().collect());
    }

    #[test]
    fn test_union_deduplicates_overlap() {
        let mut scope = scope();
        scope
            .try_insert(
                OptionKey::Uses,
                RawValue::Types(type_refs(&["a::TypeA", "b::TypeB"])),
            )
            .unwrap();

        let inherited: BTreeSet<_> = type_refs(&["b::TypeB"]).into_iter().collect();
        let resolved = union(&scope, OptionKey::Uses, inherited);
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn test_union_with_empty_own_set_is_parent() {
        let scope = scope();
        let inherited: BTreeSet<_> = type_refs(&["b::TypeB"]).into_iter().collect();
        let resolved = union(&scope, OptionKey::Uses, inherited.clone());
        assert_eq!(resolved, inherited);
    }
}

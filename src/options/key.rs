//! Option identity table
//!
//! Every option recognized on a mapping declaration is listed here once,
//! together with its attribute name, its raw value kind, its token
//! vocabulary (for policy options), and its merge strategy. The resolution
//! walk in `resolve` is written once against this table.

use std::fmt;

use crate::options::policy::{
    BuilderStrategy, CollectionMappingStrategy, InjectionStrategy, MappingInheritanceStrategy,
    NullCollectionMappingStrategy, NullValueCheckStrategy, NullValueMappingStrategy,
    NullValuePropertyMappingStrategy, ReportingPolicy,
};
use crate::spec::TypeRef;

/// How an option combines with values inherited from less specific scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// The most specific explicitly set value wins outright.
    Override,
    /// The explicitly declared set is unioned with the inherited set.
    Union,
}

/// The raw value kind an option accepts on a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A string: free text or a policy token.
    Text,
    /// A boolean.
    Flag,
    /// A list of declared type references.
    Types,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValueKind::Text => "text",
            ValueKind::Flag => "flag",
            ValueKind::Types => "type list",
        };
        f.write_str(label)
    }
}

/// An option value as observed on a declaration, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    Flag(bool),
    Types(Vec<TypeRef>),
}

impl RawValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            RawValue::Text(_) => ValueKind::Text,
            RawValue::Flag(_) => ValueKind::Flag,
            RawValue::Types(_) => ValueKind::Types,
        }
    }
}

/// Identity of one recognized configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionKey {
    ImplementationName,
    ImplementationModule,
    Uses,
    Imports,
    UnmappedTargetPolicy,
    UnmappedSourcePolicy,
    TypeConversionPolicy,
    DisableSubMappingMethods,
    ComponentModel,
    InjectionStrategy,
    MappingInheritanceStrategy,
    CollectionMappingStrategy,
    Builder,
    NullValueCheckStrategy,
    NullValuePropertyMappingStrategy,
    NullValueMappingStrategy,
    NullCollectionMappingStrategy,
}

impl OptionKey {
    /// Every recognized option, in declaration-table order.
    pub const ALL: [OptionKey; 17] = [
        OptionKey::ImplementationName,
        OptionKey::ImplementationModule,
        OptionKey::Uses,
        OptionKey::Imports,
        OptionKey::UnmappedTargetPolicy,
        OptionKey::UnmappedSourcePolicy,
        OptionKey::TypeConversionPolicy,
        OptionKey::DisableSubMappingMethods,
        OptionKey::ComponentModel,
        OptionKey::InjectionStrategy,
        OptionKey::MappingInheritanceStrategy,
        OptionKey::CollectionMappingStrategy,
        OptionKey::Builder,
        OptionKey::NullValueCheckStrategy,
        OptionKey::NullValuePropertyMappingStrategy,
        OptionKey::NullValueMappingStrategy,
        OptionKey::NullCollectionMappingStrategy,
    ];

    /// The attribute name used in spec files and snapshots.
    pub fn attr_name(self) -> &'static str {
        match self {
            OptionKey::ImplementationName => "implementation_name",
            OptionKey::ImplementationModule => "implementation_module",
            OptionKey::Uses => "uses",
            OptionKey::Imports => "imports",
            OptionKey::UnmappedTargetPolicy => "unmapped_target_policy",
            OptionKey::UnmappedSourcePolicy => "unmapped_source_policy",
            OptionKey::TypeConversionPolicy => "type_conversion_policy",
            OptionKey::DisableSubMappingMethods => "disable_sub_mapping_methods",
            OptionKey::ComponentModel => "component_model",
            OptionKey::InjectionStrategy => "injection_strategy",
            OptionKey::MappingInheritanceStrategy => "mapping_inheritance_strategy",
            OptionKey::CollectionMappingStrategy => "collection_mapping_strategy",
            OptionKey::Builder => "builder",
            OptionKey::NullValueCheckStrategy => "null_value_check_strategy",
            OptionKey::NullValuePropertyMappingStrategy => "null_value_property_mapping_strategy",
            OptionKey::NullValueMappingStrategy => "null_value_mapping_strategy",
            OptionKey::NullCollectionMappingStrategy => "null_collection_mapping_strategy",
        }
    }

    /// Look up an option by its attribute name.
    pub fn from_attr_name(name: &str) -> Option<Self> {
        OptionKey::ALL.into_iter().find(|key| key.attr_name() == name)
    }

    pub fn kind(self) -> ValueKind {
        match self {
            OptionKey::Uses | OptionKey::Imports => ValueKind::Types,
            OptionKey::DisableSubMappingMethods => ValueKind::Flag,
            _ => ValueKind::Text,
        }
    }

    pub fn merge_strategy(self) -> MergeStrategy {
        match self {
            OptionKey::Uses | OptionKey::Imports => MergeStrategy::Union,
            _ => MergeStrategy::Override,
        }
    }

    /// Closed token vocabulary for policy options; `None` for free-form
    /// text, flags, and type lists.
    pub fn tokens(self) -> Option<&'static [&'static str]> {
        match self {
            OptionKey::UnmappedTargetPolicy
            | OptionKey::UnmappedSourcePolicy
            | OptionKey::TypeConversionPolicy => Some(ReportingPolicy::TOKENS),
            OptionKey::InjectionStrategy => Some(InjectionStrategy::TOKENS),
            OptionKey::MappingInheritanceStrategy => Some(MappingInheritanceStrategy::TOKENS),
            OptionKey::CollectionMappingStrategy => Some(CollectionMappingStrategy::TOKENS),
            OptionKey::Builder => Some(BuilderStrategy::TOKENS),
            OptionKey::NullValueCheckStrategy => Some(NullValueCheckStrategy::TOKENS),
            OptionKey::NullValuePropertyMappingStrategy => {
                Some(NullValuePropertyMappingStrategy::TOKENS)
            }
            OptionKey::NullValueMappingStrategy => Some(NullValueMappingStrategy::TOKENS),
            OptionKey::NullCollectionMappingStrategy => Some(NullCollectionMappingStrategy::TOKENS),
            _ => None,
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attr_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_name_round_trip() {
        for key in OptionKey::ALL {
            assert_eq!(OptionKey::from_attr_name(key.attr_name()), Some(key));
        }
    }

    #[test]
    fn test_unknown_attr_name() {
        assert_eq!(OptionKey::from_attr_name("no_such_option"), None);
        assert_eq!(OptionKey::from_attr_name("config"), None);
        assert_eq!(OptionKey::from_attr_name("name"), None);
    }

    #[test]
    fn test_merge_strategy_table() {
        assert_eq!(OptionKey::Uses.merge_strategy(), MergeStrategy::Union);
        assert_eq!(OptionKey::Imports.merge_strategy(), MergeStrategy::Union);

        // The type-set options are the only additive ones
        let union_count = OptionKey::ALL
            .iter()
            .filter(|key| key.merge_strategy() == MergeStrategy::Union)
            .count();
        assert_eq!(union_count, 2);
    }

    #[test]
    fn test_union_options_hold_type_lists() {
        assert_eq!(OptionKey::Uses.kind(), ValueKind::Types);
        assert_eq!(OptionKey::Imports.kind(), ValueKind::Types);
        assert_eq!(OptionKey::DisableSubMappingMethods.kind(), ValueKind::Flag);
        assert_eq!(OptionKey::ComponentModel.kind(), ValueKind::Text);
    }

    #[test]
    fn test_policy_options_have_vocabularies() {
        assert!(OptionKey::UnmappedTargetPolicy.tokens().is_some());
        assert!(OptionKey::CollectionMappingStrategy.tokens().is_some());
        assert!(OptionKey::ImplementationName.tokens().is_none());
        assert!(OptionKey::Uses.tokens().is_none());
        assert!(OptionKey::DisableSubMappingMethods.tokens().is_none());
    }

    #[test]
    fn test_raw_value_kind() {
        assert_eq!(RawValue::Text("warn".to_string()).kind(), ValueKind::Text);
        assert_eq!(RawValue::Flag(true).kind(), ValueKind::Flag);
        assert_eq!(RawValue::Types(vec![]).kind(), ValueKind::Types);
    }
}

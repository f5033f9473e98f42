//! Option resolution
//!
//! Implements the three-level override chain that turns declared option
//! values into one fully resolved configuration per mapper:
//!
//! 1. The mapper's own declaration (`MapperOptions`)
//! 2. An optional shared config it references (`SharedConfigOptions`)
//! 3. The tool-wide defaults (`DefaultOptions`)
//!
//! Each level holds its parent by composition and resolves every option
//! with the same rule: the level's own explicit value if set, otherwise
//! whatever the parent resolves. Type-set options (`uses`, `imports`)
//! instead union their declared members with the parent's resolved set.
//! The terminal level answers everything, so resolution never comes back
//! empty.

mod defaults;
mod effective;
mod key;
mod mapper;
mod policy;
mod resolve;
mod shared;

pub use defaults::{DefaultOptions, DefaultsError, ToolDefaults};
pub use effective::{EffectiveOptions, OptionEntry, OptionOrigin, SCHEMA_ID, SCHEMA_VERSION};
pub use key::{MergeStrategy, OptionKey, RawValue, ValueKind};
pub use mapper::MapperOptions;
pub use policy::{
    BuilderStrategy, CollectionMappingStrategy, InjectionStrategy, MappingInheritanceStrategy,
    NullCollectionMappingStrategy, NullValueCheckStrategy, NullValueMappingStrategy,
    NullValuePropertyMappingStrategy, ReportingPolicy,
};
pub use shared::SharedConfigOptions;

use std::collections::BTreeSet;
use std::fmt;

use crate::spec::TypeRef;

/// The contract shared by every level of the resolution chain.
///
/// Accessors are pure reads over an immutable chain: the receiver's own
/// explicit, normalized value when set, else the parent level's result.
/// A level may have no values of its own and pass everything through; only
/// the terminal level has no parent, and it answers every accessor from
/// the tool defaults. Chains built for different mappers may share that
/// terminal level across threads, hence `Send + Sync`.
pub trait OptionsChain: fmt::Debug + Send + Sync {
    /// Name template for generated implementations.
    fn implementation_name(&self) -> String;

    /// Module template for generated implementations.
    fn implementation_module(&self) -> String;

    /// Mapper types the generated implementation may delegate to.
    fn uses(&self) -> BTreeSet<TypeRef>;

    /// Types imported into the generated implementation.
    fn imports(&self) -> BTreeSet<TypeRef>;

    /// Reporting of target properties left unmapped.
    fn unmapped_target_policy(&self) -> ReportingPolicy;

    /// Reporting of source properties left unmapped.
    fn unmapped_source_policy(&self) -> ReportingPolicy;

    /// Reporting of implicit type-conversion usage.
    fn type_conversion_policy(&self) -> ReportingPolicy;

    /// Whether helper sub-mapping methods are suppressed.
    fn disable_sub_mapping_methods(&self) -> bool;

    /// Component wiring of the generated implementation.
    fn component_model(&self) -> String;

    /// How collaborators are injected.
    fn injection_strategy(&self) -> InjectionStrategy;

    /// Inheritance of mapping declarations between related methods.
    fn mapping_inheritance_strategy(&self) -> MappingInheritanceStrategy;

    /// How target collections are written.
    fn collection_mapping_strategy(&self) -> CollectionMappingStrategy;

    /// Builder usage for target construction.
    fn builder(&self) -> BuilderStrategy;

    /// When source values get null checks.
    fn null_value_check_strategy(&self) -> NullValueCheckStrategy;

    /// Target write for absent source properties.
    fn null_value_property_mapping_strategy(&self) -> NullValuePropertyMappingStrategy;

    /// Result of converting an absent source value.
    fn null_value_mapping_strategy(&self) -> NullValueMappingStrategy;

    /// Result of mapping an absent source collection or map.
    fn null_collection_mapping_strategy(&self) -> NullCollectionMappingStrategy;
}

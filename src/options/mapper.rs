//! Mapper chain level
//!
//! The head of the resolution chain for one mapper declaration. Resolves
//! every recognized option with the own-value-else-parent contract and
//! additionally answers mapper-only questions (shared-config identity,
//! structural validity, declaration identity) that never delegate.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::options::key::OptionKey;
use crate::options::policy::{
    BuilderStrategy, CollectionMappingStrategy, InjectionStrategy, MappingInheritanceStrategy,
    NullCollectionMappingStrategy, NullValueCheckStrategy, NullValueMappingStrategy,
    NullValuePropertyMappingStrategy, ReportingPolicy,
};
use crate::options::shared::SharedConfigOptions;
use crate::options::{resolve, OptionsChain};
use crate::spec::{DeclarationId, OptionScope, ScopeIndex, SharedConfigRef, SpecFile, TypeRef};

/// Fully resolved options for one mapper declaration.
///
/// Built once per mapper during analysis and read by the code emitter; the
/// chain behind it is immutable, so accessors are pure reads.
#[derive(Debug)]
pub struct MapperOptions {
    scope: OptionScope,
    shared_config_type: Option<TypeRef>,
    shared: Option<Arc<SharedConfigOptions>>,
    defaults: Arc<dyn OptionsChain>,
}

impl MapperOptions {
    /// Build the resolution chain for one mapper scope.
    ///
    /// The scope's `config` attribute selects the parent level: a declared
    /// type reference that names a shared config in `shared` puts that
    /// shared config between the mapper and the defaults. A reference of
    /// any other observed kind, or one that names no declared shared
    /// config, is deliberately treated as "no shared config" rather than
    /// an error, so partially specified specs still resolve; the mapper
    /// then sits directly over the defaults.
    pub fn resolve(
        scope: OptionScope,
        shared: &ScopeIndex,
        defaults: Arc<dyn OptionsChain>,
    ) -> Self {
        let (shared_config_type, shared_link) = match scope.shared_config() {
            Some(SharedConfigRef::Declared(reference)) => match shared.get(reference) {
                Some(shared_scope) => (
                    Some(reference.clone()),
                    Some(Arc::new(SharedConfigOptions::new(
                        shared_scope.clone(),
                        Arc::clone(&defaults),
                    ))),
                ),
                None => (None, None),
            },
            _ => (None, None),
        };
        Self {
            scope,
            shared_config_type,
            shared: shared_link,
            defaults,
        }
    }

    /// Resolve every mapper declared in a parsed spec file.
    pub fn resolve_file(spec: &SpecFile, defaults: &Arc<dyn OptionsChain>) -> Vec<Self> {
        spec.mappers
            .iter()
            .map(|scope| Self::resolve(scope.clone(), &spec.shared, Arc::clone(defaults)))
            .collect()
    }

    fn parent(&self) -> &dyn OptionsChain {
        match &self.shared {
            Some(shared) => shared.as_ref(),
            None => self.defaults.as_ref(),
        }
    }

    /// Whether the declaration references a resolvable shared config.
    pub fn has_shared_config(&self) -> bool {
        self.shared_config_type.is_some()
    }

    /// The shared config's declared type, if one is referenced.
    pub fn shared_config_type(&self) -> Option<&TypeRef> {
        self.shared_config_type.as_ref()
    }

    /// Whether the mapper's own declaration parsed to a structurally valid
    /// state. Callers must not generate code for an invalid mapper.
    pub fn is_valid(&self) -> bool {
        self.scope.is_valid()
    }

    /// Identity of the underlying declaration, for diagnostic anchoring.
    pub fn declaration(&self) -> &DeclarationId {
        self.scope.declaration()
    }

    /// A mapper is always backed by a concrete declaration, never by a
    /// synthetic defaults-only placeholder.
    pub fn is_configured(&self) -> bool {
        true
    }

    pub(crate) fn scope(&self) -> &OptionScope {
        &self.scope
    }

    pub(crate) fn shared_link(&self) -> Option<&SharedConfigOptions> {
        self.shared.as_deref()
    }

    pub(crate) fn defaults_link(&self) -> &dyn OptionsChain {
        self.defaults.as_ref()
    }
}

impl OptionsChain for MapperOptions {
    fn implementation_name(&self) -> String {
        resolve::scalar(&self.scope, OptionKey::ImplementationName, || {
            self.parent().implementation_name()
        })
    }

    fn implementation_module(&self) -> String {
        resolve::scalar(&self.scope, OptionKey::ImplementationModule, || {
            self.parent().implementation_module()
        })
    }

    fn uses(&self) -> BTreeSet<TypeRef> {
        resolve::union(&self.scope, OptionKey::Uses, self.parent().uses())
    }

    fn imports(&self) -> BTreeSet<TypeRef> {
        resolve::union(&self.scope, OptionKey::Imports, self.parent().imports())
    }

    fn unmapped_target_policy(&self) -> ReportingPolicy {
        resolve::scalar(&self.scope, OptionKey::UnmappedTargetPolicy, || {
            self.parent().unmapped_target_policy()
        })
    }

    fn unmapped_source_policy(&self) -> ReportingPolicy {
        resolve::scalar(&self.scope, OptionKey::UnmappedSourcePolicy, || {
            self.parent().unmapped_source_policy()
        })
    }

    fn type_conversion_policy(&self) -> ReportingPolicy {
        resolve::scalar(&self.scope, OptionKey::TypeConversionPolicy, || {
            self.parent().type_conversion_policy()
        })
    }

    fn disable_sub_mapping_methods(&self) -> bool {
        resolve::scalar(&self.scope, OptionKey::DisableSubMappingMethods, || {
            self.parent().disable_sub_mapping_methods()
        })
    }

    fn component_model(&self) -> String {
        resolve::scalar(&self.scope, OptionKey::ComponentModel, || {
            self.parent().component_model()
        })
    }

    fn injection_strategy(&self) -> InjectionStrategy {
        resolve::scalar(&self.scope, OptionKey::InjectionStrategy, || {
            self.parent().injection_strategy()
        })
    }

    fn mapping_inheritance_strategy(&self) -> MappingInheritanceStrategy {
        resolve::scalar(&self.scope, OptionKey::MappingInheritanceStrategy, || {
            self.parent().mapping_inheritance_strategy()
        })
    }

    fn collection_mapping_strategy(&self) -> CollectionMappingStrategy {
        resolve::scalar(&self.scope, OptionKey::CollectionMappingStrategy, || {
            self.parent().collection_mapping_strategy()
        })
    }

    fn builder(&self) -> BuilderStrategy {
        resolve::scalar(&self.scope, OptionKey::Builder, || self.parent().builder())
    }

    fn null_value_check_strategy(&self) -> NullValueCheckStrategy {
        resolve::scalar(&self.scope, OptionKey::NullValueCheckStrategy, || {
            self.parent().null_value_check_strategy()
        })
    }

    fn null_value_property_mapping_strategy(&self) -> NullValuePropertyMappingStrategy {
        resolve::scalar(&self.scope, OptionKey::NullValuePropertyMappingStrategy, || {
            self.parent().null_value_property_mapping_strategy()
        })
    }

    fn null_value_mapping_strategy(&self) -> NullValueMappingStrategy {
        resolve::scalar(&self.scope, OptionKey::NullValueMappingStrategy, || {
            self.parent().null_value_mapping_strategy()
        })
    }

    fn null_collection_mapping_strategy(&self) -> NullCollectionMappingStrategy {
        resolve::scalar(&self.scope, OptionKey::NullCollectionMappingStrategy, || {
            self.parent().null_collection_mapping_strategy()
        })
    }
}

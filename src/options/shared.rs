//! Shared-config chain level
//!
//! Wraps a reusable `[[shared_config]]` declaration's scope over the
//! terminal level. Sits directly above the defaults and resolves with the
//! plain own-value-else-parent contract; mappers that reference the same
//! shared config each get their own wrapper over the one shared terminal.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::options::key::OptionKey;
use crate::options::policy::{
    BuilderStrategy, CollectionMappingStrategy, InjectionStrategy, MappingInheritanceStrategy,
    NullCollectionMappingStrategy, NullValueCheckStrategy, NullValueMappingStrategy,
    NullValuePropertyMappingStrategy, ReportingPolicy,
};
use crate::options::{resolve, OptionsChain};
use crate::spec::{OptionScope, TypeRef};

/// Options declared on a shared config, resolving over the tool defaults.
#[derive(Debug)]
pub struct SharedConfigOptions {
    scope: OptionScope,
    parent: Arc<dyn OptionsChain>,
}

impl SharedConfigOptions {
    pub fn new(scope: OptionScope, parent: Arc<dyn OptionsChain>) -> Self {
        Self { scope, parent }
    }

    pub(crate) fn scope(&self) -> &OptionScope {
        &self.scope
    }
}

impl OptionsChain for SharedConfigOptions {
    fn implementation_name(&self) -> String {
        resolve::scalar(&self.scope, OptionKey::ImplementationName, || {
            self.parent.implementation_name()
        })
    }

    fn implementation_module(&self) -> String {
        resolve::scalar(&self.scope, OptionKey::ImplementationModule, || {
            self.parent.implementation_module()
        })
    }

    fn uses(&self) -> BTreeSet<TypeRef> {
        resolve::union(&self.scope, OptionKey::Uses, self.parent.uses())
    }

    fn imports(&self) -> BTreeSet<TypeRef> {
        resolve::union(&self.scope, OptionKey::Imports, self.parent.imports())
    }

    fn unmapped_target_policy(&self) -> ReportingPolicy {
        resolve::scalar(&self.scope, OptionKey::UnmappedTargetPolicy, || {
            self.parent.unmapped_target_policy()
        })
    }

    fn unmapped_source_policy(&self) -> ReportingPolicy {
        resolve::scalar(&self.scope, OptionKey::UnmappedSourcePolicy, || {
            self.parent.unmapped_source_policy()
        })
    }

    fn type_conversion_policy(&self) -> ReportingPolicy {
        resolve::scalar(&self.scope, OptionKey::TypeConversionPolicy, || {
            self.parent.type_conversion_policy()
        })
    }

    fn disable_sub_mapping_methods(&self) -> bool {
        resolve::scalar(&self.scope, OptionKey::DisableSubMappingMethods, || {
            self.parent.disable_sub_mapping_methods()
        })
    }

    fn component_model(&self) -> String {
        resolve::scalar(&self.scope, OptionKey::ComponentModel, || {
            self.parent.component_model()
        })
    }

    fn injection_strategy(&self) -> InjectionStrategy {
        resolve::scalar(&self.scope, OptionKey::InjectionStrategy, || {
            self.parent.injection_strategy()
        })
    }

    fn mapping_inheritance_strategy(&self) -> MappingInheritanceStrategy {
        resolve::scalar(&self.scope, OptionKey::MappingInheritanceStrategy, || {
            self.parent.mapping_inheritance_strategy()
        })
    }

    fn collection_mapping_strategy(&self) -> CollectionMappingStrategy {
        resolve::scalar(&self.scope, OptionKey::CollectionMappingStrategy, || {
            self.parent.collection_mapping_strategy()
        })
    }

    fn builder(&self) -> BuilderStrategy {
        resolve::scalar(&self.scope, OptionKey::Builder, || self.parent.builder())
    }

    fn null_value_check_strategy(&self) -> NullValueCheckStrategy {
        resolve::scalar(&self.scope, OptionKey::NullValueCheckStrategy, || {
            self.parent.null_value_check_strategy()
        })
    }

    fn null_value_property_mapping_strategy(&self) -> NullValuePropertyMappingStrategy {
        resolve::scalar(&self.scope, OptionKey::NullValuePropertyMappingStrategy, || {
            self.parent.null_value_property_mapping_strategy()
        })
    }

    fn null_value_mapping_strategy(&self) -> NullValueMappingStrategy {
        resolve::scalar(&self.scope, OptionKey::NullValueMappingStrategy, || {
            self.parent.null_value_mapping_strategy()
        })
    }

    fn null_collection_mapping_strategy(&self) -> NullCollectionMappingStrategy {
        resolve::scalar(&self.scope, OptionKey::NullCollectionMappingStrategy, || {
            self.parent.null_collection_mapping_strategy()
        })
    }
}

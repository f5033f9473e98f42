//! Tool-wide default option values (the terminal chain level)
//!
//! `ToolDefaults` owns the documented default for every recognized option.
//! Every field is concrete, so the terminal link can answer every accessor
//! without further delegation; resolution always bottoms out with a value.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::options::policy::{
    BuilderStrategy, CollectionMappingStrategy, InjectionStrategy, MappingInheritanceStrategy,
    NullCollectionMappingStrategy, NullValueCheckStrategy, NullValueMappingStrategy,
    NullValuePropertyMappingStrategy, ReportingPolicy,
};
use crate::options::OptionsChain;
use crate::spec::TypeRef;

/// Error types for tool-defaults loading
#[derive(Debug, thiserror::Error)]
pub enum DefaultsError {
    #[error("failed to read defaults file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Default values for every recognized option.
///
/// Operators may override individual entries from a TOML file; anything
/// unspecified keeps its documented default. Naming targets use the
/// placeholders `<NAME>` (the mapper's declared name) and `<MODULE>` (the
/// module the mapper is declared in), substituted by the code emitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolDefaults {
    /// Name template for generated implementations (default: "<NAME>Impl")
    pub implementation_name: String,

    /// Module template for generated implementations (default: "<MODULE>")
    pub implementation_module: String,

    /// Mapper types every generated implementation may delegate to
    pub uses: BTreeSet<TypeRef>,

    /// Types imported into every generated implementation
    pub imports: BTreeSet<TypeRef>,

    /// Reporting of target properties left unmapped (default: warn)
    pub unmapped_target_policy: ReportingPolicy,

    /// Reporting of source properties left unmapped (default: ignore)
    pub unmapped_source_policy: ReportingPolicy,

    /// Reporting of implicit type-conversion usage (default: ignore)
    pub type_conversion_policy: ReportingPolicy,

    /// Suppress generation of helper sub-mapping methods (default: false)
    pub disable_sub_mapping_methods: bool,

    /// Component wiring of generated implementations (default: "default")
    pub component_model: String,

    /// How collaborators are injected (default: field)
    pub injection_strategy: InjectionStrategy,

    /// Inheritance of mapping declarations (default: explicit)
    pub mapping_inheritance_strategy: MappingInheritanceStrategy,

    /// How target collections are written (default: accessor-only)
    pub collection_mapping_strategy: CollectionMappingStrategy,

    /// Builder usage for target construction (default: enabled)
    pub builder: BuilderStrategy,

    /// When source values get null checks (default: on-implicit-conversion)
    pub null_value_check_strategy: NullValueCheckStrategy,

    /// Target write for absent source properties (default: set-to-null)
    pub null_value_property_mapping_strategy: NullValuePropertyMappingStrategy,

    /// Result of converting an absent source value (default: return-null)
    pub null_value_mapping_strategy: NullValueMappingStrategy,

    /// Result of mapping an absent collection or map (default: return-null)
    pub null_collection_mapping_strategy: NullCollectionMappingStrategy,
}

impl Default for ToolDefaults {
    fn default() -> Self {
        Self {
            implementation_name: "<NAME>Impl".to_string(),
            implementation_module: "<MODULE>".to_string(),
            uses: BTreeSet::new(),
            imports: BTreeSet::new(),
            unmapped_target_policy: ReportingPolicy::Warn,
            unmapped_source_policy: ReportingPolicy::Ignore,
            type_conversion_policy: ReportingPolicy::Ignore,
            disable_sub_mapping_methods: false,
            component_model: "default".to_string(),
            injection_strategy: InjectionStrategy::Field,
            mapping_inheritance_strategy: MappingInheritanceStrategy::Explicit,
            collection_mapping_strategy: CollectionMappingStrategy::AccessorOnly,
            builder: BuilderStrategy::Enabled,
            null_value_check_strategy: NullValueCheckStrategy::OnImplicitConversion,
            null_value_property_mapping_strategy: NullValuePropertyMappingStrategy::SetToNull,
            null_value_mapping_strategy: NullValueMappingStrategy::ReturnNull,
            null_collection_mapping_strategy: NullCollectionMappingStrategy::ReturnNull,
        }
    }
}

impl ToolDefaults {
    /// Load defaults overrides from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, DefaultsError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Parse defaults overrides from a TOML string.
    pub fn from_str(s: &str) -> Result<Self, DefaultsError> {
        let defaults: ToolDefaults = toml::from_str(s)?;
        defaults.validate()?;
        Ok(defaults)
    }

    /// Validate the configured values.
    pub fn validate(&self) -> Result<(), DefaultsError> {
        if self.implementation_name.is_empty() {
            return Err(DefaultsError::Validation(
                "implementation_name must not be empty".to_string(),
            ));
        }
        if self.implementation_module.is_empty() {
            return Err(DefaultsError::Validation(
                "implementation_module must not be empty".to_string(),
            ));
        }
        if self.component_model.is_empty() {
            return Err(DefaultsError::Validation(
                "component_model must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// The terminal chain level, backed by the injected tool defaults.
///
/// Has no parent and never delegates; by construction it answers every
/// accessor, which is what guarantees the whole chain resolves every
/// option.
#[derive(Debug)]
pub struct DefaultOptions {
    defaults: ToolDefaults,
}

impl DefaultOptions {
    pub fn new(defaults: ToolDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &ToolDefaults {
        &self.defaults
    }
}

impl OptionsChain for DefaultOptions {
    fn implementation_name(&self) -> String {
        self.defaults.implementation_name.clone()
    }

    fn implementation_module(&self) -> String {
        self.defaults.implementation_module.clone()
    }

    fn uses(&self) -> BTreeSet<TypeRef> {
        self.defaults.uses.clone()
    }

    fn imports(&self) -> BTreeSet<TypeRef> {
        self.defaults.imports.clone()
    }

    fn unmapped_target_policy(&self) -> ReportingPolicy {
        self.defaults.unmapped_target_policy
    }

    fn unmapped_source_policy(&self) -> ReportingPolicy {
        self.defaults.unmapped_source_policy
    }

    fn type_conversion_policy(&self) -> ReportingPolicy {
        self.defaults.type_conversion_policy
    }

    fn disable_sub_mapping_methods(&self) -> bool {
        self.defaults.disable_sub_mapping_methods
    }

    fn component_model(&self) -> String {
        self.defaults.component_model.clone()
    }

    fn injection_strategy(&self) -> InjectionStrategy {
        self.defaults.injection_strategy
    }

    fn mapping_inheritance_strategy(&self) -> MappingInheritanceStrategy {
        self.defaults.mapping_inheritance_strategy
    }

    fn collection_mapping_strategy(&self) -> CollectionMappingStrategy {
        self.defaults.collection_mapping_strategy
    }

    fn builder(&self) -> BuilderStrategy {
        self.defaults.builder
    }

    fn null_value_check_strategy(&self) -> NullValueCheckStrategy {
        self.defaults.null_value_check_strategy
    }

    fn null_value_property_mapping_strategy(&self) -> NullValuePropertyMappingStrategy {
        self.defaults.null_value_property_mapping_strategy
    }

    fn null_value_mapping_strategy(&self) -> NullValueMappingStrategy {
        self.defaults.null_value_mapping_strategy
    }

    fn null_collection_mapping_strategy(&self) -> NullCollectionMappingStrategy {
        self.defaults.null_collection_mapping_strategy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_documented_defaults() {
        let defaults = ToolDefaults::default();
        assert_eq!(defaults.implementation_name, "<NAME>Impl");
        assert_eq!(defaults.implementation_module, "<MODULE>");
        assert!(defaults.uses.is_empty());
        assert!(defaults.imports.is_empty());
        assert_eq!(defaults.unmapped_target_policy, ReportingPolicy::Warn);
        assert_eq!(defaults.unmapped_source_policy, ReportingPolicy::Ignore);
        assert_eq!(defaults.type_conversion_policy, ReportingPolicy::Ignore);
        assert!(!defaults.disable_sub_mapping_methods);
        assert_eq!(defaults.component_model, "default");
        assert_eq!(defaults.injection_strategy, InjectionStrategy::Field);
        assert_eq!(
            defaults.mapping_inheritance_strategy,
            MappingInheritanceStrategy::Explicit
        );
        assert_eq!(
            defaults.collection_mapping_strategy,
            CollectionMappingStrategy::AccessorOnly
        );
        assert_eq!(defaults.builder, BuilderStrategy::Enabled);
        assert_eq!(
            defaults.null_value_check_strategy,
            NullValueCheckStrategy::OnImplicitConversion
        );
        assert_eq!(
            defaults.null_value_property_mapping_strategy,
            NullValuePropertyMappingStrategy::SetToNull
        );
        assert_eq!(
            defaults.null_value_mapping_strategy,
            NullValueMappingStrategy::ReturnNull
        );
        assert_eq!(
            defaults.null_collection_mapping_strategy,
            NullCollectionMappingStrategy::ReturnNull
        );
    }

    #[test]
    fn test_from_str_overrides_selected_entries() {
        let defaults = ToolDefaults::from_str(
            r#"
            unmapped_target_policy = "error"
            collection_mapping_strategy = "adder-preferred"
            uses = ["helpers::DateMapper"]
            "#,
        )
        .unwrap();

        assert_eq!(defaults.unmapped_target_policy, ReportingPolicy::Error);
        assert_eq!(
            defaults.collection_mapping_strategy,
            CollectionMappingStrategy::AdderPreferred
        );
        assert_eq!(defaults.uses.len(), 1);
        // Unspecified entries keep their documented defaults
        assert_eq!(defaults.unmapped_source_policy, ReportingPolicy::Ignore);
        assert_eq!(defaults.implementation_name, "<NAME>Impl");
    }

    #[test]
    fn test_from_str_rejects_unknown_token() {
        let result = ToolDefaults::from_str(r#"unmapped_target_policy = "shout""#);
        assert!(matches!(result, Err(DefaultsError::Parse(_))));
    }

    #[test]
    fn test_from_str_rejects_bad_type_path() {
        let result = ToolDefaults::from_str(r#"uses = ["Vec<u8>"]"#);
        assert!(matches!(result, Err(DefaultsError::Parse(_))));
    }

    #[test]
    fn test_validation_rejects_empty_naming_targets() {
        let result = ToolDefaults::from_str(r#"implementation_name = """#);
        assert!(matches!(result, Err(DefaultsError::Validation(_))));

        let result = ToolDefaults::from_str(r#"component_model = """#);
        assert!(matches!(result, Err(DefaultsError::Validation(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "unmapped_source_policy = \"warn\"").unwrap();

        let defaults = ToolDefaults::from_file(file.path()).unwrap();
        assert_eq!(defaults.unmapped_source_policy, ReportingPolicy::Warn);
    }

    #[test]
    fn test_terminal_link_answers_every_option() {
        let link = DefaultOptions::new(ToolDefaults::default());
        assert_eq!(link.implementation_name(), "<NAME>Impl");
        assert_eq!(link.implementation_module(), "<MODULE>");
        assert!(link.uses().is_empty());
        assert!(link.imports().is_empty());
        assert_eq!(link.unmapped_target_policy(), ReportingPolicy::Warn);
        assert_eq!(link.unmapped_source_policy(), ReportingPolicy::Ignore);
        assert_eq!(link.type_conversion_policy(), ReportingPolicy::Ignore);
        assert!(!link.disable_sub_mapping_methods());
        assert_eq!(link.component_model(), "default");
        assert_eq!(link.injection_strategy(), InjectionStrategy::Field);
        assert_eq!(
            link.mapping_inheritance_strategy(),
            MappingInheritanceStrategy::Explicit
        );
        assert_eq!(
            link.collection_mapping_strategy(),
            CollectionMappingStrategy::AccessorOnly
        );
        assert_eq!(link.builder(), BuilderStrategy::Enabled);
        assert_eq!(
            link.null_value_check_strategy(),
            NullValueCheckStrategy::OnImplicitConversion
        );
        assert_eq!(
            link.null_value_property_mapping_strategy(),
            NullValuePropertyMappingStrategy::SetToNull
        );
        assert_eq!(
            link.null_value_mapping_strategy(),
            NullValueMappingStrategy::ReturnNull
        );
        assert_eq!(
            link.null_collection_mapping_strategy(),
            NullCollectionMappingStrategy::ReturnNull
        );
    }
}

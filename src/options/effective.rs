//! Effective option snapshot with provenance
//!
//! Captures one mapper's fully resolved configuration together with the
//! scope that supplied each value. The snapshot is what gets written next
//! to generated code for auditability, and its fingerprint lets the
//! emitter skip regeneration when nothing about a mapper's configuration
//! changed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;

use crate::options::key::{MergeStrategy, OptionKey};
use crate::options::mapper::MapperOptions;
use crate::options::OptionsChain;
use crate::spec::{DeclarationId, TypeRef};

/// Schema version for effective-option snapshots
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "mapforge/effective_options@1";

/// The scope level that supplied a resolved value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OptionOrigin {
    Mapper,
    Shared,
    Default,
}

/// One resolved option with its contributing scopes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionEntry {
    /// Attribute name of the option
    pub option: String,

    /// Resolved value, rendered with the spec-file spelling
    pub value: Value,

    /// Contributing scopes, most specific first. Override options have
    /// exactly one; union options list every scope that added members.
    pub origins: Vec<OptionOrigin>,
}

/// Snapshot of one mapper's resolved configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveOptions {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// When this snapshot was captured
    pub created_at: DateTime<Utc>,

    /// The mapper's declared name
    pub mapper: String,

    /// Identity of the underlying declaration
    pub declaration: DeclarationId,

    /// The shared config in effect (None if not referenced)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_config: Option<TypeRef>,

    /// Whether the mapper's own declaration was structurally valid
    pub valid: bool,

    /// Every recognized option, in declaration-table order
    pub options: Vec<OptionEntry>,
}

impl EffectiveOptions {
    /// Capture the resolved configuration of one mapper.
    pub fn capture(options: &MapperOptions) -> Self {
        let entries = OptionKey::ALL
            .into_iter()
            .map(|key| OptionEntry {
                option: key.attr_name().to_string(),
                value: resolved_value(options, key),
                origins: origins_of(options, key),
            })
            .collect();

        Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            mapper: options.declaration().name().to_string(),
            declaration: options.declaration().clone(),
            shared_config: options.shared_config_type().cloned(),
            valid: options.is_valid(),
            options: entries,
        }
    }

    /// Serialize to pretty JSON for human reading.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// SHA-256 over the resolved entries only, so the same chain always
    /// produces the same fingerprint regardless of capture time.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let canonical = serde_json::to_string(&self.options)?;
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }

    /// Write the snapshot to a file.
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("JSON serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)
    }
}

fn type_set_value(set: &std::collections::BTreeSet<TypeRef>) -> Value {
    Value::Array(
        set.iter()
            .map(|reference| Value::String(reference.as_str().to_string()))
            .collect(),
    )
}

fn resolved_value(options: &MapperOptions, key: OptionKey) -> Value {
    match key {
        OptionKey::ImplementationName => Value::String(options.implementation_name()),
        OptionKey::ImplementationModule => Value::String(options.implementation_module()),
        OptionKey::Uses => type_set_value(&options.uses()),
        OptionKey::Imports => type_set_value(&options.imports()),
        OptionKey::UnmappedTargetPolicy => {
            Value::String(options.unmapped_target_policy().as_token().to_string())
        }
        OptionKey::UnmappedSourcePolicy => {
            Value::String(options.unmapped_source_policy().as_token().to_string())
        }
        OptionKey::TypeConversionPolicy => {
            Value::String(options.type_conversion_policy().as_token().to_string())
        }
        OptionKey::DisableSubMappingMethods => Value::Bool(options.disable_sub_mapping_methods()),
        OptionKey::ComponentModel => Value::String(options.component_model()),
        OptionKey::InjectionStrategy => {
            Value::String(options.injection_strategy().as_token().to_string())
        }
        OptionKey::MappingInheritanceStrategy => {
            Value::String(options.mapping_inheritance_strategy().as_token().to_string())
        }
        OptionKey::CollectionMappingStrategy => {
            Value::String(options.collection_mapping_strategy().as_token().to_string())
        }
        OptionKey::Builder => Value::String(options.builder().as_token().to_string()),
        OptionKey::NullValueCheckStrategy => {
            Value::String(options.null_value_check_strategy().as_token().to_string())
        }
        OptionKey::NullValuePropertyMappingStrategy => Value::String(
            options
                .null_value_property_mapping_strategy()
                .as_token()
                .to_string(),
        ),
        OptionKey::NullValueMappingStrategy => {
            Value::String(options.null_value_mapping_strategy().as_token().to_string())
        }
        OptionKey::NullCollectionMappingStrategy => Value::String(
            options
                .null_collection_mapping_strategy()
                .as_token()
                .to_string(),
        ),
    }
}

fn origins_of(options: &MapperOptions, key: OptionKey) -> Vec<OptionOrigin> {
    let set_on_mapper = options.scope().is_set(key);
    let set_on_shared = options
        .shared_link()
        .is_some_and(|link| link.scope().is_set(key));

    match key.merge_strategy() {
        MergeStrategy::Override => {
            if set_on_mapper {
                vec![OptionOrigin::Mapper]
            } else if set_on_shared {
                vec![OptionOrigin::Shared]
            } else {
                vec![OptionOrigin::Default]
            }
        }
        MergeStrategy::Union => {
            let default_set = match key {
                OptionKey::Uses => options.defaults_link().uses(),
                OptionKey::Imports => options.defaults_link().imports(),
                _ => unreachable!("only type-set options union"),
            };
            let mut origins = Vec::new();
            if set_on_mapper {
                origins.push(OptionOrigin::Mapper);
            }
            if set_on_shared {
                origins.push(OptionOrigin::Shared);
            }
            if !default_set.is_empty() || origins.is_empty() {
                origins.push(OptionOrigin::Default);
            }
            origins
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::key::RawValue;
    use crate::options::{DefaultOptions, ToolDefaults};
    use crate::spec::{OptionScope, ScopeIndex, SharedConfigRef};
    use std::sync::Arc;

    fn sample_options() -> MapperOptions {
        let mut scope = OptionScope::new(DeclarationId::new("mapping.toml", "CustomerMapper"));
        scope
            .try_insert(
                OptionKey::UnmappedTargetPolicy,
                RawValue::Text("error".to_string()),
            )
            .unwrap();
        scope
            .try_insert(
                OptionKey::Uses,
                RawValue::Types(vec![TypeRef::parse("a::TypeA").unwrap()]),
            )
            .unwrap();
        scope.set_shared_config(SharedConfigRef::Declared(
            TypeRef::parse("profiles::Cart").unwrap(),
        ));

        let mut shared = OptionScope::new(DeclarationId::new("profiles.toml", "profiles::Cart"));
        shared
            .try_insert(
                OptionKey::InjectionStrategy,
                RawValue::Text("constructor".to_string()),
            )
            .unwrap();
        shared
            .try_insert(
                OptionKey::Uses,
                RawValue::Types(vec![TypeRef::parse("b::TypeB").unwrap()]),
            )
            .unwrap();

        let mut index = ScopeIndex::new();
        index.insert(TypeRef::parse("profiles::Cart").unwrap(), shared);

        MapperOptions::resolve(
            scope,
            &index,
            Arc::new(DefaultOptions::new(ToolDefaults::default())),
        )
    }

    fn entry<'a>(snapshot: &'a EffectiveOptions, option: &str) -> &'a OptionEntry {
        snapshot
            .options
            .iter()
            .find(|entry| entry.option == option)
            .unwrap()
    }

    #[test]
    fn test_capture_covers_every_option() {
        let snapshot = EffectiveOptions::capture(&sample_options());
        assert_eq!(snapshot.options.len(), OptionKey::ALL.len());
        assert_eq!(snapshot.schema_version, SCHEMA_VERSION);
        assert_eq!(snapshot.schema_id, SCHEMA_ID);
        assert_eq!(snapshot.mapper, "CustomerMapper");
        assert!(snapshot.valid);
    }

    #[test]
    fn test_origins_report_most_specific_scope() {
        let snapshot = EffectiveOptions::capture(&sample_options());

        // Set on the mapper itself
        assert_eq!(
            entry(&snapshot, "unmapped_target_policy").origins,
            vec![OptionOrigin::Mapper]
        );
        // Set only on the shared config
        assert_eq!(
            entry(&snapshot, "injection_strategy").origins,
            vec![OptionOrigin::Shared]
        );
        // Set nowhere
        assert_eq!(
            entry(&snapshot, "collection_mapping_strategy").origins,
            vec![OptionOrigin::Default]
        );
    }

    #[test]
    fn test_union_entry_lists_every_contributor() {
        let snapshot = EffectiveOptions::capture(&sample_options());
        let uses = entry(&snapshot, "uses");
        assert_eq!(uses.origins, vec![OptionOrigin::Mapper, OptionOrigin::Shared]);
        assert_eq!(
            uses.value,
            serde_json::json!(["a::TypeA", "b::TypeB"])
        );

        // Nobody declared imports, so only the (empty) default contributes
        let imports = entry(&snapshot, "imports");
        assert_eq!(imports.origins, vec![OptionOrigin::Default]);
        assert_eq!(imports.value, serde_json::json!([]));
    }

    #[test]
    fn test_values_use_spec_spelling() {
        let snapshot = EffectiveOptions::capture(&sample_options());
        assert_eq!(
            entry(&snapshot, "unmapped_target_policy").value,
            serde_json::json!("error")
        );
        assert_eq!(
            entry(&snapshot, "null_value_check_strategy").value,
            serde_json::json!("on-implicit-conversion")
        );
        assert_eq!(
            entry(&snapshot, "implementation_name").value,
            serde_json::json!("<NAME>Impl")
        );
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let options = sample_options();
        let first = EffectiveOptions::capture(&options);
        let second = EffectiveOptions::capture(&options);

        // Capture times differ; the fingerprint does not
        assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
        assert_eq!(first.fingerprint().unwrap().len(), 64);
    }

    #[test]
    fn test_fingerprint_tracks_resolved_values() {
        let first = EffectiveOptions::capture(&sample_options());

        let mut defaults = ToolDefaults::default();
        defaults.builder = crate::options::BuilderStrategy::Disabled;
        let changed = MapperOptions::resolve(
            OptionScope::new(DeclarationId::new("mapping.toml", "CustomerMapper")),
            &ScopeIndex::new(),
            Arc::new(DefaultOptions::new(defaults)),
        );
        let second = EffectiveOptions::capture(&changed);

        assert_ne!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
    }

    #[test]
    fn test_to_json_and_write_to_file() {
        let snapshot = EffectiveOptions::capture(&sample_options());
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"schema_id\": \"mapforge/effective_options@1\""));
        assert!(json.contains("\"shared_config\": \"profiles::Cart\""));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("effective_options.json");
        snapshot.write_to_file(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let parsed: EffectiveOptions = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.mapper, "CustomerMapper");
        assert_eq!(parsed.options.len(), OptionKey::ALL.len());
    }
}

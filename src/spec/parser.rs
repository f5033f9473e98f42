//! Spec file parsing
//!
//! Materializes option scopes from TOML mapping-spec files. A spec file
//! holds `[[mapper]]` declarations and reusable `[[shared_config]]`
//! declarations:
//!
//! ```toml
//! [[mapper]]
//! name = "CustomerMapper"
//! config = "profiles::CartDefaults"
//! unmapped_target_policy = "error"
//! uses = ["helpers::DateMapper"]
//!
//! [[shared_config]]
//! name = "profiles::CartDefaults"
//! collection_mapping_strategy = "adder-preferred"
//! ```
//!
//! Structural problems inside a single declaration (unknown attribute,
//! wrong value kind, unknown policy token, malformed type path) mark that
//! declaration's scope invalid and drop the offending attribute; the rest
//! of the file still parses. Malformed TOML, a missing `name`, an unknown
//! section, or a duplicate shared config is a hard error.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use super::{DeclarationId, OptionScope, SharedConfigRef, TypeRef};
use crate::options::{OptionKey, RawValue, ValueKind};

/// Error types for spec parsing
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("failed to read spec file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("section '{0}' must be an array of tables")]
    MalformedSection(String),

    #[error("unknown section '{0}'")]
    UnknownSection(String),

    #[error("declaration in section '{0}' is missing a 'name'")]
    MissingName(String),

    #[error("shared config name '{0}' is not a declared type path")]
    InvalidSharedConfigName(String),

    #[error("duplicate shared config '{0}'")]
    DuplicateSharedConfig(String),
}

/// Shared-config scopes declared in a spec file, keyed by type reference.
#[derive(Debug, Clone, Default)]
pub struct ScopeIndex {
    entries: BTreeMap<TypeRef, OptionScope>,
}

impl ScopeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, reference: &TypeRef) -> Option<&OptionScope> {
        self.entries.get(reference)
    }

    /// Register a shared-config scope, returning any previous occupant.
    pub fn insert(&mut self, reference: TypeRef, scope: OptionScope) -> Option<OptionScope> {
        self.entries.insert(reference, scope)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeRef, &OptionScope)> {
        self.entries.iter()
    }
}

/// A parsed spec file: mapper scopes plus the shared-config index.
#[derive(Debug, Clone, Default)]
pub struct SpecFile {
    pub mappers: Vec<OptionScope>,
    pub shared: ScopeIndex,
}

/// Read and parse a spec file from disk.
pub fn load_spec(path: &Path) -> Result<SpecFile, SpecError> {
    let contents = fs::read_to_string(path)?;
    parse_spec(&contents, &path.display().to_string())
}

/// Parse spec text. `source` labels declarations for diagnostics, usually
/// the file path.
pub fn parse_spec(input: &str, source: &str) -> Result<SpecFile, SpecError> {
    let root: toml::Value = input.parse()?;
    let table = match root.as_table() {
        Some(table) => table,
        None => return Ok(SpecFile::default()),
    };

    let mut spec = SpecFile::default();
    for (section, value) in table {
        let declarations = value
            .as_array()
            .ok_or_else(|| SpecError::MalformedSection(section.clone()))?;
        match section.as_str() {
            "mapper" => {
                for declaration in declarations {
                    spec.mappers
                        .push(parse_declaration(section, declaration, source, false)?);
                }
            }
            "shared_config" => {
                for declaration in declarations {
                    let scope = parse_declaration(section, declaration, source, true)?;
                    let name = scope.declaration().name().to_string();
                    let reference = TypeRef::parse(&name)
                        .map_err(|_| SpecError::InvalidSharedConfigName(name.clone()))?;
                    if spec.shared.insert(reference, scope).is_some() {
                        return Err(SpecError::DuplicateSharedConfig(name));
                    }
                }
            }
            _ => return Err(SpecError::UnknownSection(section.clone())),
        }
    }
    Ok(spec)
}

fn parse_declaration(
    section: &str,
    declaration: &toml::Value,
    source: &str,
    is_shared: bool,
) -> Result<OptionScope, SpecError> {
    let table = declaration
        .as_table()
        .ok_or_else(|| SpecError::MalformedSection(section.to_string()))?;
    let name = table
        .get("name")
        .and_then(toml::Value::as_str)
        .ok_or_else(|| SpecError::MissingName(section.to_string()))?;

    let mut scope = OptionScope::new(DeclarationId::new(source, name));
    for (attr, value) in table {
        match attr.as_str() {
            "name" => {}
            "config" => {
                if is_shared {
                    // Shared configs never chain to another shared config.
                    scope.mark_invalid();
                } else {
                    scope.set_shared_config(shared_config_ref(value));
                }
            }
            _ => match OptionKey::from_attr_name(attr) {
                Some(key) => apply_option(&mut scope, key, value),
                None => scope.mark_invalid(),
            },
        }
    }
    Ok(scope)
}

/// Normalize the raw `config` attribute. Only a string holding a declared
/// type path counts; every other observed kind is kept as `Unresolved` so
/// the resolution chain can fall back to "no shared config" without
/// treating the declaration as broken.
fn shared_config_ref(value: &toml::Value) -> SharedConfigRef {
    match value.as_str().map(TypeRef::parse) {
        Some(Ok(reference)) => SharedConfigRef::Declared(reference),
        _ => SharedConfigRef::Unresolved,
    }
}

/// Coerce one attribute value to the option's raw kind and set it on the
/// scope. Any structural problem demotes the scope's validity and drops
/// the attribute.
fn apply_option(scope: &mut OptionScope, key: OptionKey, value: &toml::Value) {
    let raw = match key.kind() {
        ValueKind::Text => value.as_str().map(|s| RawValue::Text(s.to_string())),
        ValueKind::Flag => value.as_bool().map(RawValue::Flag),
        ValueKind::Types => value.as_array().and_then(|entries| {
            entries
                .iter()
                .map(|entry| entry.as_str().and_then(|s| TypeRef::parse(s).ok()))
                .collect::<Option<Vec<_>>>()
                .map(RawValue::Types)
        }),
    };
    match raw {
        Some(raw) => {
            if scope.try_insert(key, raw).is_err() {
                scope.mark_invalid();
            }
        }
        None => scope.mark_invalid(),
    }
}

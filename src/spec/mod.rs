//! Mapping spec declarations
//!
//! The declaration side of option resolution: validated type references,
//! declaration identity, and the per-declaration option scope that the
//! resolution chain reads. Scopes are materialized from TOML spec files by
//! the parser in this module; mutation is fallible so that a scope only
//! ever holds kind-correct, vocabulary-correct raw values.

mod parser;

pub use parser::{load_spec, parse_spec, ScopeIndex, SpecError, SpecFile};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::options::{OptionKey, RawValue, ValueKind};

/// Type paths that name primitives rather than declared types.
const PRIMITIVE_NAMES: &[&str] = &[
    "bool", "char", "str", "i8", "i16", "i32", "i64", "i128", "u8", "u16", "u32", "u64", "u128",
    "f32", "f64", "usize", "isize",
];

/// Error types for scope construction
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    #[error("option '{key}' expects a {expected} value, found {found}")]
    KindMismatch {
        key: &'static str,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("option '{key}' does not accept '{token}'")]
    UnknownToken { key: &'static str, token: String },

    #[error("'{path}' is not a declared type reference: {reason}")]
    InvalidTypeRef { path: String, reason: &'static str },
}

/// A validated reference to a declared type, e.g. `helpers::DateMapper`.
///
/// Primitive names and anything that is not a plain `::`-separated path of
/// identifiers are rejected, so a `TypeRef` always names a type a spec file
/// could declare.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct TypeRef(String);

impl TypeRef {
    /// Parse and validate a type path.
    pub fn parse(path: &str) -> Result<Self, ScopeError> {
        if path.is_empty() {
            return Err(ScopeError::InvalidTypeRef {
                path: path.to_string(),
                reason: "empty path",
            });
        }
        for segment in path.split("::") {
            if segment.is_empty() {
                return Err(ScopeError::InvalidTypeRef {
                    path: path.to_string(),
                    reason: "empty path segment",
                });
            }
            let mut chars = segment.chars();
            let first = chars.next().expect("segment is non-empty");
            if !(first.is_ascii_alphabetic() || first == '_') {
                return Err(ScopeError::InvalidTypeRef {
                    path: path.to_string(),
                    reason: "segment must start with a letter or underscore",
                });
            }
            if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(ScopeError::InvalidTypeRef {
                    path: path.to_string(),
                    reason: "segment contains a non-identifier character",
                });
            }
        }
        if !path.contains("::") && PRIMITIVE_NAMES.contains(&path) {
            return Err(ScopeError::InvalidTypeRef {
                path: path.to_string(),
                reason: "primitive types cannot be referenced",
            });
        }
        Ok(TypeRef(path.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The unqualified type name, the last path segment.
    pub fn name(&self) -> &str {
        self.0.rsplit("::").next().expect("path is non-empty")
    }
}

impl TryFrom<String> for TypeRef {
    type Error = ScopeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TypeRef::parse(&value)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of one declaration occurrence, for diagnostic anchoring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclarationId {
    source: String,
    name: String,
}

impl DeclarationId {
    pub fn new(source: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
        }
    }

    /// The spec file (or other origin) the declaration came from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The declared name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.source, self.name)
    }
}

/// The raw observed value of a declaration's `config` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharedConfigRef {
    /// The attribute is a structurally valid declared-type reference.
    Declared(TypeRef),
    /// The attribute is present but not a declared-type reference.
    Unresolved,
}

/// The option values explicitly set on one declaration.
///
/// A scope is the read surface the resolution chain consults for one
/// precedence level: which options are explicitly set, their raw values,
/// whether the declaration parsed to a structurally valid state, and the
/// identity of the owning declaration.
#[derive(Debug, Clone)]
pub struct OptionScope {
    declaration: DeclarationId,
    shared_config: Option<SharedConfigRef>,
    values: BTreeMap<OptionKey, RawValue>,
    valid: bool,
}

impl OptionScope {
    pub fn new(declaration: DeclarationId) -> Self {
        Self {
            declaration,
            shared_config: None,
            values: BTreeMap::new(),
            valid: true,
        }
    }

    pub fn declaration(&self) -> &DeclarationId {
        &self.declaration
    }

    /// Whether the declaration's own data parsed to a structurally valid
    /// state. Options that were set successfully still resolve when this is
    /// false; callers decide whether to generate.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Record a structural problem with the declaration's own data.
    pub fn mark_invalid(&mut self) {
        self.valid = false;
    }

    /// The raw `config` attribute, if present on the declaration.
    pub fn shared_config(&self) -> Option<&SharedConfigRef> {
        self.shared_config.as_ref()
    }

    pub fn set_shared_config(&mut self, reference: SharedConfigRef) {
        self.shared_config = Some(reference);
    }

    /// Whether the option is explicitly set on this declaration.
    pub fn is_set(&self, key: OptionKey) -> bool {
        self.values.contains_key(&key)
    }

    /// The raw value of an explicitly set option.
    pub fn raw(&self, key: OptionKey) -> Option<&RawValue> {
        self.values.get(&key)
    }

    /// Set an option value, checking the value kind against the option
    /// table and policy tokens against the option's vocabulary. The checks
    /// here are what make normalization during resolution total.
    pub fn try_insert(&mut self, key: OptionKey, value: RawValue) -> Result<(), ScopeError> {
        if value.kind() != key.kind() {
            return Err(ScopeError::KindMismatch {
                key: key.attr_name(),
                expected: key.kind(),
                found: value.kind(),
            });
        }
        if let (Some(vocabulary), RawValue::Text(token)) = (key.tokens(), &value) {
            if !vocabulary.contains(&token.as_str()) {
                return Err(ScopeError::UnknownToken {
                    key: key.attr_name(),
                    token: token.clone(),
                });
            }
        }
        self.values.insert(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> OptionScope {
        OptionScope::new(DeclarationId::new("mapping.toml", "CustomerMapper"))
    }

    #[test]
    fn test_type_ref_accepts_declared_paths() {
        assert_eq!(TypeRef::parse("CustomerMapper").unwrap().as_str(), "CustomerMapper");
        let nested = TypeRef::parse("helpers::DateMapper").unwrap();
        assert_eq!(nested.as_str(), "helpers::DateMapper");
        assert_eq!(nested.name(), "DateMapper");
    }

    #[test]
    fn test_type_ref_rejects_primitives() {
        assert!(TypeRef::parse("bool").is_err());
        assert!(TypeRef::parse("u64").is_err());
        // A primitive name is fine as a later path segment's prefix
        assert!(TypeRef::parse("prims::u64_helpers").is_ok());
    }

    #[test]
    fn test_type_ref_rejects_non_paths() {
        assert!(TypeRef::parse("").is_err());
        assert!(TypeRef::parse("Vec<u8>").is_err());
        assert!(TypeRef::parse("[u8]").is_err());
        assert!(TypeRef::parse("a::::b").is_err());
        assert!(TypeRef::parse("::leading").is_err());
        assert!(TypeRef::parse("1starts_with_digit").is_err());
    }

    #[test]
    fn test_try_insert_checks_kind() {
        let mut scope = scope();
        let err = scope
            .try_insert(OptionKey::Uses, RawValue::Text("warn".to_string()))
            .unwrap_err();
        assert!(matches!(err, ScopeError::KindMismatch { .. }));
        assert!(!scope.is_set(OptionKey::Uses));
    }

    #[test]
    fn test_try_insert_checks_vocabulary() {
        let mut scope = scope();
        let err = scope
            .try_insert(
                OptionKey::UnmappedTargetPolicy,
                RawValue::Text("loud".to_string()),
            )
            .unwrap_err();
        assert!(matches!(err, ScopeError::UnknownToken { .. }));

        scope
            .try_insert(
                OptionKey::UnmappedTargetPolicy,
                RawValue::Text("warn".to_string()),
            )
            .unwrap();
        assert!(scope.is_set(OptionKey::UnmappedTargetPolicy));
    }

    #[test]
    fn test_free_text_options_take_any_string() {
        let mut scope = scope();
        scope
            .try_insert(
                OptionKey::ComponentModel,
                RawValue::Text("registry".to_string()),
            )
            .unwrap();
        assert_eq!(
            scope.raw(OptionKey::ComponentModel),
            Some(&RawValue::Text("registry".to_string()))
        );
    }

    #[test]
    fn test_scope_validity_starts_true() {
        let mut scope = scope();
        assert!(scope.is_valid());
        scope.mark_invalid();
        assert!(!scope.is_valid());
    }

    #[test]
    fn test_declaration_display() {
        let id = DeclarationId::new("specs/orders.toml", "OrderMapper");
        assert_eq!(id.to_string(), "specs/orders.toml#OrderMapper");
    }
}

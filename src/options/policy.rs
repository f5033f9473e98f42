//! Policy enumerations
//!
//! Closed vocabularies for the strategy and reporting options. Tokens are
//! the kebab-case spellings used in spec files, tool-default files, and
//! effective-option snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reporting level applied to a class of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportingPolicy {
    /// Do not report.
    Ignore,
    /// Report as a warning.
    Warn,
    /// Report as an error and fail generation.
    Error,
}

impl ReportingPolicy {
    pub(crate) const TOKENS: &'static [&'static str] = &["ignore", "warn", "error"];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "ignore" => Some(Self::Ignore),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// How collaborating mappers are handed to a generated implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InjectionStrategy {
    Field,
    Constructor,
    Setter,
}

impl InjectionStrategy {
    pub(crate) const TOKENS: &'static [&'static str] = &["field", "constructor", "setter"];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "field" => Some(Self::Field),
            "constructor" => Some(Self::Constructor),
            "setter" => Some(Self::Setter),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Constructor => "constructor",
            Self::Setter => "setter",
        }
    }
}

/// Whether mapping declarations are inherited between related methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MappingInheritanceStrategy {
    /// Inherit only where explicitly requested.
    Explicit,
    /// Inherit forward declarations from the shared config.
    AutoInheritFromConfig,
    /// Inherit reverse declarations from the shared config.
    AutoInheritReverseFromConfig,
    /// Inherit both directions from the shared config.
    AutoInheritAllFromConfig,
}

impl MappingInheritanceStrategy {
    pub(crate) const TOKENS: &'static [&'static str] = &[
        "explicit",
        "auto-inherit-from-config",
        "auto-inherit-reverse-from-config",
        "auto-inherit-all-from-config",
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "explicit" => Some(Self::Explicit),
            "auto-inherit-from-config" => Some(Self::AutoInheritFromConfig),
            "auto-inherit-reverse-from-config" => Some(Self::AutoInheritReverseFromConfig),
            "auto-inherit-all-from-config" => Some(Self::AutoInheritAllFromConfig),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::AutoInheritFromConfig => "auto-inherit-from-config",
            Self::AutoInheritReverseFromConfig => "auto-inherit-reverse-from-config",
            Self::AutoInheritAllFromConfig => "auto-inherit-all-from-config",
        }
    }
}

/// How target collections are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionMappingStrategy {
    /// Only the plain accessor is used.
    AccessorOnly,
    /// Prefer a setter, fall back to the accessor.
    SetterPreferred,
    /// Prefer an element adder, fall back to the accessor.
    AdderPreferred,
    /// The target collection is never written through an accessor.
    TargetImmutable,
}

impl CollectionMappingStrategy {
    pub(crate) const TOKENS: &'static [&'static str] = &[
        "accessor-only",
        "setter-preferred",
        "adder-preferred",
        "target-immutable",
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "accessor-only" => Some(Self::AccessorOnly),
            "setter-preferred" => Some(Self::SetterPreferred),
            "adder-preferred" => Some(Self::AdderPreferred),
            "target-immutable" => Some(Self::TargetImmutable),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::AccessorOnly => "accessor-only",
            Self::SetterPreferred => "setter-preferred",
            Self::AdderPreferred => "adder-preferred",
            Self::TargetImmutable => "target-immutable",
        }
    }
}

/// Whether a builder is used to construct mapping targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuilderStrategy {
    Enabled,
    Disabled,
}

impl BuilderStrategy {
    pub(crate) const TOKENS: &'static [&'static str] = &["enabled", "disabled"];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "enabled" => Some(Self::Enabled),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }
}

/// When generated code guards source values with a null check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullValueCheckStrategy {
    /// Check only around implicit type conversions.
    OnImplicitConversion,
    /// Check every source property access.
    Always,
}

impl NullValueCheckStrategy {
    pub(crate) const TOKENS: &'static [&'static str] = &["on-implicit-conversion", "always"];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "on-implicit-conversion" => Some(Self::OnImplicitConversion),
            "always" => Some(Self::Always),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::OnImplicitConversion => "on-implicit-conversion",
            Self::Always => "always",
        }
    }
}

/// What an absent source property writes into the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullValuePropertyMappingStrategy {
    SetToNull,
    SetToDefault,
    Ignore,
}

impl NullValuePropertyMappingStrategy {
    pub(crate) const TOKENS: &'static [&'static str] = &["set-to-null", "set-to-default", "ignore"];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "set-to-null" => Some(Self::SetToNull),
            "set-to-default" => Some(Self::SetToDefault),
            "ignore" => Some(Self::Ignore),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::SetToNull => "set-to-null",
            Self::SetToDefault => "set-to-default",
            Self::Ignore => "ignore",
        }
    }
}

/// What a conversion of an absent source value returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullValueMappingStrategy {
    ReturnNull,
    ReturnDefault,
}

impl NullValueMappingStrategy {
    pub(crate) const TOKENS: &'static [&'static str] = &["return-null", "return-default"];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "return-null" => Some(Self::ReturnNull),
            "return-default" => Some(Self::ReturnDefault),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::ReturnNull => "return-null",
            Self::ReturnDefault => "return-default",
        }
    }
}

/// What a mapping of an absent source collection or map returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullCollectionMappingStrategy {
    ReturnNull,
    ReturnDefault,
}

impl NullCollectionMappingStrategy {
    pub(crate) const TOKENS: &'static [&'static str] = &["return-null", "return-default"];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "return-null" => Some(Self::ReturnNull),
            "return-default" => Some(Self::ReturnDefault),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::ReturnNull => "return-null",
            Self::ReturnDefault => "return-default",
        }
    }
}

impl fmt::Display for ReportingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl fmt::Display for InjectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl fmt::Display for MappingInheritanceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl fmt::Display for CollectionMappingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl fmt::Display for BuilderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl fmt::Display for NullValueCheckStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl fmt::Display for NullValuePropertyMappingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl fmt::Display for NullValueMappingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl fmt::Display for NullCollectionMappingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

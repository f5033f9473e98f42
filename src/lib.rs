//! mapforge - option resolution for declarative object mapping
//!
//! This crate implements the configuration core of the mapforge code
//! generator. Mappers and reusable shared configs are declared in TOML
//! spec files; every recognized option is resolved through a three-level
//! override chain (mapper, shared config, tool defaults) into one
//! complete configuration per mapper, ready for the code emitter.

pub mod options;
pub mod spec;

pub use options::{
    DefaultOptions, EffectiveOptions, MapperOptions, OptionKey, OptionsChain, RawValue,
    SharedConfigOptions, ToolDefaults,
};
pub use spec::{load_spec, parse_spec, DeclarationId, OptionScope, ScopeIndex, SpecFile, TypeRef};

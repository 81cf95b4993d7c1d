use std::fmt;

use crate::error::ValidationError;
use crate::options::{OptionValue, Options};

/// The shape a parameter value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Text,
    List,
    Map,
    Handler,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Text => write!(f, "a string"),
            Kind::List => write!(f, "a list"),
            Kind::Map => write!(f, "an object"),
            Kind::Handler => write!(f, "a handler"),
        }
    }
}

/// One row of an operation's parameter table.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub required: bool,
    pub kind: Kind,
    pub allow_empty: bool,
    pub default: Option<&'static str>,
}

impl ParamSpec {
    pub const fn required(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            required: true,
            kind,
            allow_empty: false,
            default: None,
        }
    }

    pub const fn optional(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            required: false,
            kind,
            allow_empty: true,
            default: None,
        }
    }

    pub const fn defaulted(name: &'static str, kind: Kind, default: &'static str) -> Self {
        Self {
            name,
            required: false,
            kind,
            allow_empty: false,
            default: Some(default),
        }
    }
}

/// Checks `options` against an operation's parameter table, substituting
/// declared defaults in place.
///
/// Rules, applied per parameter in table order:
/// 1. absent with a declared default: the default is written into `options`;
/// 2. absent and required: rejected as missing;
/// 3. absent, not required, but not allowed to be empty: also rejected,
///    since an absent value cannot satisfy the non-empty demand;
/// 4. present with the wrong shape: rejected;
/// 5. present but empty when emptiness is not allowed: rejected.
///
/// The first failing parameter aborts the walk.
pub fn validate(
    operation: &'static str,
    options: &mut Options,
    specs: &[ParamSpec],
) -> Result<(), ValidationError> {
    for spec in specs {
        if spec.kind == Kind::Handler {
            // Handlers have no default and no emptiness; presence is the
            // whole check.
            if spec.required && !options.has_handler() {
                return Err(ValidationError::missing(operation, spec.name));
            }
            continue;
        }

        match options.get(spec.name) {
            None => {
                if let Some(default) = spec.default {
                    options.insert(spec.name, OptionValue::Text(default.to_string()));
                } else if spec.required || !spec.allow_empty {
                    return Err(ValidationError::missing(operation, spec.name));
                }
            }
            Some(value) => {
                if value.kind() != spec.kind {
                    return Err(ValidationError::wrong_kind(
                        operation,
                        spec.name,
                        spec.kind,
                        value.kind(),
                    ));
                }
                if value.is_empty() && !spec.allow_empty {
                    return Err(ValidationError::empty(operation, spec.name));
                }
            }
        }
    }
    Ok(())
}

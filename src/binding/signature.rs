//! Export declaration of `TOF` and host argument binding.

use super::value::Value;
use std::str::FromStr;
use thiserror::Error;

/// Exported callable name.
pub const TOF_NAME: &str = "TOF";

/// Parameter names, in positional order.
pub const TOF_PARAMS: [&str; 3] = ["array_start", "array_stop", "window"];

/// Whether the export advertises its parameter names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureStyle {
    /// Arguments may be passed positionally or by name.
    #[default]
    Named,
    /// Arguments are positional only.
    Positional,
}

impl FromStr for SignatureStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "named" | "keyword" => Ok(SignatureStyle::Named),
            "positional" => Ok(SignatureStyle::Positional),
            other => Err(format!(
                "Unknown signature style: {}. Valid options: named, positional",
                other
            )),
        }
    }
}

/// Argument-binding failures, raised before the native function runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("{name}() takes {expected} positional arguments but {given} were given")]
    TooManyPositional {
        name: &'static str,
        expected: usize,
        given: usize,
    },
    #[error("{name}() got an unexpected keyword argument '{keyword}'")]
    UnexpectedKeyword { name: &'static str, keyword: String },
    #[error("{name}() got multiple values for argument '{parameter}'")]
    DuplicateArgument {
        name: &'static str,
        parameter: &'static str,
    },
    #[error("{name}() takes no keyword arguments")]
    KeywordsNotAccepted { name: &'static str },
    #[error("{name}() missing required argument: '{parameter}'")]
    MissingArgument {
        name: &'static str,
        parameter: &'static str,
    },
}

/// Arguments bound to their parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArgs {
    pub array_start: Value,
    pub array_stop: Value,
    pub window: Value,
}

/// Declaration of one exported callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpec {
    pub name: &'static str,
    pub params: [&'static str; 3],
    pub style: SignatureStyle,
}

impl ExportSpec {
    /// The `TOF` export.
    pub fn tof(style: SignatureStyle) -> Self {
        Self {
            name: TOF_NAME,
            params: TOF_PARAMS,
            style,
        }
    }

    /// Parameter names visible to the caller.
    pub fn visible_params(&self) -> &[&'static str] {
        match self.style {
            SignatureStyle::Named => &self.params,
            SignatureStyle::Positional => &[],
        }
    }

    /// Bind host arguments to the declared parameters.
    pub fn bind(
        &self,
        positional: Vec<Value>,
        keywords: Vec<(String, Value)>,
    ) -> Result<BoundArgs, SignatureError> {
        let arity = self.params.len();
        if positional.len() > arity {
            return Err(SignatureError::TooManyPositional {
                name: self.name,
                expected: arity,
                given: positional.len(),
            });
        }
        if self.style == SignatureStyle::Positional && !keywords.is_empty() {
            return Err(SignatureError::KeywordsNotAccepted { name: self.name });
        }

        let mut slots: [Option<Value>; 3] = [None, None, None];
        for (slot, value) in slots.iter_mut().zip(positional) {
            *slot = Some(value);
        }

        for (keyword, value) in keywords {
            let idx = self
                .params
                .iter()
                .position(|p| *p == keyword)
                .ok_or_else(|| SignatureError::UnexpectedKeyword {
                    name: self.name,
                    keyword: keyword.clone(),
                })?;

            if slots[idx].is_some() {
                return Err(SignatureError::DuplicateArgument {
                    name: self.name,
                    parameter: self.params[idx],
                });
            }
            slots[idx] = Some(value);
        }

        let [array_start, array_stop, window] = slots;
        let missing = |parameter| SignatureError::MissingArgument {
            name: self.name,
            parameter,
        };

        Ok(BoundArgs {
            array_start: array_start.ok_or_else(|| missing(self.params[0]))?,
            array_stop: array_stop.ok_or_else(|| missing(self.params[1]))?,
            window: window.ok_or_else(|| missing(self.params[2]))?,
        })
    }
}

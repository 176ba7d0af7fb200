//! Structured error types shared across the Dalitz crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`DalitzError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable kebab-case code such as `unknown-resonance` or `matrix-shape`.
    pub code: String,
    /// One-line description for logs and CLI output.
    pub message: String,
    /// Offending values keyed by name, e.g. `index` and `num_resonances`
    /// for an out-of-range resonance index.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// What to change in the model or catalogue to avoid the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with an empty context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records an offending value, e.g. `("parent_spin", "1")` for an
    /// unsupported cascade transition. Later entries overwrite earlier ones.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a remediation hint, such as which catalogue table a name
    /// belongs in.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the amplitude engine.
///
/// A point outside the kinematic region is never an error; it evaluates to a
/// zero amplitude. Errors are reserved for invalid configuration or caller
/// contract violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum DalitzError {
    /// Unsupported quantum numbers or malformed kinematic input.
    #[error("kinematics error: {0}")]
    Kinematics(ErrorInfo),
    /// Model assembly and evaluation errors.
    #[error("model error: {0}")]
    Model(ErrorInfo),
    /// Particle and resonance catalogue lookups.
    #[error("catalogue error: {0}")]
    Catalogue(ErrorInfo),
    /// Coefficient vectors and interference matrices.
    #[error("normalization error: {0}")]
    Normalization(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl DalitzError {
    /// Payload regardless of the error family.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            DalitzError::Kinematics(info)
            | DalitzError::Model(info)
            | DalitzError::Catalogue(info)
            | DalitzError::Normalization(info)
            | DalitzError::Serde(info) => info,
        }
    }

    /// Stable code; tests and the CLI match on this rather than on the message.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}

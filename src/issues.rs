//! Diagnostics attached to source modules.
//!
//! Each module carries two ordered lists, `errors` and `warnings`, holding
//! [`ModuleDiagnostic`] values. The pass only ever contributes a single
//! [`MissingLocalizationError`] per module; the compilation driver adds parse
//! failures and malformed translate calls.

use std::fmt;

use crate::core::{SourceLocation, TransformError};

// ============================================================
// Severity
// ============================================================

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

// ============================================================
// Missing localization
// ============================================================

/// One untranslated key seen in a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingRequest {
    /// The lookup key as written at the call site.
    pub key: String,
    /// The text substituted in place of a translation.
    pub value: String,
    /// First call site where the key was seen.
    pub location: SourceLocation,
}

impl fmt::Display for MissingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key == self.value {
            write!(f, "Missing localization: {}", self.key)
        } else {
            write!(f, "Missing localization: {} ({})", self.key, self.value)
        }
    }
}

/// All untranslated keys of one module, each listed once.
///
/// Created on the first miss in a module and pushed into that module's
/// error or warning list at that moment. Keys found later are appended to
/// the same record in place, so the module never holds more than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingLocalizationError {
    /// Path of the owning module.
    pub module_path: String,
    requests: Vec<MissingRequest>,
}

impl MissingLocalizationError {
    pub fn new(module_path: impl Into<String>, request: MissingRequest) -> Self {
        Self {
            module_path: module_path.into(),
            requests: vec![request],
        }
    }

    /// Append a request unless its key is already listed.
    ///
    /// Returns `true` if the key was new.
    pub fn add(&mut self, request: MissingRequest) -> bool {
        if self.contains(&request.key) {
            return false;
        }
        self.requests.push(request);
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.requests.iter().any(|r| r.key == key)
    }

    pub fn requests(&self) -> &[MissingRequest] {
        &self.requests
    }

    /// Missing keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.requests.iter().map(|r| r.key.as_str())
    }
}

impl fmt::Display for MissingLocalizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, request) in self.requests.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", request)?;
        }
        Ok(())
    }
}

// ============================================================
// Module diagnostics
// ============================================================

/// A diagnostic stored in a module's `errors` or `warnings` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleDiagnostic {
    /// Keys without a translation (at most one per module).
    MissingLocalization(MissingLocalizationError),
    /// A translate call whose arguments are not literals of the right kind.
    InvalidCall(TransformError),
    /// The module could not be parsed or rendered.
    BuildFailed { module_path: String, message: String },
}

impl ModuleDiagnostic {
    /// Short headline used by the reporter.
    pub fn title(&self) -> &'static str {
        match self {
            ModuleDiagnostic::MissingLocalization(_) => "missing localization",
            ModuleDiagnostic::InvalidCall(_) => "invalid translate call",
            ModuleDiagnostic::BuildFailed { .. } => "module build failed",
        }
    }

    pub fn as_missing_localization(&self) -> Option<&MissingLocalizationError> {
        match self {
            ModuleDiagnostic::MissingLocalization(record) => Some(record),
            _ => None,
        }
    }
}

impl fmt::Display for ModuleDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleDiagnostic::MissingLocalization(record) => write!(f, "{}", record),
            ModuleDiagnostic::InvalidCall(err) => write!(f, "{}", err),
            ModuleDiagnostic::BuildFailed { message, .. } => write!(f, "{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(key: &str) -> MissingRequest {
        MissingRequest {
            key: key.to_string(),
            value: key.to_string(),
            location: SourceLocation::new("src/app.js", 1, 1),
        }
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_add_deduplicates_keys() {
        let mut record = MissingLocalizationError::new("src/app.js", request("a"));
        assert!(record.add(request("b")));
        assert!(!record.add(request("a")));
        assert!(!record.add(request("b")));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_message_lists_every_key() {
        let mut record = MissingLocalizationError::new("src/app.js", request("a"));
        record.add(MissingRequest {
            key: "b".to_string(),
            value: "B".to_string(),
            location: SourceLocation::new("src/app.js", 2, 1),
        });
        assert_eq!(
            record.to_string(),
            "Missing localization: a\nMissing localization: b (B)"
        );
    }

    #[test]
    fn test_diagnostic_title() {
        let diagnostic = ModuleDiagnostic::BuildFailed {
            module_path: "src/app.js".to_string(),
            message: "boom".to_string(),
        };
        assert_eq!(diagnostic.title(), "module build failed");
        assert_eq!(diagnostic.to_string(), "boom");
        assert!(diagnostic.as_missing_localization().is_none());
    }
}

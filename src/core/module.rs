use std::fmt;

use crate::core::ConstDependency;
use crate::issues::{ModuleDiagnostic, Severity};

/// Identity of a module within one compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub usize);

/// Position in a source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    /// Path of the source file (relative to the source root).
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_path, self.line, self.col)
    }
}

/// Half-open byte range into a module's source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceRange {
    pub start: usize,
    pub end: usize,
}

impl SourceRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A source module going through the build.
///
/// The pass never owns a module; it borrows one per traversal, appends
/// constant dependencies to it and, on the first missing key, pushes a
/// diagnostic into `errors` or `warnings`.
#[derive(Debug, Clone)]
pub struct Module {
    pub id: ModuleId,
    pub file_path: String,
    pub source: String,
    pub errors: Vec<ModuleDiagnostic>,
    pub warnings: Vec<ModuleDiagnostic>,
    /// Replacements registered during the traversal, in source order.
    pub dependencies: Vec<ConstDependency>,
}

impl Module {
    pub fn new(id: ModuleId, file_path: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id,
            file_path: file_path.into(),
            source: source.into(),
            errors: Vec::new(),
            warnings: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn add_dependency(&mut self, dependency: ConstDependency) {
        self.dependencies.push(dependency);
    }

    /// The list diagnostics of the given severity go into.
    pub fn diagnostics_mut(&mut self, severity: Severity) -> &mut Vec<ModuleDiagnostic> {
        match severity {
            Severity::Error => &mut self.errors,
            Severity::Warning => &mut self.warnings,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

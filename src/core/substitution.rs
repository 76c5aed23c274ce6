//! Constant replacements for translate call sites.
//!
//! The pass does not rewrite the AST. It registers a [`ConstDependency`] per
//! matched call, and [`ConstTemplate`] later splices the constants into the
//! original text by byte range, leaving the rest of the source untouched.

use anyhow::{Result, bail};
use serde_json::Value;

use crate::core::{SourceLocation, SourceRange};

/// A constant expression that replaces one source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstDependency {
    /// JavaScript expression text, e.g. `"Bonjour"` (quotes included).
    pub expression: String,
    /// Byte range of the replaced call expression in the module source.
    pub range: SourceRange,
    /// Location of the replaced call expression.
    pub loc: SourceLocation,
}

impl ConstDependency {
    pub fn new(expression: impl Into<String>, range: SourceRange, loc: SourceLocation) -> Self {
        Self {
            expression: expression.into(),
            range,
            loc,
        }
    }

    /// A string constant, JSON-encoded so quotes and control characters
    /// stay valid JavaScript.
    pub fn string(value: &str, range: SourceRange, loc: SourceLocation) -> Self {
        Self::new(Value::String(value.to_owned()).to_string(), range, loc)
    }
}

/// Renders a module's source with its constant dependencies applied.
pub struct ConstTemplate;

impl ConstTemplate {
    pub fn apply(source: &str, dependencies: &[ConstDependency]) -> Result<String> {
        let mut sorted: Vec<&ConstDependency> = dependencies.iter().collect();
        sorted.sort_by_key(|dep| dep.range);

        for pair in sorted.windows(2) {
            if pair[0].range.end > pair[1].range.start {
                bail!(
                    "Overlapping replacements at {} and {}",
                    pair[0].loc,
                    pair[1].loc
                );
            }
        }

        let mut output = source.to_string();
        // Right to left so earlier ranges stay valid.
        for dep in sorted.into_iter().rev() {
            let SourceRange { start, end } = dep.range;
            if start > end
                || end > output.len()
                || !output.is_char_boundary(start)
                || !output.is_char_boundary(end)
            {
                bail!("Replacement range {}..{} is out of bounds at {}", start, end, dep.loc);
            }
            output.replace_range(start..end, &dep.expression);
        }
        Ok(output)
    }
}

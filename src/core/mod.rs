//! Core transform engine.
//!
//! ## Module Structure
//!
//! - `matcher`: trigger names and call-site matching
//! - `evaluate`: static evaluation of call arguments
//! - `resolver`: singular/plural localization lookup
//! - `diagnostics`: per-module missing-key records
//! - `substitution`: constant replacements and their rendering
//! - `pass`: the inlining pass tying the above together
//! - `compilation`: multi-module driver (parallel parse, sequential transform)
//! - `parsers`: source and locale file parsers
//! - `file_scanner`: source file discovery

pub mod compilation;
pub mod diagnostics;
pub mod evaluate;
pub mod file_scanner;
pub mod matcher;
pub mod module;
pub mod parsers;
pub mod pass;
pub mod resolver;
pub mod substitution;

pub use compilation::{Compilation, CompilationResult, ModuleOutput};
pub use diagnostics::{DiagnosticTracker, MissingOutcome};
pub use evaluate::{Evaluated, ExpressionEvaluator, LiteralEvaluator, format_number};
pub use matcher::{CallSiteMatcher, MatchedCall, TriggerKind, TriggerNames};
pub use module::{Module, ModuleId, SourceLocation, SourceRange};
pub use parsers::source::ParsedSource;
pub use pass::{I18nPass, ParserState, PassOptions, TransformError};
pub use resolver::{ArgValue, LocalizationResolver, LocalizationSource, LocalizeFn, Lookup};
pub use substitution::{ConstDependency, ConstTemplate};

//! The translate-call inlining pass.
//!
//! For every call expression met during one left-to-right walk of a module,
//! the pass runs the same short sequence:
//!
//! 1. **Match**: is the callee one of the trigger names (`__` / `__n`)?
//! 2. **Evaluate**: first argument must be a literal string (the key), the
//!    rest literal strings or numbers.
//! 3. **Resolve**: ask the singular or plural resolver for a translation.
//! 4. **Diagnose**: on a miss, add the key to the module's record.
//! 5. **Substitute**: register a constant replacing the whole call.
//!
//! A malformed call stops the walk and is returned as a [`TransformError`];
//! missing translations never stop it.
//!
//! ```ignore
//! let pass = I18nPass::new(PassOptions {
//!     localization: Some(LocalizationSource::Map(table)),
//!     fail_on_missing: true,
//!     ..Default::default()
//! });
//! let mut state = ParserState::new(&mut module, &mut tracker, &LiteralEvaluator, &parsed);
//! pass.transform(&parsed.module, &mut state)?;
//! ```

use swc_common::{BytePos, SourceMap, Span, Spanned};
use swc_ecma_ast::{CallExpr, Module as AstModule};
use swc_ecma_visit::{Visit, VisitWith};
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::{
    ArgValue, CallSiteMatcher, ConstDependency, DiagnosticTracker, Evaluated,
    ExpressionEvaluator, LocalizationResolver, LocalizationSource, Lookup, MatchedCall, Module,
    ParsedSource, SourceLocation, SourceRange, TriggerKind, TriggerNames,
    matcher::{DEFAULT_FUNCTION_NAME, DEFAULT_PLURAL_FUNCTION_NAME},
};
use crate::issues::Severity;


/// Options the pass is built from.
#[derive(Debug, Clone)]
pub struct PassOptions {
    /// Singular source; `None` makes every singular lookup miss.
    pub localization: Option<LocalizationSource>,
    /// Plural source; `None` makes every plural call fall back to its key.
    pub plural_localization: Option<LocalizationSource>,
    /// Singular trigger name (`__` by default).
    pub function_name: String,
    /// Plural trigger name (`__n` by default).
    pub plural_function_name: String,
    /// Report a module's missing keys as an error instead of a warning.
    pub fail_on_missing: bool,
}

impl Default for PassOptions {
    fn default() -> Self {
        Self {
            localization: None,
            plural_localization: None,
            function_name: DEFAULT_FUNCTION_NAME.to_string(),
            plural_function_name: DEFAULT_PLURAL_FUNCTION_NAME.to_string(),
            fail_on_missing: false,
        }
    }
}

/// A translate call that cannot be inlined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The key argument is absent or not a literal string.
    #[error("invalid argument to {function}: the key must be a string literal, found {found}")]
    InvalidKey {
        function: String,
        found: &'static str,
        loc: SourceLocation,
    },
    /// An argument after the key is not a literal string or number.
    #[error(
        "invalid argument to {function}: argument {position} must be a string or number, found {found}"
    )]
    InvalidArgument {
        function: String,
        /// 1-indexed position in the call.
        position: usize,
        found: &'static str,
        loc: SourceLocation,
    },
}

impl TransformError {
    /// The trigger name of the offending call.
    pub fn function(&self) -> &str {
        match self {
            TransformError::InvalidKey { function, .. }
            | TransformError::InvalidArgument { function, .. } => function,
        }
    }

    pub fn location(&self) -> &SourceLocation {
        match self {
            TransformError::InvalidKey { loc, .. } | TransformError::InvalidArgument { loc, .. } => {
                loc
            }
        }
    }
}

/// Per-traversal state handed to the pass.
///
/// Exposes the evaluator, the module being built, the diagnostic side table
/// and the source map used to turn spans into ranges and locations.
pub struct ParserState<'a> {
    pub module: &'a mut Module,
    pub tracker: &'a mut DiagnosticTracker,
    pub evaluator: &'a dyn ExpressionEvaluator,
    source_map: &'a SourceMap,
    start_pos: BytePos,
    source_offset: usize,
}

impl<'a> ParserState<'a> {
    pub fn new(
        module: &'a mut Module,
        tracker: &'a mut DiagnosticTracker,
        evaluator: &'a dyn ExpressionEvaluator,
        parsed: &'a ParsedSource,
    ) -> Self {
        Self {
            module,
            tracker,
            evaluator,
            source_map: &parsed.source_map,
            start_pos: parsed.start_pos,
            source_offset: parsed.source_offset,
        }
    }

    /// Location of a span start, as shown to users.
    pub fn location(&self, span: Span) -> SourceLocation {
        let loc = self.source_map.lookup_char_pos(span.lo);
        SourceLocation::new(
            self.module.file_path.clone(),
            loc.line,
            loc.col_display + 1,
        )
    }

    /// Byte range of a span relative to the module source, including any
    /// byte order mark the parser skipped.
    pub fn range(&self, span: Span) -> SourceRange {
        let start = span.lo.0.saturating_sub(self.start_pos.0) as usize + self.source_offset;
        let end = span.hi.0.saturating_sub(self.start_pos.0) as usize + self.source_offset;
        SourceRange::new(start, end)
    }

    pub fn add_dependency(&mut self, dependency: ConstDependency) {
        self.module.add_dependency(dependency);
    }
}

/// The configured pass. Immutable once built and safe to share across threads.
#[derive(Debug, Clone)]
pub struct I18nPass {
    resolver: LocalizationResolver,
    matcher: CallSiteMatcher,
    fail_on_missing: bool,
}

impl I18nPass {
    pub fn new(options: PassOptions) -> Self {
        let names = TriggerNames {
            singular: options.function_name,
            plural: options.plural_function_name,
        };
        Self {
            resolver: LocalizationResolver::new(
                options.localization,
                options.plural_localization,
            ),
            matcher: CallSiteMatcher::new(&names),
            fail_on_missing: options.fail_on_missing,
        }
    }

    fn missing_severity(&self) -> Severity {
        if self.fail_on_missing {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    /// Walk `ast` and inline every translate call into `state.module`.
    ///
    /// Returns the number of substituted call sites. Stops at the first
    /// malformed call; dependencies registered before it stay on the module
    /// and it is up to the caller to discard them.
    pub fn transform(
        &self,
        ast: &AstModule,
        state: &mut ParserState<'_>,
    ) -> Result<usize, TransformError> {
        let mut visitor = CallVisitor {
            pass: self,
            state,
            failure: None,
            substituted: 0,
        };
        ast.visit_with(&mut visitor);
        match visitor.failure {
            Some(err) => Err(err),
            None => Ok(visitor.substituted),
        }
    }

    /// Evaluate, resolve, diagnose and substitute one matched call.
    pub fn handle_call(
        &self,
        matched: MatchedCall<'_>,
        call: &CallExpr,
        state: &mut ParserState<'_>,
    ) -> Result<(), TransformError> {
        let (key, args) = self.evaluate_arguments(matched.name, call, state)?;

        let value = match self.resolver.resolve(matched.kind, &key, &args) {
            Lookup::Translated(value) => value,
            Lookup::Missing => {
                let location = state.location(call.span);
                let outcome = state.tracker.record_missing(
                    state.module,
                    &key,
                    &key,
                    location,
                    self.missing_severity(),
                );
                debug!(
                    module = %state.module.file_path,
                    key = %key,
                    ?outcome,
                    "missing localization"
                );
                key
            }
        };

        let dependency =
            ConstDependency::string(&value, state.range(call.span), state.location(call.span));
        debug!(
            loc = %dependency.loc,
            plural = matched.kind == TriggerKind::Plural,
            value = %dependency.expression,
            "inlined translate call"
        );
        state.add_dependency(dependency);
        Ok(())
    }

    fn evaluate_arguments(
        &self,
        function: &str,
        call: &CallExpr,
        state: &ParserState<'_>,
    ) -> Result<(String, Vec<ArgValue>), TransformError> {
        let mut arguments = call.args.iter();

        let key = match arguments.next() {
            Some(arg) if arg.spread.is_none() => match state.evaluator.evaluate(&arg.expr) {
                Evaluated::String(key) => key,
                other => {
                    return Err(TransformError::InvalidKey {
                        function: function.to_string(),
                        found: other.kind_name(),
                        loc: state.location(call.span),
                    });
                }
            },
            Some(_) => {
                return Err(TransformError::InvalidKey {
                    function: function.to_string(),
                    found: "spread element",
                    loc: state.location(call.span),
                });
            }
            None => {
                return Err(TransformError::InvalidKey {
                    function: function.to_string(),
                    found: "no arguments",
                    loc: state.location(call.span),
                });
            }
        };

        let args = arguments
            .enumerate()
            .map(|(i, arg)| {
                let evaluated = if arg.spread.is_some() {
                    None
                } else {
                    Some(state.evaluator.evaluate(&arg.expr))
                };
                match evaluated {
                    Some(Evaluated::String(s)) => Ok(ArgValue::Str(s)),
                    Some(Evaluated::Number(n)) => Ok(ArgValue::Num(n)),
                    other => Err(TransformError::InvalidArgument {
                        function: function.to_string(),
                        position: i + 2,
                        found: other.map_or("spread element", |e| e.kind_name()),
                        loc: state.location(arg.expr.span()),
                    }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((key, args))
    }
}

/// Visitor driving the pass over one module.
struct CallVisitor<'p, 's, 'a> {
    pass: &'p I18nPass,
    state: &'s mut ParserState<'a>,
    failure: Option<TransformError>,
    substituted: usize,
}

impl Visit for CallVisitor<'_, '_, '_> {
    fn visit_call_expr(&mut self, call: &CallExpr) {
        if self.failure.is_some() {
            return;
        }
        match self.pass.matcher.match_call(call) {
            // The whole call is replaced, so its arguments are not visited.
            Some(matched) => match self.pass.handle_call(matched, call, self.state) {
                Ok(()) => self.substituted += 1,
                Err(err) => self.failure = Some(err),
            },
            None => {
                trace!("skipping call at {:?}", call.span);
                call.visit_children_with(self);
            }
        }
    }
}

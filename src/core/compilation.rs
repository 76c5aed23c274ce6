//! Drives the pass over a set of modules.
//!
//! Parsing is independent per file and runs in parallel with rayon against a
//! shared `SourceMap`. Transformation then walks the modules one at a time:
//! each module is visited by exactly one traversal, and the diagnostic side
//! table is only touched from that sequential loop.

use std::sync::Arc;

use anyhow::Result;
use rayon::prelude::*;
use swc_common::SourceMap;
use tracing::{debug, warn};

use crate::core::{
    ConstTemplate, DiagnosticTracker, ExpressionEvaluator, I18nPass, LiteralEvaluator, Module,
    ModuleId, ParserState,
    parsers::source::{ParsedSource, parse_source},
};
use crate::issues::ModuleDiagnostic;

/// Build result of one module.
#[derive(Debug, Clone)]
pub struct ModuleOutput {
    pub id: ModuleId,
    pub file_path: String,
    /// Transformed source, `None` when the module failed to build.
    pub code: Option<String>,
    pub errors: Vec<ModuleDiagnostic>,
    pub warnings: Vec<ModuleDiagnostic>,
    /// Number of inlined call sites.
    pub substitutions: usize,
}

impl ModuleOutput {
    /// Keys without translation in this module, in first-seen order.
    pub fn missing_keys(&self) -> Vec<&str> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .filter_map(ModuleDiagnostic::as_missing_localization)
            .flat_map(|record| record.keys())
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct CompilationResult {
    pub modules: Vec<ModuleOutput>,
}

impl CompilationResult {
    pub fn error_count(&self) -> usize {
        self.modules.iter().map(|m| m.errors.len()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.modules.iter().map(|m| m.warnings.len()).sum()
    }

    pub fn substitution_count(&self) -> usize {
        self.modules.iter().map(|m| m.substitutions).sum()
    }

    pub fn module(&self, file_path: &str) -> Option<&ModuleOutput> {
        self.modules.iter().find(|m| m.file_path == file_path)
    }
}

pub struct Compilation {
    pass: I18nPass,
    evaluator: Box<dyn ExpressionEvaluator>,
    tracker: DiagnosticTracker,
    modules: Vec<Module>,
}

impl Compilation {
    pub fn new(pass: I18nPass) -> Self {
        Self {
            pass,
            evaluator: Box::new(LiteralEvaluator),
            tracker: DiagnosticTracker::new(),
            modules: Vec::new(),
        }
    }

    /// Replace the default literal evaluator.
    pub fn with_evaluator(mut self, evaluator: impl ExpressionEvaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    pub fn add_module(&mut self, file_path: impl Into<String>, source: impl Into<String>) -> ModuleId {
        let id = ModuleId(self.modules.len());
        self.modules.push(Module::new(id, file_path, source));
        id
    }

    /// Register a module whose source could not be loaded. It is reported
    /// as failed and never parsed.
    pub fn add_failed_module(
        &mut self,
        file_path: impl Into<String>,
        message: impl Into<String>,
    ) -> ModuleId {
        let id = ModuleId(self.modules.len());
        let mut module = Module::new(id, file_path, String::new());
        module.errors.push(ModuleDiagnostic::BuildFailed {
            module_path: module.file_path.clone(),
            message: message.into(),
        });
        self.modules.push(module);
        id
    }

    /// Parse and transform every registered module.
    pub fn build(mut self) -> CompilationResult {
        let modules = std::mem::take(&mut self.modules);
        let source_map = Arc::new(SourceMap::default());

        let parsed: Vec<Option<Result<ParsedSource>>> = modules
            .par_iter()
            .map(|module| {
                if module.has_errors() {
                    return None;
                }
                Some(parse_source(
                    module.source.clone(),
                    &module.file_path,
                    Arc::clone(&source_map),
                ))
            })
            .collect();

        let outputs = modules
            .into_iter()
            .zip(parsed)
            .map(|(module, parsed)| self.build_module(module, parsed))
            .collect();

        CompilationResult { modules: outputs }
    }

    fn build_module(
        &mut self,
        mut module: Module,
        parsed: Option<Result<ParsedSource>>,
    ) -> ModuleOutput {
        let (code, substitutions) = match parsed {
            None => (None, 0),
            Some(Ok(parsed)) => self.transform_module(&mut module, &parsed),
            Some(Err(err)) => {
                warn!(module = %module.file_path, "{:#}", err);
                module.errors.push(ModuleDiagnostic::BuildFailed {
                    module_path: module.file_path.clone(),
                    message: format!("{:#}", err),
                });
                (None, 0)
            }
        };

        ModuleOutput {
            id: module.id,
            file_path: module.file_path,
            code,
            errors: module.errors,
            warnings: module.warnings,
            substitutions,
        }
    }

    fn transform_module(&mut self, module: &mut Module, parsed: &ParsedSource) -> (Option<String>, usize) {
        let result = {
            let mut state =
                ParserState::new(module, &mut self.tracker, self.evaluator.as_ref(), parsed);
            self.pass.transform(&parsed.module, &mut state)
        };

        match result {
            Ok(substitutions) => match ConstTemplate::apply(&module.source, &module.dependencies) {
                Ok(code) => {
                    debug!(module = %module.file_path, substitutions, "module built");
                    (Some(code), substitutions)
                }
                Err(err) => {
                    module.errors.push(ModuleDiagnostic::BuildFailed {
                        module_path: module.file_path.clone(),
                        message: format!("{:#}", err),
                    });
                    (None, 0)
                }
            },
            Err(err) => {
                warn!(loc = %err.location(), "aborting module: {}", err);
                module.dependencies.clear();
                module.errors.push(ModuleDiagnostic::InvalidCall(err));
                (None, 0)
            }
        }
    }
}

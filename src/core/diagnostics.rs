//! Per-module tracking of untranslated keys.
//!
//! The tracker is a side table from module identity to the slot where that
//! module's [`MissingLocalizationError`] lives. The record itself is stored in
//! the module's `errors` or `warnings` list, pushed once when the first
//! missing key is seen and updated in place afterwards.

use std::collections::HashMap;

use crate::core::{Module, ModuleId, SourceLocation};
use crate::issues::{MissingLocalizationError, MissingRequest, ModuleDiagnostic, Severity};

/// What a call to [`DiagnosticTracker::record_missing`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingOutcome {
    /// First miss in the module: the record was created and pushed.
    Created,
    /// The key was appended to the existing record.
    Added,
    /// The key was already listed.
    AlreadyRecorded,
}

#[derive(Debug, Clone, Copy)]
struct RecordSlot {
    severity: Severity,
    index: usize,
}

#[derive(Debug, Default)]
pub struct DiagnosticTracker {
    records: HashMap<ModuleId, RecordSlot>,
}

impl DiagnosticTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note that `key` has no translation in `module`.
    ///
    /// The record goes into the list matching `severity` when it is created;
    /// later calls for the same module reuse it whatever severity they pass.
    pub fn record_missing(
        &mut self,
        module: &mut Module,
        key: &str,
        value: &str,
        location: SourceLocation,
        severity: Severity,
    ) -> MissingOutcome {
        let request = MissingRequest {
            key: key.to_string(),
            value: value.to_string(),
            location,
        };

        if let Some(slot) = self.records.get(&module.id).copied()
            && let Some(ModuleDiagnostic::MissingLocalization(record)) =
                module.diagnostics_mut(slot.severity).get_mut(slot.index)
        {
            return if record.add(request) {
                MissingOutcome::Added
            } else {
                MissingOutcome::AlreadyRecorded
            };
        }

        let record = MissingLocalizationError::new(module.file_path.clone(), request);
        let list = module.diagnostics_mut(severity);
        let index = list.len();
        list.push(ModuleDiagnostic::MissingLocalization(record));
        self.records
            .insert(module.id, RecordSlot { severity, index });
        MissingOutcome::Created
    }

    /// The module's record, if any key was missing.
    pub fn record<'m>(&self, module: &'m Module) -> Option<&'m MissingLocalizationError> {
        let slot = self.records.get(&module.id)?;
        let list = match slot.severity {
            Severity::Error => &module.errors,
            Severity::Warning => &module.warnings,
        };
        list.get(slot.index)?.as_missing_localization()
    }

    pub fn tracked_modules(&self) -> usize {
        self.records.len()
    }
}

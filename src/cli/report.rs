//! Build report formatting.
//!
//! Diagnostics are printed cargo-style, one block per module diagnostic,
//! followed by a one-line summary. Kept out of `core` so the library can be
//! embedded without any terminal output.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::BuildSummary;
use crate::core::{CompilationResult, ModuleOutput};
use crate::issues::{ModuleDiagnostic, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print every diagnostic of a build to a custom writer.
///
/// Modules are reported in build order, errors before warnings.
pub fn report_to<W: Write>(result: &CompilationResult, writer: &mut W) {
    for module in &result.modules {
        print_module(module, writer);
    }

    print_summary(result, writer);
}

/// Print the success line of a build without diagnostics.
pub fn print_success_to<W: Write>(summary: &BuildSummary, writer: &mut W) {
    let files = summary.result.modules.len();
    let inlined = summary.result.substitution_count();
    let action = if summary.written.is_some() {
        "Built"
    } else {
        "Checked"
    };
    let msg = format!(
        "{} {} source {}, inlined {} {} - no issues found",
        action,
        files,
        plural(files, "file", "files"),
        inlined,
        plural(inlined, "translation", "translations"),
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

/// Print where the output went.
pub fn print_written_to<W: Write>(summary: &BuildSummary, writer: &mut W) {
    if let Some(written) = summary.written {
        let _ = writeln!(
            writer,
            "Wrote {} {} to {}",
            written,
            plural(written, "file", "files"),
            summary.out_dir.display()
        );
    }
}

/// Print a warning about paths the scanner could not read.
pub fn print_skipped_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be accessed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

pub fn print(summary: &BuildSummary, verbose: bool) {
    let mut stdout = io::stdout().lock();
    let result = &summary.result;

    if result.error_count() == 0 && result.warning_count() == 0 {
        print_success_to(summary, &mut stdout);
    } else {
        report_to(result, &mut stdout);
    }
    print_written_to(summary, &mut stdout);

    print_skipped_warning_to(summary.skipped_count, verbose, &mut io::stderr().lock());
}

// ============================================================
// Internal Functions
// ============================================================

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

fn print_module<W: Write>(module: &ModuleOutput, writer: &mut W) {
    for diagnostic in &module.errors {
        print_diagnostic(diagnostic, Severity::Error, &module.file_path, writer);
    }
    for diagnostic in &module.warnings {
        print_diagnostic(diagnostic, Severity::Warning, &module.file_path, writer);
    }
}

fn print_diagnostic<W: Write>(
    diagnostic: &ModuleDiagnostic,
    severity: Severity,
    module_path: &str,
    writer: &mut W,
) {
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };
    let _ = writeln!(writer, "{}: {}", severity_str, diagnostic.title().bold());

    match diagnostic {
        ModuleDiagnostic::MissingLocalization(record) => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), record.module_path);
            for request in record.requests() {
                let _ = writeln!(
                    writer,
                    "   {} {}  {}",
                    "=".blue(),
                    request,
                    request.location.to_string().dimmed()
                );
            }
        }
        ModuleDiagnostic::InvalidCall(err) => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), err.location());
            let _ = writeln!(writer, "   {} {}", "=".blue(), err);
        }
        ModuleDiagnostic::BuildFailed { message, .. } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), module_path);
            let _ = writeln!(writer, "   {} {}", "=".blue(), message);
        }
    }
    let _ = writeln!(writer);
}

fn print_summary<W: Write>(result: &CompilationResult, writer: &mut W) {
    let errors = result.error_count();
    let warnings = result.warning_count();
    if errors + warnings == 0 {
        return;
    }

    let failed = result.modules.iter().filter(|m| m.code.is_none()).count();
    let _ = writeln!(
        writer,
        "{} {} {}, {} {} ({} of {} {} failed to build)",
        FAILURE_MARK.red(),
        errors,
        plural(errors, "error", "errors").red(),
        warnings,
        plural(warnings, "warning", "warnings").yellow(),
        failed,
        result.modules.len(),
        plural(result.modules.len(), "module", "modules"),
    );
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::{ModuleId, SourceLocation, TransformError};
    use crate::issues::{MissingLocalizationError, MissingRequest};

    fn strip_ansi(s: &str) -> String {
        let mut result = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                result.push(c);
            }
        }
        result
    }

    fn output(file_path: &str) -> ModuleOutput {
        ModuleOutput {
            id: ModuleId(0),
            file_path: file_path.to_string(),
            code: Some(String::new()),
            errors: Vec::new(),
            warnings: Vec::new(),
            substitutions: 0,
        }
    }

    fn request(key: &str, line: usize) -> MissingRequest {
        MissingRequest {
            key: key.to_string(),
            value: key.to_string(),
            location: SourceLocation::new("src/app.js", line, 1),
        }
    }

    fn render(result: &CompilationResult) -> String {
        let mut out = Vec::new();
        report_to(result, &mut out);
        strip_ansi(&String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_report_empty() {
        assert_eq!(render(&CompilationResult::default()), "");
    }

    #[test]
    fn test_report_missing_localization() {
        let mut record = MissingLocalizationError::new("src/app.js", request("hello", 1));
        record.add(request("bye", 3));
        let mut module = output("src/app.js");
        module
            .warnings
            .push(ModuleDiagnostic::MissingLocalization(record));

        let rendered = render(&CompilationResult {
            modules: vec![module],
        });

        assert_eq!(
            rendered,
            "warning: missing localization\n\
             \x20 --> src/app.js\n\
             \x20  = Missing localization: hello  src/app.js:1:1\n\
             \x20  = Missing localization: bye  src/app.js:3:1\n\
             \n\
             ✘ 0 errors, 1 warning (0 of 1 module failed to build)\n"
        );
    }

    #[test]
    fn test_report_invalid_call() {
        let mut module = output("src/app.js");
        module.code = None;
        module
            .errors
            .push(ModuleDiagnostic::InvalidCall(TransformError::InvalidArgument {
                function: "__n".to_string(),
                position: 2,
                found: "boolean",
                loc: SourceLocation::new("src/app.js", 4, 9),
            }));

        let rendered = render(&CompilationResult {
            modules: vec![module],
        });

        assert!(rendered.starts_with("error: invalid translate call\n"));
        assert!(rendered.contains("--> src/app.js:4:9"));
        assert!(rendered.contains(
            "= invalid argument to __n: argument 2 must be a string or number, found boolean"
        ));
        assert!(rendered.contains("1 error, 0 warnings (1 of 1 module failed to build)"));
    }

    #[test]
    fn test_errors_before_warnings() {
        let mut module = output("src/app.js");
        module.warnings.push(ModuleDiagnostic::MissingLocalization(
            MissingLocalizationError::new("src/app.js", request("hello", 1)),
        ));
        module.errors.push(ModuleDiagnostic::BuildFailed {
            module_path: "src/app.js".to_string(),
            message: "boom".to_string(),
        });

        let rendered = render(&CompilationResult {
            modules: vec![module],
        });

        let error_at = rendered.find("error: module build failed").unwrap();
        let warning_at = rendered.find("warning: missing localization").unwrap();
        assert!(error_at < warning_at);
    }

    #[test]
    fn test_print_success() {
        let mut module = output("src/app.js");
        module.substitutions = 3;
        let summary = BuildSummary {
            result: CompilationResult {
                modules: vec![module],
            },
            out_dir: PathBuf::from("dist"),
            written: Some(1),
            skipped_count: 0,
        };

        let mut out = Vec::new();
        print_success_to(&summary, &mut out);
        print_written_to(&summary, &mut out);
        let stripped = strip_ansi(&String::from_utf8(out).unwrap());

        assert!(stripped.contains("Built 1 source file, inlined 3 translations - no issues found"));
        assert!(stripped.contains("Wrote 1 file to dist"));
    }

    #[test]
    fn test_print_success_check_only() {
        let summary = BuildSummary {
            result: CompilationResult::default(),
            out_dir: PathBuf::from("dist"),
            written: None,
            skipped_count: 0,
        };

        let mut out = Vec::new();
        print_success_to(&summary, &mut out);
        print_written_to(&summary, &mut out);
        let stripped = strip_ansi(&String::from_utf8(out).unwrap());

        assert!(stripped.contains("Checked 0 source files"));
        assert!(!stripped.contains("Wrote"));
    }

    #[test]
    fn test_skipped_warning_hidden_when_verbose() {
        let mut out = Vec::new();
        print_skipped_warning_to(2, true, &mut out);
        assert!(out.is_empty());

        print_skipped_warning_to(2, false, &mut out);
        let stripped = strip_ansi(&String::from_utf8(out).unwrap());
        assert!(stripped.contains("2 path(s) could not be accessed"));
    }
}

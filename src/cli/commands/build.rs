use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::super::{args::BuildArgs, args::BuildCommand, exit_status::ExitStatus};
use crate::config::{CONFIG_FILE_NAME, Config, ConfigLoadResult, LocalizationConfig, load_config};
use crate::core::{Compilation, CompilationResult, I18nPass, file_scanner::scan_files};

/// Outcome of `build`.
#[derive(Debug)]
pub struct BuildSummary {
    pub result: CompilationResult,
    pub out_dir: PathBuf,
    /// Number of files written, `None` for `--check` runs.
    pub written: Option<usize>,
    /// Paths the scanner could not access.
    pub skipped_count: usize,
}

impl BuildSummary {
    pub fn exit_status(&self) -> ExitStatus {
        if self.result.error_count() > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

pub fn build(cmd: BuildCommand) -> Result<BuildSummary> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    build_in(&cwd, &cmd.args)
}

fn build_in(cwd: &Path, args: &BuildArgs) -> Result<BuildSummary> {
    let ConfigLoadResult {
        mut config,
        root_dir,
        from_file,
    } = load_config(cwd)?;
    if !from_file {
        debug!("No {} found, using defaults", CONFIG_FILE_NAME);
    }
    apply_overrides(&mut config, args, cwd);

    let options = config.pass_options(&root_dir)?;
    let source_root = root_dir.join(&config.source_root);
    let out_dir = root_dir.join(&config.out_dir);

    let mut ignores = config.ignores.clone();
    ignores.push(out_dir.to_string_lossy().into_owned());
    let scan = scan_files(&source_root, &config.includes, &ignores);
    info!(
        files = scan.files.len(),
        root = %source_root.display(),
        "scanned source files"
    );

    let mut compilation = Compilation::new(I18nPass::new(options));
    for path in &scan.files {
        let name = module_path(path, &source_root);
        match fs::read_to_string(path) {
            Ok(source) => {
                compilation.add_module(name, source);
            }
            Err(err) => {
                warn!(path = %path.display(), "{}", err);
                let message = format!("Failed to read {}: {}", path.display(), err);
                compilation.add_failed_module(name, message);
            }
        }
    }

    let result = compilation.build();

    let written = if args.check {
        None
    } else {
        Some(write_outputs(&result, &out_dir)?)
    };

    Ok(BuildSummary {
        result,
        out_dir,
        written,
        skipped_count: scan.skipped_count,
    })
}

/// CLI flags win over the config file. Paths given on the command line are
/// relative to the working directory.
fn apply_overrides(config: &mut Config, args: &BuildArgs, cwd: &Path) {
    let absolute = |path: &PathBuf| cwd.join(path).to_string_lossy().into_owned();

    if let Some(locale) = &args.locale {
        config.localization = Some(LocalizationConfig::File(absolute(locale)));
    }
    if let Some(locale) = &args.plural_locale {
        config.plural_localization = Some(LocalizationConfig::File(absolute(locale)));
    }
    if let Some(source_root) = &args.source_root {
        config.source_root = absolute(source_root);
    }
    if let Some(out_dir) = &args.out_dir {
        config.out_dir = absolute(out_dir);
    }
    if args.fail_on_missing {
        config.fail_on_missing = true;
    }
}

/// Module name as shown in diagnostics: the path below the source root,
/// with forward slashes.
fn module_path(path: &Path, source_root: &Path) -> String {
    path.strip_prefix(source_root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Write every module that built, mirroring the source tree under `out_dir`.
fn write_outputs(result: &CompilationResult, out_dir: &Path) -> Result<usize> {
    let mut written = 0;
    for module in &result.modules {
        let Some(code) = &module.code else {
            continue;
        };
        let target = out_dir.join(&module.file_path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&target, code).with_context(|| format!("Failed to write {}", target.display()))?;
        debug!(path = %target.display(), "wrote module");
        written += 1;
    }
    Ok(written)
}

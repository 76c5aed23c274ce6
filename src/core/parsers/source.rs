use std::{path::Path, sync::Arc};

use anyhow::{Result, anyhow};
use swc_common::{BytePos, FileName, Globals, SourceMap, comments::SingleThreadedComments};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// File extensions the pass knows how to parse.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    /// Position of the first byte of this file within `source_map`.
    pub start_pos: BytePos,
    /// Bytes at the head of the original text that are not part of the
    /// parsed file (a UTF-8 byte order mark).
    pub source_offset: usize,
}

/// Pick the parser syntax from the file extension.
///
/// TypeScript files get the TypeScript parser (with JSX for `.tsx`),
/// everything else is parsed as JavaScript with JSX enabled.
pub fn syntax_for_path(file_path: &str) -> Syntax {
    let extension = Path::new(file_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    match extension {
        "ts" | "mts" | "cts" => Syntax::Typescript(TsSyntax::default()),
        "tsx" => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
    }
}

/// Parse JavaScript/TypeScript source code into an AST.
///
/// Accepts a shared SourceMap for thread-safe parallel parsing.
pub fn parse_source(code: String, file_path: &str, source_map: Arc<SourceMap>) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let original_len = code.len();
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(
            syntax_for_path(file_path),
            StringInput::from(&*source_file),
            Some(&comments),
        );

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {}", file_path, e.kind().msg()))?;

        Ok(ParsedSource {
            module,
            start_pos: source_file.start_pos,
            source_offset: original_len.saturating_sub(source_file.src.len()),
            source_map,
        })
    })
}

//! File parsers for source code and locale files.
//!
//! - `source`: JavaScript / TypeScript module parser (uses swc for AST generation)
//! - `json`: JSON locale file loader (flattens nested tables into dotted keys)

pub mod json;
pub mod source;

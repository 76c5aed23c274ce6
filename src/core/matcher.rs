//! Trigger names and call-site matching.
//!
//! A call matches when its callee is a bare identifier registered as the
//! singular or plural trigger. Matching is by name only; shadowing and member
//! calls like `i18n.__()` are not considered.

use std::collections::HashMap;

use swc_ecma_ast::{CallExpr, Callee, Expr};

pub const DEFAULT_FUNCTION_NAME: &str = "__";
pub const DEFAULT_PLURAL_FUNCTION_NAME: &str = "__n";

/// Whether a call site asks for a singular or a plural translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    Singular,
    Plural,
}

/// Callee names that mark translate calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerNames {
    pub singular: String,
    pub plural: String,
}

impl Default for TriggerNames {
    fn default() -> Self {
        Self {
            singular: DEFAULT_FUNCTION_NAME.to_string(),
            plural: DEFAULT_PLURAL_FUNCTION_NAME.to_string(),
        }
    }
}

/// A call whose callee is one of the trigger names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedCall<'a> {
    pub kind: TriggerKind,
    /// The callee name as written.
    pub name: &'a str,
}

/// Registration table from trigger name to trigger kind.
///
/// Matching is by callee name only: `__("a")` matches, `i18n.__("a")` and
/// `(0, __)("a")` do not, and no scope analysis is done.
#[derive(Debug, Clone)]
pub struct CallSiteMatcher {
    hooks: HashMap<String, TriggerKind>,
}

impl CallSiteMatcher {
    pub fn new(names: &TriggerNames) -> Self {
        let mut hooks = HashMap::new();
        hooks.insert(names.plural.clone(), TriggerKind::Plural);
        // Singular wins if both names are the same.
        hooks.insert(names.singular.clone(), TriggerKind::Singular);
        Self { hooks }
    }

    pub fn kind_of(&self, name: &str) -> Option<TriggerKind> {
        self.hooks.get(name).copied()
    }

    pub fn match_call<'c>(&self, call: &'c CallExpr) -> Option<MatchedCall<'c>> {
        let Callee::Expr(callee) = &call.callee else {
            return None;
        };
        let Expr::Ident(ident) = &**callee else {
            return None;
        };
        let name: &str = &ident.sym;
        self.kind_of(name).map(|kind| MatchedCall { kind, name })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use swc_common::{FileName, SourceMap};
    use swc_ecma_ast::{Expr, ModuleItem, Stmt};
    use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

    use super::*;

    fn parse_call(code: &str) -> CallExpr {
        let source_map = Arc::new(SourceMap::default());
        let source_file = source_map.new_source_file(FileName::Anon.into(), code.to_string());
        let mut parser = Parser::new(
            Syntax::Typescript(TsSyntax::default()),
            StringInput::from(&*source_file),
            None,
        );
        let module = parser.parse_module().unwrap();
        match module.body.into_iter().next() {
            Some(ModuleItem::Stmt(Stmt::Expr(stmt))) => match *stmt.expr {
                Expr::Call(call) => call,
                other => panic!("expected call, got {:?}", other),
            },
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_default_names() {
        let matcher = CallSiteMatcher::new(&TriggerNames::default());
        assert_eq!(matcher.kind_of("__"), Some(TriggerKind::Singular));
        assert_eq!(matcher.kind_of("__n"), Some(TriggerKind::Plural));
        assert_eq!(matcher.kind_of("t"), None);
    }

    #[test]
    fn test_match_identifier_callee() {
        let matcher = CallSiteMatcher::new(&TriggerNames::default());

        let call = parse_call(r#"__("hello");"#);
        let matched = matcher.match_call(&call).unwrap();
        assert_eq!(matched.kind, TriggerKind::Singular);
        assert_eq!(matched.name, "__");

        let call = parse_call(r#"__n("item", 2);"#);
        assert_eq!(
            matcher.match_call(&call).map(|m| m.kind),
            Some(TriggerKind::Plural)
        );
    }

    #[test]
    fn test_ignores_other_callees() {
        let matcher = CallSiteMatcher::new(&TriggerNames::default());
        for code in [
            r#"t("hello");"#,
            r#"i18n.__("hello");"#,
            r#"(0, __)("hello");"#,
            r#"___("hello");"#,
        ] {
            let call = parse_call(code);
            assert!(matcher.match_call(&call).is_none(), "{}", code);
        }
    }

    #[test]
    fn test_custom_names() {
        let matcher = CallSiteMatcher::new(&TriggerNames {
            singular: "translate".to_string(),
            plural: "translatePlural".to_string(),
        });
        assert_eq!(matcher.kind_of("translate"), Some(TriggerKind::Singular));
        assert_eq!(matcher.kind_of("__"), None);
    }
}

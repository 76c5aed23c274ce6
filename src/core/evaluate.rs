//! Static evaluation of call arguments.
//!
//! The pass only needs to know whether an argument is a literal string or
//! number. [`ExpressionEvaluator`] is the seam a host can replace; the default
//! [`LiteralEvaluator`] folds the expressions a bundler's evaluator typically
//! handles without scope information:
//!
//! ```ignore
//! "key"                 → String("key")
//! `count.${1}`          → String("count.1")
//! "a" + 1               → String("a1")
//! -(2)                  → Number(-2)
//! true                  → Boolean(true)
//! someVariable          → NotLiteral
//! ```

use swc_ecma_ast::{BinaryOp, Expr, Lit, Tpl, UnaryOp};

/// Result of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluated {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Regex,
    /// Any expression whose value is not known statically.
    NotLiteral,
}

impl Evaluated {
    /// Human-readable kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Evaluated::String(_) => "string",
            Evaluated::Number(_) => "number",
            Evaluated::Boolean(_) => "boolean",
            Evaluated::Null => "null",
            Evaluated::Regex => "regular expression",
            Evaluated::NotLiteral => "non-literal expression",
        }
    }
}

/// Resolves an expression node to a literal value.
pub trait ExpressionEvaluator {
    fn evaluate(&self, expr: &Expr) -> Evaluated;
}

/// Default evaluator: literals, templates and `+` folding, no scope lookups.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralEvaluator;

impl ExpressionEvaluator for LiteralEvaluator {
    fn evaluate(&self, expr: &Expr) -> Evaluated {
        match expr {
            Expr::Lit(lit) => evaluate_lit(lit),
            Expr::Paren(paren) => self.evaluate(&paren.expr),
            Expr::Tpl(tpl) => self.evaluate_template(tpl),
            Expr::Unary(unary) => match (unary.op, self.evaluate(&unary.arg)) {
                (UnaryOp::Minus, Evaluated::Number(n)) => Evaluated::Number(-n),
                (UnaryOp::Plus, Evaluated::Number(n)) => Evaluated::Number(n),
                _ => Evaluated::NotLiteral,
            },
            Expr::Bin(bin) if bin.op == BinaryOp::Add => {
                concat(self.evaluate(&bin.left), self.evaluate(&bin.right))
            }
            _ => Evaluated::NotLiteral,
        }
    }
}

impl LiteralEvaluator {
    /// Fold a template literal whose interpolations are all literal.
    fn evaluate_template(&self, tpl: &Tpl) -> Evaluated {
        let mut result = String::new();
        for (i, quasi) in tpl.quasis.iter().enumerate() {
            match quasi.cooked.as_ref().and_then(|cooked| cooked.as_str()) {
                Some(text) => result.push_str(text),
                None => return Evaluated::NotLiteral,
            }
            if let Some(expr) = tpl.exprs.get(i) {
                match self.evaluate(expr) {
                    Evaluated::String(s) => result.push_str(&s),
                    Evaluated::Number(n) => result.push_str(&format_number(n)),
                    _ => return Evaluated::NotLiteral,
                }
            }
        }
        Evaluated::String(result)
    }
}

fn evaluate_lit(lit: &Lit) -> Evaluated {
    match lit {
        // Strings with lone surrogates have no UTF-8 form.
        Lit::Str(s) => s
            .value
            .as_str()
            .map(|value| Evaluated::String(value.to_owned()))
            .unwrap_or(Evaluated::NotLiteral),
        Lit::Num(n) => Evaluated::Number(n.value),
        Lit::Bool(b) => Evaluated::Boolean(b.value),
        Lit::Null(_) => Evaluated::Null,
        Lit::Regex(_) => Evaluated::Regex,
        _ => Evaluated::NotLiteral,
    }
}

/// JavaScript `+` on two already-evaluated operands.
fn concat(left: Evaluated, right: Evaluated) -> Evaluated {
    match (left, right) {
        (Evaluated::String(a), Evaluated::String(b)) => Evaluated::String(format!("{}{}", a, b)),
        (Evaluated::String(a), Evaluated::Number(b)) => {
            Evaluated::String(format!("{}{}", a, format_number(b)))
        }
        (Evaluated::Number(a), Evaluated::String(b)) => {
            Evaluated::String(format!("{}{}", format_number(a), b))
        }
        (Evaluated::Number(a), Evaluated::Number(b)) => Evaluated::Number(a + b),
        _ => Evaluated::NotLiteral,
    }
}

/// Format a number the way JavaScript's `String(n)` does.
///
/// Magnitudes of `1e21` and above, or below `1e-6`, use exponent form
/// (`1e+21`, `1.5e-7`); everything else prints the shortest decimal digits.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let exp = format!("{:e}", n);
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        };
    }
    if n.fract() == 0.0 {
        return format!("{:.0}", n);
    }
    n.to_string()
}

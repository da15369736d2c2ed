// driftwatch-core/src/domain/dq/syntax.rs

// Hand lexer for the condition mini-language: `name(arg1,arg2,...)`.
// This is deliberately NOT a grammar — nested parentheses inside
// arguments are unsupported by design, and arguments are kept verbatim
// (string literals stay single-quoted for the fixed-value checks).

use crate::domain::error::DomainError;

/// Removes every whitespace character. Expressions are
/// whitespace-insensitive, so this runs before any other step.
pub fn strip_whitespace(expression: &str) -> String {
    expression.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Text before the first `(`.
pub fn function_name(expression: &str) -> Result<&str, DomainError> {
    let open = expression
        .find('(')
        .ok_or_else(|| DomainError::ExpressionSyntax {
            expression: expression.to_string(),
            reason: "missing '('".to_string(),
        })?;
    Ok(&expression[..open])
}

/// Raw argument tokens: text between the first `(` and the last `)`,
/// split on `,`. An empty argument list yields one empty token, which
/// the arity check then rejects (no nullary built-in exists).
pub fn arguments(expression: &str) -> Result<Vec<String>, DomainError> {
    let open = expression
        .find('(')
        .ok_or_else(|| DomainError::ExpressionSyntax {
            expression: expression.to_string(),
            reason: "missing '('".to_string(),
        })?;
    let close = expression
        .rfind(')')
        .filter(|close| *close > open)
        .ok_or_else(|| DomainError::ExpressionSyntax {
            expression: expression.to_string(),
            reason: "missing ')'".to_string(),
        })?;

    Ok(expression[open + 1..close]
        .split(',')
        .map(str::to_string)
        .collect())
}

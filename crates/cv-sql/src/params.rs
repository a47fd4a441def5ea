//! Named parameter binding for `:name` placeholders

use sqlparser::tokenizer::Token;

use crate::dialect::SqlDialect;
use crate::error::{SqlError, SqlResult};
use crate::splitter::SourceIndex;

/// Replace `:name` placeholders in a statement with integer literals.
///
/// Placeholders inside string literals, quoted identifiers, and comments are
/// left alone. Every placeholder in the statement must have a value.
pub fn bind_params(
    statement: &str,
    dialect: &dyn SqlDialect,
    params: &[(&str, i64)],
) -> SqlResult<String> {
    let index = SourceIndex::new(statement);
    let tokens = dialect.tokenize(statement)?;

    // (byte range, parameter name) for each placeholder, in source order
    let mut placeholders: Vec<(usize, usize, String)> = Vec::new();
    let mut iter = tokens.iter().peekable();
    while let Some(token) = iter.next() {
        match &token.token {
            Token::Colon => {
                let Some(next) = iter.peek() else { continue };
                let Token::Word(word) = &next.token else {
                    continue;
                };
                if word.quote_style.is_some() {
                    continue;
                }
                let start = index.offset(token.span.start);
                let name_start = index.offset(next.span.start);
                // The name must follow the colon directly
                if name_start != start + 1 {
                    continue;
                }
                placeholders.push((start, name_start + word.value.len(), word.value.clone()));
                iter.next();
            }
            Token::Placeholder(p) if p.starts_with(':') && p.len() > 1 => {
                let start = index.offset(token.span.start);
                placeholders.push((start, start + p.len(), p[1..].to_string()));
            }
            _ => {}
        }
    }

    let mut bound = String::with_capacity(statement.len());
    let mut cursor = 0;
    for (start, end, name) in placeholders {
        let value = params
            .iter()
            .find(|(param, _)| *param == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| SqlError::UnboundParameter(name.clone()))?;
        bound.push_str(&statement[cursor..start]);
        bound.push_str(&value.to_string());
        cursor = end;
    }
    bound.push_str(&statement[cursor..]);

    Ok(bound)
}

#[cfg(test)]
#[path = "params_test.rs"]
mod tests;

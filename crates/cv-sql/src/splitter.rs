//! Script splitting: turn a script's text into individual statements.
//!
//! Two conventions are supported:
//!
//! - [`split_statements`] tokenizes the script and splits on `;` tokens, so
//!   semicolons inside quotes or comments never end a statement.
//! - [`split_delimited`] is the older convention where every statement ends
//!   with `;` immediately followed by the `--` comment marker.

use cv_core::ScriptFormat;
use sqlparser::tokenizer::{Location, Token};

use crate::dialect::{is_significant, SqlDialect};
use crate::error::SqlResult;

/// Inline-comment marker that closes each statement in delimited scripts
pub const STATEMENT_DELIMITER: &str = "--";

/// Split with whichever convention the script uses
pub fn split_with_format(
    sql: &str,
    format: ScriptFormat,
    dialect: &dyn SqlDialect,
) -> SqlResult<Vec<String>> {
    match format {
        ScriptFormat::Tokenized => split_statements(sql, dialect),
        ScriptFormat::Delimited => Ok(split_delimited(sql)),
    }
}

/// Split a script on statement-terminating `;` tokens.
///
/// Comment-only fragments are dropped. A final statement without a
/// terminator is still returned. Statement text is sliced from the source
/// unchanged, without the trailing `;`.
pub fn split_statements(sql: &str, dialect: &dyn SqlDialect) -> SqlResult<Vec<String>> {
    let index = SourceIndex::new(sql);
    let mut statements = Vec::new();
    let mut start: Option<usize> = None;

    for token in dialect.tokenize(sql)? {
        match &token.token {
            Token::SemiColon => {
                if let Some(begin) = start.take() {
                    let end = index.offset(token.span.start);
                    push_trimmed(&mut statements, &sql[begin..end]);
                }
            }
            t if is_significant(t) => {
                if start.is_none() {
                    start = Some(index.offset(token.span.start));
                }
            }
            _ => {}
        }
    }

    if let Some(begin) = start {
        log::debug!("Script ends without a terminator; keeping the final statement");
        push_trimmed(&mut statements, &sql[begin..]);
    }

    Ok(statements)
}

/// Split a script using the `;--` delimiter convention.
///
/// Newlines are removed, the text is split on `--`, and only fragments that
/// contain a `;` are kept. A statement missing its `--` merges into the next
/// fragment, and a fragment without `;` (a comment, or a statement missing
/// its terminator) is dropped without warning.
pub fn split_delimited(sql: &str) -> Vec<String> {
    sql.replace(['\r', '\n'], "")
        .split(STATEMENT_DELIMITER)
        .filter(|fragment| fragment.contains(';'))
        .map(|fragment| fragment.trim().to_string())
        .collect()
}

fn push_trimmed(statements: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        statements.push(text.to_string());
    }
}

/// Maps tokenizer locations (1-based line and character column) to byte offsets
pub(crate) struct SourceIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> SourceIndex<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    pub(crate) fn offset(&self, location: Location) -> usize {
        let line = (location.line as usize).saturating_sub(1);
        let Some(&line_start) = self.line_starts.get(line) else {
            return self.source.len();
        };
        let column = (location.column as usize).saturating_sub(1);
        self.source[line_start..]
            .char_indices()
            .nth(column)
            .map(|(i, _)| line_start + i)
            .unwrap_or(self.source.len())
    }
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;

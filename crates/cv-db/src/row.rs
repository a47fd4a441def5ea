//! Generic result rows

/// One result row, every value rendered as text.
///
/// Backends render values the way the MySQL text protocol does: integers and
/// booleans as decimal digits, timestamps as `YYYY-MM-DD HH:MM:SS`, NULL as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Option<String>>,
}

impl Row {
    /// Build a row from parallel column and value lists
    pub fn new(columns: Vec<String>, values: Vec<Option<String>>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Column names in select order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// True if the row has a column with this name (case-insensitive)
    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Value of a column by name; `None` for NULL or an unknown column
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name)
            .and_then(|i| self.values.get(i))
            .and_then(|v| v.as_deref())
    }

    /// Value of a column by position; `None` for NULL or out of range
    pub fn get_index(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.eq_ignore_ascii_case(name))
    }
}

//! Rectangular table cells for table blocks.

use serde::{Deserialize, Serialize};

/// Cell grid of a table block.
///
/// Every row has the same number of cells, and there is always at least one
/// row and one column. Row and column operations apply to all rows at once,
/// so the shape can never become ragged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct TableData {
    rows: Vec<Vec<String>>,
}

/// A shape or cell change on a [`TableData`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOp {
    AddRow,
    AddColumn,
    DeleteRow(usize),
    DeleteColumn(usize),
    UpdateCell {
        row: usize,
        col: usize,
        value: String,
    },
}

impl TableData {
    /// An empty table with the given shape (each dimension at least 1).
    pub fn empty(rows: usize, cols: usize) -> Self {
        let cols = cols.max(1);
        Self {
            rows: vec![vec![String::new(); cols]; rows.max(1)],
        }
    }

    /// Build a table from possibly ragged rows, padding short rows with
    /// empty cells. No rows at all gives the default 2x2 table.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if rows.is_empty() || width == 0 {
            return Self::default();
        }
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Append an empty row.
    pub fn add_row(&mut self) {
        let width = self.column_count();
        self.rows.push(vec![String::new(); width]);
    }

    /// Append an empty cell to every row.
    pub fn add_column(&mut self) {
        for row in &mut self.rows {
            row.push(String::new());
        }
    }

    /// Remove a row. Returns `false` when it is the last row or out of range.
    pub fn delete_row(&mut self, index: usize) -> bool {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    /// Remove a column from every row. Returns `false` when it is the last
    /// column or out of range.
    pub fn delete_column(&mut self, index: usize) -> bool {
        if self.column_count() <= 1 || index >= self.column_count() {
            return false;
        }
        for row in &mut self.rows {
            row.remove(index);
        }
        true
    }

    /// Replace one cell. Returns `false` when the position is out of range.
    pub fn update_cell(&mut self, row: usize, col: usize, value: impl Into<String>) -> bool {
        match self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = value.into();
                true
            }
            None => false,
        }
    }

    /// Apply an operation, returning whether the table changed.
    pub fn apply(&mut self, op: &TableOp) -> bool {
        match op {
            TableOp::AddRow => {
                self.add_row();
                true
            }
            TableOp::AddColumn => {
                self.add_column();
                true
            }
            TableOp::DeleteRow(index) => self.delete_row(*index),
            TableOp::DeleteColumn(index) => self.delete_column(*index),
            TableOp::UpdateCell { row, col, value } => self.update_cell(*row, *col, value.clone()),
        }
    }
}

impl Default for TableData {
    fn default() -> Self {
        Self::empty(2, 2)
    }
}

impl From<Vec<Vec<String>>> for TableData {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::from_rows(rows)
    }
}

impl From<TableData> for Vec<Vec<String>> {
    fn from(table: TableData) -> Self {
        table.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_rectangular(table: &TableData) -> bool {
        let width = table.column_count();
        table.rows().iter().all(|row| row.len() == width)
    }

    #[test]
    fn test_default_table_is_two_by_two() {
        let table = TableData::default();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_add_column_extends_every_row() {
        let mut table = TableData::default();
        table.add_column();
        assert!(table.rows().iter().all(|row| row.len() == 3));
    }

    #[test]
    fn test_add_row_matches_width() {
        let mut table = TableData::empty(1, 4);
        table.add_row();
        assert_eq!(table.row_count(), 2);
        assert!(is_rectangular(&table));
    }

    #[test]
    fn test_delete_row_keeps_at_least_one() {
        let mut table = TableData::default();
        assert!(table.delete_row(0));
        assert_eq!(table.row_count(), 1);
        assert!(!table.delete_row(0));
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_delete_column_keeps_at_least_one() {
        let mut table = TableData::default();
        assert!(table.delete_column(1));
        assert!(!table.delete_column(0));
        assert_eq!(table.column_count(), 1);
        assert!(is_rectangular(&table));
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let mut table = TableData::default();
        assert!(!table.delete_row(5));
        assert!(!table.delete_column(5));
        assert_eq!(table, TableData::default());
    }

    #[test]
    fn test_update_cell() {
        let mut table = TableData::default();
        assert!(table.update_cell(1, 0, "x"));
        assert_eq!(table.cell(1, 0), Some("x"));
        assert!(!table.update_cell(2, 0, "y"));
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let table = TableData::from_rows(vec![
            vec!["a".to_string()],
            vec!["b".to_string(), "c".to_string(), "d".to_string()],
        ]);
        assert!(is_rectangular(&table));
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.cell(0, 2), Some(""));
    }

    #[test]
    fn test_json_is_plain_nested_array() {
        let table = TableData::from_rows(vec![vec!["a".to_string(), "b".to_string()]]);
        assert_eq!(serde_json::to_string(&table).unwrap(), r#"[["a","b"]]"#);
        let back: TableData = serde_json::from_str(r#"[["a"],["b","c"]]"#).unwrap();
        assert_eq!(back.column_count(), 2);
    }
}

//! Document model - tables, header cells and the control panel
//!
//! A document is the host page: an ordered list of tables plus the markers of
//! container elements the page exposes. Widths are pixels in document space;
//! the first column of every table starts at x = 0.

use std::fmt;

/// Position of a column: table index within the document, ordinal within the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub table: usize,
    pub column: usize,
}

impl ColumnRef {
    pub fn new(table: usize, column: usize) -> Self {
        Self { table, column }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table {} column {}", self.table, self.column)
    }
}

/// A table cell with its measured intrinsic content width
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub text: String,
    pub content_width: u32,
}

impl Cell {
    pub fn new(text: impl Into<String>, content_width: u32) -> Self {
        Self {
            text: text.into(),
            content_width,
        }
    }
}

/// Header cell of a column
///
/// `width` plays the role of an inline style: `None` leaves the column to the
/// default layout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderCell {
    pub cell: Cell,
    pub width: Option<u32>,
}

impl HeaderCell {
    pub fn new(cell: Cell) -> Self {
        Self { cell, width: None }
    }

    pub fn text(&self) -> &str {
        &self.cell.text
    }
}

/// A table: header cells in fixed left-to-right order plus body rows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub id: String,
    pub caption: Option<String>,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(id: impl Into<String>, headers: Vec<Cell>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            id: id.into(),
            caption: None,
            headers: headers.into_iter().map(HeaderCell::new).collect(),
            rows,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Body cells sharing the ordinal position of the given column
    ///
    /// Rows too short to have a cell at that position are skipped.
    pub fn column_cells(&self, column: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().filter_map(move |row| row.get(column))
    }

    /// Widest intrinsic content in a column, header included
    pub fn widest_content(&self, column: usize) -> Option<u32> {
        let header = self.headers.get(column)?;
        let body = self
            .column_cells(column)
            .map(|c| c.content_width)
            .max()
            .unwrap_or(0);
        Some(header.cell.content_width.max(body))
    }

    /// Width the default layout gives a column without an explicit width
    pub fn natural_width(&self, column: usize, cell_padding: u32) -> Option<u32> {
        self.widest_content(column)
            .map(|w| w.saturating_add(cell_padding))
    }

    /// Rendered width: the explicit width if set, otherwise the natural width
    pub fn current_width(&self, column: usize, cell_padding: u32) -> Option<u32> {
        let header = self.headers.get(column)?;
        match header.width {
            Some(w) => Some(w),
            None => self.natural_width(column, cell_padding),
        }
    }

    /// Horizontal extent `(left, right)` of a column in document pixels
    pub fn column_span(&self, column: usize, cell_padding: u32) -> Option<(i32, i32)> {
        if column >= self.headers.len() {
            return None;
        }
        let mut left: i64 = 0;
        for idx in 0..column {
            left += i64::from(self.current_width(idx, cell_padding).unwrap_or(0));
        }
        let width = i64::from(self.current_width(column, cell_padding).unwrap_or(0));
        let clamp = |v: i64| v.min(i64::from(i32::MAX)) as i32;
        Some((clamp(left), clamp(left + width)))
    }

    /// Rows whose cell count does not match the header count
    pub fn mismatched_rows(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let expected = self.headers.len();
        self.rows
            .iter()
            .enumerate()
            .filter(move |(_, row)| row.len() != expected)
            .map(|(idx, row)| (idx, row.len()))
    }
}

/// A button of the injected control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlButton {
    AutoSizeAll,
    ResetColumns,
}

impl ControlButton {
    pub fn all() -> [ControlButton; 2] {
        [ControlButton::AutoSizeAll, ControlButton::ResetColumns]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ControlButton::AutoSizeAll => "Auto-size All Columns",
            ControlButton::ResetColumns => "Reset Columns",
        }
    }
}

/// Controls inserted into the page's designated container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPanel {
    /// Marker of the container the panel lives in
    pub container: String,
    pub buttons: Vec<ControlButton>,
}

/// The host page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub title: Option<String>,
    pub tables: Vec<Table>,
    /// Markers of container elements present in the page
    pub containers: Vec<String>,
    /// Control panel, present once injected
    pub control_panel: Option<ControlPanel>,
}

impl Document {
    #[cfg(test)]
    pub fn new(tables: Vec<Table>) -> Self {
        Self {
            tables,
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub fn with_container(mut self, marker: impl Into<String>) -> Self {
        self.containers.push(marker.into());
        self
    }

    pub fn has_container(&self, marker: &str) -> bool {
        self.containers.iter().any(|c| c == marker)
    }

    pub fn header(&self, column: ColumnRef) -> Option<&HeaderCell> {
        self.tables.get(column.table)?.headers.get(column.column)
    }

    pub fn header_mut(&mut self, column: ColumnRef) -> Option<&mut HeaderCell> {
        self.tables
            .get_mut(column.table)?
            .headers
            .get_mut(column.column)
    }

    /// Every header cell in document order
    pub fn columns(&self) -> Vec<ColumnRef> {
        self.tables
            .iter()
            .enumerate()
            .flat_map(|(t, table)| (0..table.column_count()).map(move |c| ColumnRef::new(t, c)))
            .collect()
    }

    /// Explicit widths of every header cell in document order
    #[cfg(test)]
    pub fn explicit_widths(&self) -> Vec<Option<u32>> {
        self.tables
            .iter()
            .flat_map(|t| t.headers.iter().map(|h| h.width))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_columns() -> Table {
        Table::new(
            "t",
            vec![Cell::new("ID", 20), Cell::new("Name", 40), Cell::new("Description", 90)],
            vec![
                vec![Cell::new("1", 8), Cell::new("Alice", 40), Cell::new("short", 50)],
                vec![Cell::new("2", 8), Cell::new("Bob", 24), Cell::new("a longer one", 300)],
            ],
        )
    }

    #[test]
    fn test_widest_content_includes_header() {
        let table = three_columns();
        assert_eq!(table.widest_content(0), Some(20));
        assert_eq!(table.widest_content(2), Some(300));
        assert_eq!(table.widest_content(3), None);
    }

    #[test]
    fn test_current_width_prefers_explicit_width() {
        let mut table = three_columns();
        assert_eq!(table.current_width(1, 30), Some(70));

        table.headers[1].width = Some(150);
        assert_eq!(table.current_width(1, 30), Some(150));
    }

    #[test]
    fn test_column_span_accumulates_widths() {
        let mut table = three_columns();
        table.headers[0].width = Some(100);
        table.headers[1].width = Some(150);

        assert_eq!(table.column_span(0, 30), Some((0, 100)));
        assert_eq!(table.column_span(1, 30), Some((100, 250)));
        assert_eq!(table.column_span(2, 30), Some((250, 580)));
        assert_eq!(table.column_span(3, 30), None);
    }

    #[test]
    fn test_column_cells_skips_short_rows() {
        let mut table = three_columns();
        table.rows.push(vec![Cell::new("3", 8)]);

        assert_eq!(table.column_cells(0).count(), 3);
        assert_eq!(table.column_cells(2).count(), 2);
        assert_eq!(table.mismatched_rows().collect::<Vec<_>>(), vec![(2, 1)]);
    }

    #[test]
    fn test_document_columns_in_order() {
        let doc = Document::new(vec![three_columns(), three_columns()]);
        let columns = doc.columns();

        assert_eq!(columns.len(), 6);
        assert_eq!(columns[0], ColumnRef::new(0, 0));
        assert_eq!(columns[5], ColumnRef::new(1, 2));
        assert!(doc.header(ColumnRef::new(2, 0)).is_none());
    }
}

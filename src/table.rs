//! Column-aligned output for detailed listings.
//!
//! Rows are buffered until [`Table::render`], so every column is sized from the
//! complete row set. Cells are right-aligned and padded with spaces to at least
//! [`MIN_CELL_WIDTH`]. The last cell of a row is written unpadded.

use std::io::{self, Write};

/// Narrowest a padded cell can be.
pub const MIN_CELL_WIDTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Row(Vec<String>),
    Text(String),
}

/// Buffered table of rows and free-standing text lines.
#[derive(Debug, Default)]
pub struct Table {
    lines: Vec<Line>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a row of cells.
    pub fn push_row(&mut self, cells: Vec<String>) {
        self.lines.push(Line::Row(cells));
    }

    /// Queue a line that takes no part in column sizing.
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.lines.push(Line::Text(text.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = Vec::new();
        for line in &self.lines {
            let Line::Row(cells) = line else { continue };
            let aligned = cells.len().saturating_sub(1);
            if widths.len() < aligned {
                widths.resize(aligned, MIN_CELL_WIDTH);
            }
            for (width, cell) in widths.iter_mut().zip(&cells[..aligned]) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    /// Write every queued line and empty the table.
    pub fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let widths = self.column_widths();
        for line in self.lines.drain(..) {
            match line {
                Line::Text(text) => writeln!(out, "{text}")?,
                Line::Row(cells) => {
                    let last = cells.len().saturating_sub(1);
                    for (i, cell) in cells.iter().enumerate() {
                        if i == last {
                            write!(out, "{cell}")?;
                        } else {
                            write!(out, "{cell:>width$}", width = widths[i])?;
                        }
                    }
                    writeln!(out)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(table: &mut Table) -> String {
        let mut out = Vec::new();
        table.render(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn columns_are_right_aligned_to_widest_cell() {
        let mut table = Table::new();
        table.push_row(row(&["alice ", " 7 ", "a"]));
        table.push_row(row(&["bob ", " 1536 ", "bb"]));
        assert_eq!(render(&mut table), "alice     7 a\n  bob  1536 bb\n");
    }

    #[test]
    fn narrow_columns_get_minimum_width() {
        let mut table = Table::new();
        table.push_row(row(&["a", "x"]));
        assert_eq!(render(&mut table), "  ax\n");
    }

    #[test]
    fn text_lines_pass_through_in_order() {
        let mut table = Table::new();
        table.push_row(row(&["a ", "one"]));
        table.push_text("");
        table.push_text("sub/:");
        table.push_row(row(&["long ", "two"]));
        assert_eq!(render(&mut table), "   a one\n\nsub/:\nlong two\n");
    }

    #[test]
    fn render_drains_the_table() {
        let mut table = Table::new();
        table.push_text("x");
        render(&mut table);
        assert!(table.is_empty());
    }
}

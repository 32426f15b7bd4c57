use crate::table::Table;
use std::io::{self, Write};

/// Output sink for one invocation. In detailed mode everything is buffered in a
/// [`Table`] so columns can be sized from the full row set.
pub(super) struct Output<W: Write> {
    out: W,
    table: Option<Table>,
    wrote_any: bool,
}

impl<W: Write> Output<W> {
    pub(super) fn new(out: W, long: bool) -> Self {
        Self {
            out,
            table: long.then(Table::new),
            wrote_any: false,
        }
    }

    pub(super) fn line(&mut self, text: &str) -> io::Result<()> {
        self.wrote_any = true;
        match &mut self.table {
            Some(table) => {
                table.push_text(text);
                Ok(())
            }
            None => writeln!(self.out, "{text}"),
        }
    }

    pub(super) fn row(&mut self, cells: Vec<String>) -> io::Result<()> {
        self.wrote_any = true;
        match &mut self.table {
            Some(table) => {
                table.push_row(cells);
                Ok(())
            }
            None => writeln!(self.out, "{}", cells.concat()),
        }
    }

    /// `<dir>/:` line introducing a directory's contents, separated from earlier
    /// output by a blank line.
    pub(super) fn header(&mut self, display: &str) -> io::Result<()> {
        if self.wrote_any {
            self.line("")?;
        }
        let name = if display.is_empty() {
            "."
        } else {
            display.trim_end_matches('/')
        };
        self.line(&format!("{name}/:"))
    }

    /// Render anything buffered and flush the writer.
    pub(super) fn finish(&mut self) -> io::Result<()> {
        if let Some(table) = self.table.as_mut().filter(|t| !t.is_empty()) {
            table.render(&mut self.out)?;
        }
        self.out.flush()
    }

    pub(super) fn into_inner(self) -> W {
        self.out
    }
}

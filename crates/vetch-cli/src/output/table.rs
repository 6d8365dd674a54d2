//! Borderless tables whose first column holds package keys.

use prettytable::{format, Cell, Row};
use std::fmt;

/// A findings table printed through [`super::OutputHandler::table`]
#[derive(Debug, Clone)]
pub struct Table {
    inner: prettytable::Table,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut inner = prettytable::Table::new();
        inner.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        inner.set_titles(Row::new(
            headers
                .into_iter()
                .map(|header| {
                    let header: String = header.into();
                    Cell::new(&header).style_spec("b")
                })
                .collect(),
        ));
        Self { inner }
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells = cells
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                let text: String = text.into();
                let cell = Cell::new(&text);
                if index == 0 {
                    cell.style_spec("Fc")
                } else {
                    cell
                }
            })
            .collect();
        self.inner.add_row(Row::new(cells));
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Print to stdout with cell styles applied
    pub fn print_styled(&self) {
        if self.inner.print_tty(true).is_err() {
            print!("{}", self.inner);
        }
    }
}

/// Plain rendering without styles
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

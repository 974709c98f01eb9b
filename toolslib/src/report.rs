//! A small column oriented text report.
//!
//! Rows are added as cells and column widths grow to fit the widest cell. When the
//! report is rendered each cell is aligned according to its column layout. Header
//! cells are always centered and fill cells repeat their text across the column.
use std::fmt::{Display, Formatter, Result as FmtResult};

/// The alignment of text within a column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// The description of a report column.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnLayout {
    /// The alignment of text cells.
    alignment: Alignment,
    /// The current column width.
    width: usize,
}
impl ColumnLayout {
    /// Create a column layout with an initial width of 0.
    ///
    /// # Arguments
    ///
    /// - `alignment` is how text cells will be positioned in the column.
    ///
    pub fn new(alignment: Alignment) -> Self {
        Self { alignment, width: 0 }
    }
    /// Get the column width.
    pub fn width(&self) -> usize {
        self.width
    }
    /// Align text within the column width.
    fn align(&self, text: &str, alignment: Alignment) -> String {
        let width = self.width;
        match alignment {
            Alignment::Left => format!("{text:<width$}"),
            Alignment::Center => format!("{text:^width$}"),
            Alignment::Right => format!("{text:>width$}"),
        }
    }
}

/// The data at a row's column.
#[derive(Clone, Debug, PartialEq)]
pub enum SheetCell {
    /// Column title text which will be centered.
    Header(String),
    /// Column text that follows the column alignment.
    Text(String),
    /// Text that will be repeated to the column width, it does not affect the width.
    Fill(String),
}
impl SheetCell {
    /// The number of characters the cell needs.
    fn len(&self) -> usize {
        match self {
            Self::Header(text) | Self::Text(text) => text.chars().count(),
            Self::Fill(_) => 0,
        }
    }
    /// Render the cell for a column.
    fn render(&self, layout: &ColumnLayout) -> String {
        match self {
            Self::Header(text) => layout.align(text, Alignment::Center),
            Self::Text(text) => layout.align(text, layout.alignment),
            Self::Fill(text) if text.is_empty() => layout.align("", Alignment::Left),
            Self::Fill(text) => text.chars().cycle().take(layout.width).collect(),
        }
    }
}

/// A text report made up of rows of cells.
#[derive(Debug)]
pub struct ReportSheet {
    /// The report column layouts.
    layouts: Vec<ColumnLayout>,
    /// The report rows.
    rows: Vec<Vec<SheetCell>>,
}
impl ReportSheet {
    /// Create a new report.
    ///
    /// # Arguments
    ///
    /// - `layouts` describes the report columns.
    ///
    pub fn new(layouts: Vec<ColumnLayout>) -> Self {
        Self { layouts, rows: vec![] }
    }
    /// Add a row to the report. Cells past the number of columns are ignored.
    ///
    /// # Arguments
    ///
    /// - `row` is the row cell data.
    ///
    pub fn add_row(&mut self, row: Vec<SheetCell>) {
        for (layout, cell) in self.layouts.iter_mut().zip(row.iter()) {
            layout.width = std::cmp::max(layout.width, cell.len());
        }
        self.rows.push(row);
    }
    /// Adds a separator row under the report headers.
    pub fn add_separator(&mut self) {
        let separator = (0..self.columns()).map(|_| SheetCell::Fill("-".to_string())).collect();
        self.rows.push(separator);
    }
    /// The number of report columns.
    pub fn columns(&self) -> usize {
        self.layouts.len()
    }
    /// The report rows as text.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|row| {
            self.layouts
                .iter()
                .zip(row.iter())
                .map(|(layout, cell)| cell.render(layout))
                .collect::<Vec<String>>()
                .join(" ")
                .trim_end()
                .to_string()
        })
    }
}
impl Display for ReportSheet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.rows().collect::<Vec<String>>().join("\n"))
    }
}

/// Create a column layout, `<` is left, `^` is centered, and `>` is right aligned.
#[macro_export]
macro_rules! layout {
    (<) => {
        $crate::report::ColumnLayout::new($crate::report::Alignment::Left)
    };
    (^) => {
        $crate::report::ColumnLayout::new($crate::report::Alignment::Center)
    };
    (>) => {
        $crate::report::ColumnLayout::new($crate::report::Alignment::Right)
    };
}

/// Create a header cell.
#[macro_export]
macro_rules! header {
    ($text:expr) => {
        $crate::report::SheetCell::Header($text.to_string())
    };
}

/// Create a text cell.
#[macro_export]
macro_rules! text {
    ($text:expr) => {
        $crate::report::SheetCell::Text($text.to_string())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macros() {
        assert_eq!(layout!(<), ColumnLayout { alignment: Alignment::Left, width: 0 });
        assert_eq!(layout!(^), ColumnLayout { alignment: Alignment::Center, width: 0 });
        assert_eq!(layout!(>), ColumnLayout { alignment: Alignment::Right, width: 0 });
        assert_eq!(header!("Date"), SheetCell::Header("Date".to_string()));
        assert_eq!(text!(12.5), SheetCell::Text("12.5".to_string()));
    }

    #[test]
    fn widths() {
        let mut report = ReportSheet::new(vec![layout!(<), layout!(>)]);
        report.add_row(vec![header!("Date"), header!("Temp")]);
        report.add_row(vec![text!("2024-06-01"), text!("12.0")]);
        report.add_row(vec![text!("x"), text!("y"), text!("ignored")]);
        assert_eq!(report.columns(), 2);
        assert_eq!(report.layouts[0].width(), 10);
        assert_eq!(report.layouts[1].width(), 4);
    }

    #[test]
    fn render() {
        let mut report = ReportSheet::new(vec![layout!(<), layout!(>), layout!(^)]);
        report.add_row(vec![header!("Date"), header!("Temp"), header!("Sky")]);
        report.add_separator();
        report.add_row(vec![text!("2024-06-01"), text!("9.5"), text!("clear sky")]);
        report.add_row(vec![text!("2024-06-02"), text!("12.0"), text!("rain")]);
        let rows = report.rows().collect::<Vec<_>>();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], "   Date    Temp    Sky");
        assert_eq!(rows[1], "---------- ---- ---------");
        assert_eq!(rows[2], "2024-06-01  9.5 clear sky");
        assert_eq!(rows[3], "2024-06-02 12.0   rain");
        assert_eq!(report.to_string(), rows.join("\n"));
    }
}

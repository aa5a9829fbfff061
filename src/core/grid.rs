//! Page grid content: rows of main pages, each with horizontal cards.
//!
//! Column 0 of every row is the row's main page; columns 1.. are its cards.
//! Rows may have different card counts; the horizontal axis spans the widest
//! row and shorter rows simply have no page in the trailing columns.
//!
//! A grid can be loaded from a layout file with one row per line:
//!
//! ```text
//! # comment
//! Dashboard = Card A, Card B, Card C
//! Launch
//! ```

use thiserror::Error;

/// Layout parsing errors. Line numbers are 1-based.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("layout defines no rows")]
    NoRows,
    #[error("line {line}: row name is empty")]
    EmptyRowName { line: usize },
    #[error("line {line}: card {position} has an empty name")]
    EmptyCardName { line: usize, position: usize },
}

/// One vertical section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub name: String,
    pub cards: Vec<String>,
}

impl Row {
    pub fn new(name: impl Into<String>, cards: Vec<String>) -> Self {
        Self {
            name: name.into(),
            cards,
        }
    }

    /// Number of columns this row occupies (main page + cards).
    pub fn width(&self) -> usize {
        1 + self.cards.len()
    }
}

/// What occupies a `(row, column)` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    Main { row: &'a str },
    Card { row: &'a str, card: &'a str },
    /// Past the end of a shorter row.
    Vacant { row: &'a str },
}

impl Cell<'_> {
    pub fn title(&self) -> String {
        match self {
            Cell::Main { row } => (*row).to_string(),
            Cell::Card { row, card } => format!("{row} - {card}"),
            Cell::Vacant { row } => format!("{row} - (no card)"),
        }
    }
}

/// Ordered rows; never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    pub fn new(rows: Vec<Row>) -> Result<Self, GridError> {
        if rows.is_empty() {
            return Err(GridError::NoRows);
        }
        Ok(Self { rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Horizontal extent of the grid (widest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Row::width).max().unwrap_or(1)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<Cell<'_>> {
        let r = self.rows.get(row)?;
        if column >= self.column_count() {
            return None;
        }
        Some(match column {
            0 => Cell::Main { row: &r.name },
            c => match r.cards.get(c - 1) {
                Some(card) => Cell::Card {
                    row: &r.name,
                    card,
                },
                None => Cell::Vacant { row: &r.name },
            },
        })
    }

    /// Parse a layout file.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut rows = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (name, cards) = match line.split_once('=') {
                Some((name, rest)) => (name.trim(), Some(rest)),
                None => (line, None),
            };
            if name.is_empty() {
                return Err(GridError::EmptyRowName { line: line_no });
            }

            let mut parsed = Vec::new();
            if let Some(rest) = cards.filter(|r| !r.trim().is_empty()) {
                for (pos, card) in rest.split(',').enumerate() {
                    let card = card.trim().trim_matches('"');
                    if card.is_empty() {
                        return Err(GridError::EmptyCardName {
                            line: line_no,
                            position: pos + 1,
                        });
                    }
                    parsed.push(card.to_string());
                }
            }
            rows.push(Row::new(name, parsed));
        }
        Self::new(rows)
    }
}

impl Default for Grid {
    /// Seven sections with five cards each.
    fn default() -> Self {
        const SECTIONS: &[&str] = &["Dashboard", "Launch", "Swap", "Lend", "Borrow", "Mint", "Earn"];
        const CARDS: &[&str] = &["Card A", "Card B", "Card C", "Card D", "Card E"];
        let rows = SECTIONS
            .iter()
            .map(|name| Row::new(*name, CARDS.iter().map(|c| c.to_string()).collect()))
            .collect();
        Self { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_shape() {
        let grid = Grid::default();
        assert_eq!(grid.row_count(), 7);
        assert_eq!(grid.column_count(), 6);
        assert_eq!(grid.cell(0, 0).unwrap().title(), "Dashboard");
        assert_eq!(grid.cell(2, 5).unwrap().title(), "Swap - Card E");
        assert!(grid.cell(7, 0).is_none());
        assert!(grid.cell(0, 6).is_none());
    }

    #[test]
    fn parses_layout_with_comments_and_ragged_rows() {
        let text = "\
# sections
Home = Feed, \"Inbox\"

Settings
Profile = Avatar
";
        let grid = Grid::parse(text).unwrap();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.rows[0].cards, vec!["Feed", "Inbox"]);
        assert!(grid.rows[1].cards.is_empty());
        assert_eq!(grid.cell(1, 2), Some(Cell::Vacant { row: "Settings" }));
        assert_eq!(grid.cell(2, 1).unwrap().title(), "Profile - Avatar");
    }

    #[test]
    fn trailing_equals_means_no_cards() {
        let grid = Grid::parse("Solo =").unwrap();
        assert_eq!(grid.column_count(), 1);
    }

    #[test]
    fn rejects_empty_layout() {
        assert_eq!(Grid::parse("# nothing\n\n"), Err(GridError::NoRows));
        assert_eq!(Grid::new(Vec::new()), Err(GridError::NoRows));
    }

    #[test]
    fn reports_line_numbers() {
        assert_eq!(
            Grid::parse("A = x\n = y"),
            Err(GridError::EmptyRowName { line: 2 })
        );
        assert_eq!(
            Grid::parse("A = x,,y"),
            Err(GridError::EmptyCardName { line: 1, position: 2 })
        );
    }

    #[test]
    fn error_messages_are_readable() {
        let err = GridError::EmptyCardName { line: 3, position: 1 };
        assert_eq!(err.to_string(), "line 3: card 1 has an empty name");
    }
}

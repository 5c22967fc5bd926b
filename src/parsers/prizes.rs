/// Cells kept per prize line: item, quantity, note
pub const PRIZE_COLUMNS: usize = 3;

/// One row of the prize/budget table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrizeRow {
    pub item: String,
    pub quantity: String,
    pub note: String,
}

/// True when the content should render as a prize table
pub fn has_prize_rows(content: &str) -> bool {
    content.contains('|')
}

/// Parses prize text into rows.
///
/// Only lines containing `|` produce rows; other lines are dropped. Cells
/// past the third are ignored and missing trailing cells are empty.
pub fn parse_prizes(content: &str) -> Vec<PrizeRow> {
    content
        .lines()
        .filter(|line| line.contains('|'))
        .map(|line| {
            let mut cells = line
                .split('|')
                .take(PRIZE_COLUMNS)
                .map(|cell| cell.trim().to_string());
            PrizeRow {
                item: cells.next().unwrap_or_default(),
                quantity: cells.next().unwrap_or_default(),
                note: cells.next().unwrap_or_default(),
            }
        })
        .collect()
}

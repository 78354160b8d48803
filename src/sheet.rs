use serde::{Deserialize, Serialize};

/// One data row of the remote sheet
///
/// `row_index` is the 1-based position of the row in the remote store,
/// counting the header row, so the first data row carries index 2. It is
/// the only identity key a row has and stays stable across reloads as
/// long as nothing is inserted or deleted upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRow {
    pub row_index: u32,
    pub data: Vec<String>,
}

impl SheetRow {
    /// Cell value at a column position, empty when the row is shorter
    pub fn cell(&self, col: usize) -> &str {
        self.data.get(col).map(String::as_str).unwrap_or("")
    }
}

/// A full snapshot of the remote sheet: header plus identified rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetData {
    pub header: Vec<String>,
    pub rows: Vec<SheetRow>,
}

impl SheetData {
    /// Build a snapshot from parsed lines
    ///
    /// The first line becomes the header; every later line becomes one
    /// row, numbered from 2 upward in input order. Empty input produces
    /// an empty snapshot.
    pub fn from_lines(lines: Vec<Vec<String>>) -> Self {
        let mut lines = lines.into_iter();
        let Some(header) = lines.next() else {
            return Self::default();
        };

        let rows = lines
            .enumerate()
            .map(|(i, data)| SheetRow {
                row_index: i as u32 + 2,
                data,
            })
            .collect();

        SheetData { header, rows }
    }

    pub fn row(&self, row_index: u32) -> Option<&SheetRow> {
        self.rows.iter().find(|r| r.row_index == row_index)
    }
}

/// Display label for a column: the header name, or `Column A`, `Column B`
/// and so on when the header cell is empty or missing
pub fn column_label(header: &[String], index: usize) -> String {
    match header.get(index) {
        Some(name) if !name.is_empty() => name.clone(),
        _ => format!("Column {}", col_to_letter(index + 1)),
    }
}

/// Convert a 1-based column number to its letter run (A=1, Z=26, AA=27)
pub fn col_to_letter(col: usize) -> String {
    let mut col = col;
    let mut result = String::new();
    while col > 0 {
        col -= 1;
        result.push(((col % 26) as u8 + b'A') as char);
        col /= 26;
    }
    result.chars().rev().collect()
}

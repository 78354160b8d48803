use std::borrow::Cow;

use crate::sheet::SheetRow;

/// Position of the column holding the owning user's email
pub const IDENTITY_COLUMN: usize = 0;

/// How many characters of a sensitive value stay visible in the grid
pub const REDACTION_PREFIX_LEN: usize = 10;

const ELLIPSIS: char = '\u{2026}';

// Header-name fragments that mark a column as sensitive
const SENSITIVE_MARKERS: [&str; 2] = ["iglink", "apikey"];

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Whether a row belongs to the signed-in user
///
/// The identity column is compared case-insensitively with surrounding
/// whitespace trimmed on both sides.
pub fn owns_row(row: &SheetRow, user_email: &str) -> bool {
    normalize_email(row.cell(IDENTITY_COLUMN)) == normalize_email(user_email)
}

/// The rows the signed-in user is allowed to see
///
/// Rows owned by anyone else are excluded entirely, not greyed out.
pub fn visible_rows<'a>(rows: &'a [SheetRow], user_email: &str) -> Vec<&'a SheetRow> {
    rows.iter().filter(|row| owns_row(row, user_email)).collect()
}

/// Whether a column's content should be shortened for at-a-glance display
pub fn is_sensitive_column(header_name: &str) -> bool {
    let lower = header_name.to_lowercase();
    SENSITIVE_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// The display form of a cell value when it is not under edit
///
/// Values in sensitive columns longer than [`REDACTION_PREFIX_LEN`]
/// characters are shortened to that prefix plus an ellipsis; everything
/// else passes through unchanged. The raw value stays on the row, so a
/// caller can still offer it in full (a tooltip, the edit widget).
pub fn display_value<'a>(header_name: &str, value: &'a str) -> Cow<'a, str> {
    if is_sensitive_column(header_name) && value.chars().count() > REDACTION_PREFIX_LEN {
        let mut shown: String = value.chars().take(REDACTION_PREFIX_LEN).collect();
        shown.push(ELLIPSIS);
        Cow::Owned(shown)
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: u32, cells: &[&str]) -> SheetRow {
        SheetRow {
            row_index: index,
            data: cells.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn ownership_is_case_insensitive_and_trimmed() {
        let r = row(2, &["  Alice@Example.COM ", "x"]);
        assert!(owns_row(&r, "alice@example.com"));
        assert!(owns_row(&r, " ALICE@EXAMPLE.COM"));
        assert!(!owns_row(&r, "bob@example.com"));
    }

    #[test]
    fn rows_of_other_users_are_excluded() {
        let rows = vec![
            row(2, &["a@x.io", "mine"]),
            row(3, &["b@x.io", "theirs"]),
            row(4, &["a@x.io", "also mine"]),
        ];
        let visible = visible_rows(&rows, "a@x.io");
        let indices: Vec<u32> = visible.iter().map(|r| r.row_index).collect();
        assert_eq!(indices, vec![2, 4]);
        assert!(visible_rows(&rows, "nobody@x.io").is_empty());
    }

    #[test]
    fn rows_without_an_identity_cell_are_never_visible() {
        let rows = vec![row(2, &[])];
        assert!(visible_rows(&rows, "a@x.io").is_empty());
    }

    #[test]
    fn full_header_and_data_round_trip_visibility() {
        // From raw CSV text through the parser and row model to the policy
        let text = "email,name,apikey\n\
                    e@x.io,One,k1\n\
                    e@x.io,Two,k2\n\
                    e@x.io,Three,k3\n";
        let data = crate::sheet::SheetData::from_lines(crate::parser::parse_csv(text));

        assert_eq!(visible_rows(&data.rows, "e@x.io").len(), 3);
        assert_eq!(visible_rows(&data.rows, "other@x.io").len(), 0);
    }

    #[test]
    fn sensitive_markers_match_as_substrings() {
        assert!(is_sensitive_column("ApiKey"));
        assert!(is_sensitive_column("MyApiKeys"));
        assert!(is_sensitive_column("IgLink"));
        assert!(is_sensitive_column("profile iglink url"));
        assert!(!is_sensitive_column("API_KEY"));
        assert!(!is_sensitive_column("Notes"));
        assert!(!is_sensitive_column(""));
    }

    #[test]
    fn long_sensitive_values_are_shortened() {
        let shown = display_value("ApiKey", "abcdefghijklmno");
        assert_eq!(shown, "abcdefghij\u{2026}");
    }

    #[test]
    fn plain_columns_are_never_shortened() {
        let value = "abcdefghijklmno";
        assert_eq!(display_value("Notes", value), value);
    }

    #[test]
    fn short_sensitive_values_pass_through() {
        assert_eq!(display_value("ApiKey", "abcdefghij"), "abcdefghij");
        assert_eq!(display_value("IgLink", ""), "");
    }

    #[test]
    fn shortening_counts_characters_not_bytes() {
        let value = "ééééééééééé";
        assert_eq!(value.chars().count(), 11);
        let shown = display_value("ApiKey", value);
        assert_eq!(shown.chars().count(), REDACTION_PREFIX_LEN + 1);
    }
}

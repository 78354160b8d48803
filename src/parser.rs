use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LINE_BREAK: Regex = Regex::new(r"\r?\n").unwrap();
}

/// Parse delimited text into rows of fields
///
/// This function converts the raw CSV body of a sheet export into a
/// sequence of string rows. Fields are separated by commas unless inside
/// a quoted span, and a doubled quote inside a quoted span stands for a
/// literal quote character. Fully blank lines are dropped and never
/// produce an empty row.
///
/// # Arguments
/// * `text` - The raw CSV text to parse
///
/// # Returns
/// * `Vec<Vec<String>>` - One vector of field values per non-blank line
///
/// # Examples
/// ```
/// use sheetsync::parser::parse_csv;
///
/// let rows = parse_csv("name,note\nalice,\"hi, there\"\n");
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1][1], "hi, there");
/// ```
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    for line in LINE_BREAK.split(text) {
        // Blank lines are detected on the raw line, before quote handling
        if line.trim().is_empty() {
            continue;
        }
        rows.push(parse_csv_row(line));
    }

    rows
}

// Split a single line into fields, tracking quoted spans.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    // Doubled quote inside a quoted span is a literal quote
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => {
                current.push(c);
            }
        }
    }

    // The last field is flushed unconditionally, even when a quoted span
    // was left open at end of line
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(parse_csv("").is_empty());
    }

    #[test]
    fn blank_lines_are_dropped() {
        let rows = parse_csv("a,b\n\n   \nc,d\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn row_count_matches_non_blank_lines() {
        let rows = parse_csv("h1,h2\r\nr1,x\r\nr2,y\r\n\r\n");
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let rows = parse_csv("a,b\r\nc,d");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn comma_inside_quotes_does_not_split() {
        let rows = parse_csv("\"a,b\",c");
        assert_eq!(rows, vec![vec!["a,b", "c"]]);
    }

    #[test]
    fn doubled_quote_is_a_literal_quote() {
        let rows = parse_csv("\"a\"\"b\"");
        assert_eq!(rows, vec![vec!["a\"b"]]);
    }

    #[test]
    fn quoted_empty_field_is_empty_string() {
        let rows = parse_csv("x,\"\",z");
        assert_eq!(rows, vec![vec!["x", "", "z"]]);
    }

    #[test]
    fn quote_characters_are_not_retained() {
        let rows = parse_csv("\"plain\",other");
        assert_eq!(rows, vec![vec!["plain", "other"]]);
    }

    #[test]
    fn unmatched_trailing_quote_resolves_at_line_end() {
        let rows = parse_csv("a,\"bc");
        assert_eq!(rows, vec![vec!["a", "bc"]]);
    }

    #[test]
    fn trailing_comma_flushes_an_empty_final_field() {
        let rows = parse_csv("a,b,");
        assert_eq!(rows, vec![vec!["a", "b", ""]]);
    }

    #[test]
    fn short_and_long_rows_are_kept_as_is() {
        let rows = parse_csv("a,b,c\nonly-one\nd,e");
        assert_eq!(rows[1], vec!["only-one"]);
        assert_eq!(rows[2], vec!["d", "e"]);
    }
}

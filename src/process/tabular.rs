// src/process/tabular.rs
use std::mem::take;

/// One parsed line of the sheet export. Rows may be ragged.
pub type RawRow = Vec<String>;

/// Parse a published-sheet CSV export.
pub fn parse_csv(text: &str) -> Vec<RawRow> {
    parse_rows(text, ',')
}

/// Single-pass delimited-text parser.
///
/// - `sep` and `\n` inside a quoted field are literal; `""` inside quotes is one `"`.
/// - `\r` outside quotes is dropped, so `\r\n` and `\n` both end a row.
/// - An unterminated final field is still emitted.
/// - A trailing row holding a single blank cell (terminal newline) is dropped.
pub fn parse_rows(text: &str, sep: char) -> Vec<RawRow> {
    let mut rows = Vec::new();
    let mut row: RawRow = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            c if c == sep => row.push(take(&mut field)),
            '\n' => {
                row.push(take(&mut field));
                rows.push(take(&mut row));
            }
            '\r' => {}
            _ => field.push(ch),
        }
    }

    row.push(field);
    if row.len() > 1 || !row[0].trim().is_empty() {
        rows.push(row);
    }

    rows
}

//! Delimited record parsing for the OpenFlights-style `.dat` files.
//!
//! Fields are separated by commas. A double quote toggles quoted mode, in
//! which commas are literal and a doubled quote yields one literal quote.
//! A quote that never closes is not an error: the rest of the line belongs
//! to the open field.

use std::io::BufRead;

/// One parsed line of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number within the source.
    pub line: usize,
    pub fields: Vec<String>,
}

impl Record {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Field at `index`, if the record is long enough.
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Split a line into its field values.
pub fn parse_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if quoted {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    quoted = false;
                }
            } else {
                current.push(ch);
            }
            continue;
        }

        match ch {
            ',' => fields.push(std::mem::take(&mut current)),
            '"' => quoted = true,
            _ => current.push(ch),
        }
    }

    fields.push(current);
    fields
}

/// Read every non-blank line from `reader` as a [`Record`].
pub fn read_records<R: BufRead>(reader: R) -> std::io::Result<Vec<Record>> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.trim().is_empty() {
            continue;
        }
        records.push(Record::new(index + 1, parse_record(line)));
    }
    Ok(records)
}

// src/services/csv.rs
//! Minimal delimited-text writer used by the product export.

/// When a field gets wrapped in the enclosure character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// Only fields containing the delimiter, a quote, CR or LF.
    Necessary,
    /// Also fields containing a space, a tab or a backslash.
    Whitespace,
}

pub struct CsvWriter {
    delimiter: char,
    style: QuoteStyle,
    buf: String,
}

impl CsvWriter {
    const ENCLOSURE: char = '"';

    pub fn new(delimiter: char, style: QuoteStyle) -> Self {
        Self { delimiter, style, buf: String::new() }
    }

    pub fn insert_row<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                self.buf.push(self.delimiter);
            }
            self.push_field(field.as_ref());
        }
        self.buf.push('\n');
    }

    fn needs_enclosure(&self, field: &str) -> bool {
        field.chars().any(|c| {
            c == self.delimiter
                || c == Self::ENCLOSURE
                || c == '\n'
                || c == '\r'
                || (self.style == QuoteStyle::Whitespace && matches!(c, ' ' | '\t' | '\\'))
        })
    }

    fn push_field(&mut self, field: &str) {
        if !self.needs_enclosure(field) {
            self.buf.push_str(field);
            return;
        }
        self.buf.push(Self::ENCLOSURE);
        for c in field.chars() {
            if c == Self::ENCLOSURE {
                self.buf.push(Self::ENCLOSURE);
            }
            self.buf.push(c);
        }
        self.buf.push(Self::ENCLOSURE);
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

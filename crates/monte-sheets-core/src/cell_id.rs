//! Cell id parsing and formatting
//!
//! A [`CellId`] names a cell by column letters and a 1-based row number
//! ("A1", "B3", "AA100"). Internally it is a 0-based (row, column) pair;
//! `parse` and `Display` are exact inverses.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A cell id (e.g. "A1", "B2")
///
/// Row and column are 0-based internally; the display form uses column
/// letters (A, B, ..., Z, AA, ...) and a 1-based row number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ...)
    pub col: u16,
}

impl CellId {
    /// Create a new cell id from 0-based row and column indices
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse a cell id from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use monte_sheets_core::CellId;
    ///
    /// let id = CellId::parse("A1").unwrap();
    /// assert_eq!(id.row, 0);
    /// assert_eq!(id.col, 0);
    ///
    /// let id = CellId::parse("C12").unwrap();
    /// assert_eq!(id.row, 11);
    /// assert_eq!(id.col, 2);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidCellId("empty id".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        // Column letters
        while pos < bytes.len() && bytes[pos].is_ascii_uppercase() {
            pos += 1;
        }
        if pos == 0 {
            return Err(Error::InvalidCellId(format!(
                "no column letters in '{}'",
                s
            )));
        }
        let col = Self::letters_to_column(&s[..pos])?;

        // Row number
        let row_str = &s[pos..];
        if row_str.is_empty() || !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidCellId(format!("no row number in '{}'", s)));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidCellId(format!("invalid row number in '{}'", s)))?;

        // Display rows are 1-based, internal rows 0-based
        if row == 0 {
            return Err(Error::InvalidCellId(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self::new(row - 1, col))
    }

    /// Convert column letters to a column index (A = 0, Z = 25, AA = 26)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        let mut col: u32 = 0;
        for b in letters.bytes() {
            if !b.is_ascii_uppercase() {
                return Err(Error::InvalidCellId(format!(
                    "invalid column letters '{}'",
                    letters
                )));
            }
            col = col
                .checked_mul(26)
                .and_then(|c| c.checked_add((b - b'A') as u32 + 1))
                .ok_or_else(|| Error::InvalidCellId(format!("column '{}' too large", letters)))?;
        }
        let col = col - 1;
        u16::try_from(col)
            .map_err(|_| Error::InvalidCellId(format!("column '{}' too large", letters)))
    }

    /// Convert a column index to letters (0 = A, 25 = Z, 26 = AA)
    pub fn column_to_letters(col: u16) -> String {
        let mut result = String::new();
        let mut n = col as u32 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

impl FromStr for CellId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellId::column_to_letters(self.col), self.row + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple() {
        let id = CellId::parse("A1").unwrap();
        assert_eq!(id, CellId::new(0, 0));

        let id = CellId::parse("B3").unwrap();
        assert_eq!(id, CellId::new(2, 1));

        let id = CellId::parse("Z100").unwrap();
        assert_eq!(id, CellId::new(99, 25));
    }

    #[test]
    fn test_parse_multi_letter_columns() {
        let id = CellId::parse("AA1").unwrap();
        assert_eq!(id.col, 26);

        let id = CellId::parse("AB2").unwrap();
        assert_eq!(id.col, 27);
    }

    #[test]
    fn test_display_roundtrip() {
        for s in ["A1", "B2", "Z99", "AA100", "AZ1"] {
            let id = CellId::parse(s).unwrap();
            assert_eq!(id.to_string(), s);
        }
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(CellId::parse("").is_err());
        assert!(CellId::parse("1A").is_err());
        assert!(CellId::parse("A").is_err());
        assert!(CellId::parse("11").is_err());
        assert!(CellId::parse("A0").is_err());
        assert!(CellId::parse("a1").is_err());
        assert!(CellId::parse("A1B").is_err());
    }

    #[test]
    fn test_parse_overflow_is_an_error() {
        let huge = format!("{}1", "Z".repeat(40));
        assert!(CellId::parse(&huge).is_err());
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(CellId::column_to_letters(0), "A");
        assert_eq!(CellId::column_to_letters(25), "Z");
        assert_eq!(CellId::column_to_letters(26), "AA");
        assert_eq!(CellId::letters_to_column("A").unwrap(), 0);
        assert_eq!(CellId::letters_to_column("AA").unwrap(), 26);
    }
}

use std::fmt;

use crate::domain::Structure;

/// Line-per-record rendering of a [`Structure`].
///
/// Returned by [`Structure::listing`]. Each record is written as
/// `<index>) <identifier> <code> <day> <month> <year>`, numbered from 1 across
/// the whole structure, followed by a blank line. A structure with no records
/// additionally gets an `Empty` line.
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    structure: &'a Structure,
}

impl Structure {
    /// Returns a displayable listing of every record.
    ///
    /// # Examples
    ///
    /// ```
    /// use nestrec::Structure;
    ///
    /// assert_eq!(Structure::new().listing().to_string(), "\nEmpty\n");
    /// ```
    #[must_use]
    pub const fn listing(&self) -> Listing<'_> {
        Listing { structure: self }
    }
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut count = 0;
        for (index, record) in self.structure.records().enumerate() {
            writeln!(f, "{}) {record}", index + 1)?;
            count += 1;
        }
        writeln!(f)?;
        if count == 0 {
            writeln!(f, "Empty")?;
        }
        Ok(())
    }
}

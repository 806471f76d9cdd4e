use std::io::Read;
use std::path::Path;

use crate::library::index::{guide_from_fields, LibraryError, LibraryIndex};

/// Parse a guide library file: comma-separated `name,sequence,gene` with no header row
///
/// # Errors
///
/// Returns `LibraryError::Io` if the file cannot be opened, or any error from
/// [`parse_library_reader`].
pub fn parse_library_file(path: &Path) -> Result<LibraryIndex, LibraryError> {
    let file = std::fs::File::open(path)?;
    parse_library_reader(file)
}

/// Parse library text
///
/// # Errors
///
/// See [`parse_library_reader`].
pub fn parse_library_text(text: &str) -> Result<LibraryIndex, LibraryError> {
    parse_library_reader(text.as_bytes())
}

/// Parse a guide library from any reader.
///
/// Fields are split on every comma; quotes have no special meaning, so a quoted comma
/// still separates fields. Blank and whitespace-only lines are skipped and whitespace
/// around fields is trimmed. Line endings may be `\n` or `\r\n`.
///
/// # Errors
///
/// Returns `LibraryError::Malformed` (with the 1-based line number) for a row without
/// exactly three fields, `LibraryError::Csv` for unreadable CSV, or `LibraryError::Empty`
/// if no rows are found.
pub fn parse_library_reader<R: Read>(reader: R) -> Result<LibraryIndex, LibraryError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .quoting(false)
        .from_reader(reader);

    let mut guides = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        let line = record.position().map_or(guides.len() as u64 + 1, csv::Position::line);
        let fields: Vec<&str> = record.iter().collect();
        guides.push(guide_from_fields(&fields, line)?);
    }

    LibraryIndex::from_guides(guides)
}

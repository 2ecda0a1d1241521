use std::io::{Error, Write};
use tempfile::NamedTempFile;

/// Writes a replay script with the `type, amount` header.
pub fn script(rows: &[(&str, &str)]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "type, amount")?;
    for (kind, amount) in rows {
        writeln!(file, "{kind}, {amount}")?;
    }
    file.flush()?;
    Ok(file)
}

use crate::errors::{AnalysisError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Writes any serializable report as pretty JSON (two-space indent).
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write<T: Serialize + ?Sized>(&mut self, value: &T) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

/// Write `value` to `path`, or to stdout when no path is given.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = fs::File::create(path).map_err(|e| AnalysisError::io(path, e))?;
            JsonWriter::new(std::io::BufWriter::new(file))
                .write(value)
                .map_err(|e| AnalysisError::io(path, e))?;
            log::info!("Wrote {}", path.display());
            Ok(())
        }
        None => JsonWriter::new(std::io::stdout().lock())
            .write(value)
            .map_err(|e| AnalysisError::io("<stdout>", e)),
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
    Ok(serde_json::from_str(&contents)?)
}

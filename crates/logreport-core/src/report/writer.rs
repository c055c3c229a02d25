use crate::{Error, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub struct ReportWriter;

impl ReportWriter {
    /// Write a report so that `path` either holds the complete body or does not exist
    ///
    /// The body goes to a temporary file next to `path` which is then moved
    /// into place. An existing file at `path` is never replaced.
    pub fn to_file(body: &str, path: &Path) -> Result<()> {
        tracing::debug!("Writing report to: {}", path.display());

        let write_err = |source| Error::WriteReport {
            path: path.to_path_buf(),
            source,
        };

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        std::fs::create_dir_all(dir).map_err(write_err)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(body.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist_noclobber(path).map_err(|e| write_err(e.error))?;

        tracing::info!("Wrote report ({} bytes) to {}", body.len(), path.display());

        Ok(())
    }
}

//! Writer stage: serializes a [`Table`] to a delimited text file

use std::fs;
use std::io;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{EtlError, Result};
use crate::model::Table;

/// Write `table` to `path` as comma-separated text with a header row.
///
/// The data is written to a temporary file beside `path` and renamed over
/// it once complete, so `path` either keeps its old contents or holds the
/// whole new table. Absent cells are written as empty fields and cells
/// still holding their source text are written as read.
pub fn write(table: &Table, path: &Path) -> Result<()> {
    write_atomic(table, path).map_err(|source| EtlError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        rows = table.row_count(),
        "saved table"
    );

    Ok(())
}

fn write_atomic(table: &Table, path: &Path) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut csv_writer = csv::Writer::from_writer(tmp.as_file());
        csv_writer.write_record(table.column_names())?;
        for row in &table.rows {
            let fields = (0..table.column_count()).map(|i| row.field(i).into_owned());
            csv_writer.write_record(fields)?;
        }
        csv_writer.flush()?;
    }

    tmp.as_file().sync_all()?;
    copy_permissions(tmp.as_file(), path)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Give the new file the permissions of the one it replaces, or the usual
/// world-readable mode for a fresh file.
fn copy_permissions(file: &fs::File, target: &Path) -> io::Result<()> {
    match fs::metadata(target) {
        Ok(meta) => file.set_permissions(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => default_permissions(file),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn default_permissions(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions(_file: &fs::File) -> io::Result<()> {
    Ok(())
}

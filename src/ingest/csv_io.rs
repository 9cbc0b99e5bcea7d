use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH}
};

use serde::{de::DeserializeOwned, Serialize};

use crate::ingest::IngestError;

fn path_string(path: &Path) -> String {
    path.display().to_string()
}

/// Reads a whole CSV table into typed rows. Columns the target type does not
/// know about are ignored, so wider upstream tables deserialize cleanly.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, IngestError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| {
        if source.is_io_error() {
            match source.into_kind() {
                csv::ErrorKind::Io(io) => IngestError::Io {
                    path: path_string(path),
                    source: io
                },
                _ => unreachable!()
            }
        } else {
            IngestError::Csv {
                path: path_string(path),
                source
            }
        }
    })?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: T = result.map_err(|source| IngestError::BadRecord {
            path: path_string(path),
            line: source.position().map(|p| p.line()).unwrap_or_default(),
            source
        })?;
        rows.push(row);
    }

    Ok(rows)
}

/// Like [`read_rows`], but first verifies the header carries every required
/// column so the error names the missing column instead of a serde detail.
pub fn read_rows_with_columns<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>, IngestError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| IngestError::Csv {
        path: path_string(path),
        source
    })?;
    let headers = reader.headers().map_err(|source| IngestError::Csv {
        path: path_string(path),
        source
    })?;

    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(IngestError::MissingColumn {
                path: path_string(path),
                column: (*column).to_string()
            });
        }
    }

    drop(reader);
    read_rows(path)
}

/// A fully written table still under its dot-prefixed temporary name.
/// Nothing appears under the final name until [`commit`](Self::commit) (or
/// [`commit_staged`]) renames it into place; a dropped, uncommitted staging
/// removes its temporary file.
pub struct StagedTable {
    tmp_path: PathBuf,
    final_path: PathBuf,
    committed: bool
}

impl StagedTable {
    pub fn commit(mut self) -> Result<(), IngestError> {
        fs::rename(&self.tmp_path, &self.final_path).map_err(|source| IngestError::Write {
            path: path_string(&self.final_path),
            source
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedTable {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.tmp_path);
        }
    }
}

/// Writes a CSV table to a dot-prefixed temporary file next to its final
/// destination and hands the rename back to the caller. Stages that produce
/// several artifacts stage them all, then commit together, so a failure
/// partway through a stage never leaves a partial output set.
pub fn stage_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<StagedTable, IngestError> {
    let write_error = |source: std::io::Error| IngestError::Write {
        path: path_string(path),
        source
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| "table.csv".into());
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_name = format!(".{file_name}.tmp.{nanos}");
    let tmp_path: PathBuf = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(tmp_name),
        _ => PathBuf::from(tmp_name)
    };

    let result = write_rows(&tmp_path, rows, path);
    if let Err(error) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }

    Ok(StagedTable {
        tmp_path,
        final_path: path.to_path_buf(),
        committed: false
    })
}

/// Commits a batch of staged tables. Call only after every table of the
/// stage has been staged successfully.
pub fn commit_staged(tables: Vec<StagedTable>) -> Result<(), IngestError> {
    for table in tables {
        table.commit()?;
    }

    Ok(())
}

/// Stage-and-commit in one call, for stages with a single output artifact.
pub fn write_rows_atomic<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), IngestError> {
    stage_rows(path, rows)?.commit()
}

fn write_rows<T: Serialize>(tmp_path: &Path, rows: &[T], final_path: &Path) -> Result<(), IngestError> {
    let mut writer = csv::Writer::from_path(tmp_path).map_err(|source| IngestError::Csv {
        path: path_string(final_path),
        source
    })?;

    for row in rows {
        writer.serialize(row).map_err(|source| IngestError::Csv {
            path: path_string(final_path),
            source
        })?;
    }

    writer
        .flush()
        .map_err(|source| IngestError::Write {
            path: path_string(final_path),
            source
        })
}

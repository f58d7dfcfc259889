//! Flat-file record collections.
//!
//! Every collection is a CSV file with a header row followed by one row per
//! record. Reads load the whole file; writes replace the whole file through a
//! temporary sibling that is renamed over the original, so a reader never sees
//! a half-written collection.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Errors raised while accessing a collection on disk.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage unavailable ({file}): {source}")]
    Io {
        file: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed collection ({file}): {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
}

/// A row type persisted in its own collection.
///
/// `FIELDS` is the header written for the collection and must list the
/// serialized struct fields in declaration order.
pub trait Record: Serialize + DeserializeOwned {
    const FILE: &'static str;
    const FIELDS: &'static [&'static str];
}

/// Read-all / write-all access to the collections living in one directory.
#[derive(Clone, Debug)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    /// Opens (and creates, if missing) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            file: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path<R: Record>(&self) -> PathBuf {
        self.dir.join(R::FILE)
    }

    /// Creates a header-only collection when the file does not exist.
    ///
    /// Returns `true` when the file was created.
    pub fn ensure_schema<R: Record>(&self) -> Result<bool, StoreError> {
        if self.path::<R>().exists() {
            return Ok(false);
        }
        self.write_all::<R>(&[])?;
        tracing::debug!(collection = R::FILE, "created empty collection");
        Ok(true)
    }

    /// Loads every record of the collection in file order.
    ///
    /// A missing file reads as an empty collection.
    pub fn read_all<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        let path = self.path::<R>();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let csv_err = |source| StoreError::Csv {
            file: R::FILE.to_string(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .map_err(csv_err)?;
        reader
            .deserialize::<R>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_err)
    }

    /// Replaces the whole collection with `records`.
    ///
    /// Rows not present in `records` are gone afterwards.
    pub fn write_all<R: Record>(&self, records: &[R]) -> Result<(), StoreError> {
        let path = self.path::<R>();
        let tmp = path.with_extension("csv.tmp");
        let io_err = |source| StoreError::Io {
            file: R::FILE.to_string(),
            source,
        };
        let csv_err = |source| StoreError::Csv {
            file: R::FILE.to_string(),
            source,
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)
            .map_err(csv_err)?;
        writer.write_record(R::FIELDS).map_err(csv_err)?;
        for record in records {
            writer.serialize(record).map_err(csv_err)?;
        }
        let file = writer
            .into_inner()
            .map_err(|err| io_err(err.into_error()))?;
        file.sync_all().map_err(io_err)?;
        drop(file);

        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }

    /// Adds one record at the end of the collection.
    pub fn append<R: Record>(&self, record: R) -> Result<(), StoreError> {
        let mut records = self.read_all::<R>()?;
        records.push(record);
        self.write_all(&records)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use tempfile::TempDir;

    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        key: String,
        label: Option<String>,
        #[serde(default)]
        count: u32,
    }

    impl Record for Row {
        const FILE: &'static str = "rows.csv";
        const FIELDS: &'static [&'static str] = &["key", "label", "count"];
    }

    fn row(key: &str, label: Option<&str>, count: u32) -> Row {
        Row {
            key: key.to_string(),
            label: label.map(str::to_string),
            count,
        }
    }

    #[test]
    fn missing_collection_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        assert!(store.read_all::<Row>().unwrap().is_empty());
    }

    #[test]
    fn ensure_schema_writes_header_once() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();

        assert!(store.ensure_schema::<Row>().unwrap());
        let raw = fs::read_to_string(dir.path().join("rows.csv")).unwrap();
        assert_eq!(raw, "key,label,count\n");

        store.append(row("a", None, 1)).unwrap();
        assert!(!store.ensure_schema::<Row>().unwrap());
        assert_eq!(store.read_all::<Row>().unwrap().len(), 1);
    }

    #[test]
    fn write_all_replaces_previous_rows() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        store
            .write_all(&[row("a", Some("first"), 1), row("b", None, 2)])
            .unwrap();
        store.write_all(&[row("c", None, 3)]).unwrap();

        assert_eq!(store.read_all::<Row>().unwrap(), vec![row("c", None, 3)]);
        assert!(!dir.path().join("rows.csv.tmp").exists());
    }

    #[test]
    fn empty_field_reads_as_none_and_keeps_order() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        store.append(row("b", None, 2)).unwrap();
        store.append(row("a", Some("x"), 1)).unwrap();

        let raw = fs::read_to_string(dir.path().join("rows.csv")).unwrap();
        assert_eq!(raw, "key,label,count\nb,,2\na,x,1\n");
        assert_eq!(
            store.read_all::<Row>().unwrap(),
            vec![row("b", None, 2), row("a", Some("x"), 1)]
        );
    }

    #[test]
    fn missing_defaulted_column_is_filled() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rows.csv"), "key,label\nz,hello\n").unwrap();
        let store = RecordStore::open(dir.path()).unwrap();

        assert_eq!(
            store.read_all::<Row>().unwrap(),
            vec![row("z", Some("hello"), 0)]
        );
    }

    #[test]
    fn malformed_row_is_a_csv_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rows.csv"), "key,label,count\nz,,not-a-number\n").unwrap();
        let store = RecordStore::open(dir.path()).unwrap();

        assert!(matches!(
            store.read_all::<Row>(),
            Err(StoreError::Csv { .. })
        ));
    }
}

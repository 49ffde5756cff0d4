//! Durable per-month task storage
//!
//! One JSON file per (year, month) the user has ever put tasks in, under an
//! application-owned data directory. The directory is created on the first
//! write; a month with no file is just an empty month.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::Error;
use crate::month::{MonthFile, MonthKey};

/// Reads and writes [`MonthFile`]s under a configured data directory.
///
/// The directory is explicit configuration rather than process-wide state, so
/// tests (and embedders) can point a store at any directory they like.
#[derive(Clone, Debug)]
pub struct TaskStore {
    data_dir: PathBuf,
}

impl TaskStore {
    /// A store rooted at `data_dir`. The directory does not have to exist
    /// yet; it is created on the first save that has something to write.
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The per-user data directory for this application, if the platform
    /// exposes one.
    pub fn default_data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "desk-pad").map(|dirs| dirs.data_dir().to_path_buf())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The file a month persists to, named from the zero-padded key.
    pub fn month_path(&self, key: MonthKey) -> PathBuf {
        self.data_dir
            .join(format!("task_data_{:04}_{:02}.json", key.year, key.month))
    }

    /// Read the persisted tasks for one month.
    ///
    /// A month that was never saved loads as an empty [`MonthFile`].
    pub fn load_month(&self, key: MonthKey) -> Result<MonthFile, Error> {
        let path = self.month_path(key);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("No file for month {}, starting empty", key);
                return Ok(MonthFile::new());
            }
            Err(source) => return Err(Error::Read { path, source }),
        };
        serde_json::from_reader(file).map_err(|source| Error::Decode { path, source })
    }

    /// Persist one month, dropping empty day records first.
    ///
    /// A month that prunes down to nothing has its file deleted instead of
    /// being written out empty, so the data directory only accumulates months
    /// that actually hold tasks.
    pub fn save_month(&self, key: MonthKey, month: &MonthFile) -> Result<(), Error> {
        let path = self.month_path(key);
        let month = month.pruned();

        if month.is_empty() {
            return match std::fs::remove_file(&path) {
                Ok(()) => {
                    log::debug!("Removed file of now-empty month {}", key);
                    Ok(())
                }
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                Err(source) => Err(Error::Write { path, source }),
            };
        }

        std::fs::create_dir_all(&self.data_dir).map_err(|source| Error::Write {
            path: self.data_dir.clone(),
            source,
        })?;
        let file = File::create(&path).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        serde_json::to_writer(file, &month).map_err(|source| Error::Write {
            path,
            source: source.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use crate::task::Task;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_month() -> MonthFile {
        let mut month = MonthFile::new();
        month.set_day(
            date("2024-05-10"),
            vec![
                Task::new("Buy milk".to_string(), false),
                Task::new("Call the bank".to_string(), true),
            ],
        );
        month.set_day(
            date("2024-05-12"),
            vec![Task::new("Water plants".to_string(), false)],
        );
        month
    }

    #[test]
    fn load_of_never_saved_month_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path());
        let month = store.load_month(MonthKey { year: 2024, month: 5 }).unwrap();
        assert!(month.is_empty());
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path());
        let key = MonthKey { year: 2024, month: 5 };

        let month = sample_month();
        store.save_month(key, &month).unwrap();

        let reloaded = store.load_month(key).unwrap();
        assert_eq!(reloaded, month);
    }

    #[test]
    fn saves_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path());
        let key = MonthKey { year: 2024, month: 5 };
        let month = sample_month();

        store.save_month(key, &month).unwrap();
        let first = std::fs::read(store.month_path(key)).unwrap();
        store.save_month(key, &month).unwrap();
        let second = std::fs::read(store.month_path(key)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn saving_an_empty_month_deletes_its_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path());
        let key = MonthKey { year: 2024, month: 5 };

        store.save_month(key, &sample_month()).unwrap();
        assert!(store.month_path(key).is_file());

        store.save_month(key, &MonthFile::new()).unwrap();
        assert!(!store.month_path(key).exists());

        // Deleting an already-absent file is not an error either
        store.save_month(key, &MonthFile::new()).unwrap();
    }

    #[test]
    fn garbage_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path());
        let key = MonthKey { year: 2024, month: 5 };

        std::fs::write(store.month_path(key), b"not json at all").unwrap();
        match store.load_month(key) {
            Err(Error::Decode { path, .. }) => assert_eq!(path, store.month_path(key)),
            other => panic!("expected a decode error, got {:?}", other),
        }
    }

    #[test]
    fn month_files_are_named_from_the_zero_padded_key() {
        let store = TaskStore::new("/tmp/desk-pad");
        let path = store.month_path(MonthKey { year: 2024, month: 5 });
        assert_eq!(
            path,
            PathBuf::from("/tmp/desk-pad/task_data_2024_05.json")
        );
    }
}

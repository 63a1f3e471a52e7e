use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::date::DateKey;

/// Persistence for diary entries keyed by [`DateKey`].
///
/// The contract is deliberately weak: no atomicity across process
/// crashes, no locking around writes (last write wins for concurrent
/// writers on the same key), and `list_dates` may observe a snapshot
/// that is stale with respect to concurrent writers. Acceptable under
/// the single-user assumption; an alternative backend only has to
/// honor the same read/write/list semantics.
pub trait DiaryStore: Send + Sync {
    /// Returns the stored content for `key`, or the empty string if
    /// nothing was ever written for it. "Never written" and "written
    /// empty" are indistinguishable here.
    fn read(&self, key: DateKey) -> Result<String>;

    /// Persists `content` for `key`, fully replacing any prior content.
    fn write(&self, key: DateKey, content: &str) -> Result<()>;

    /// Enumerates every key with a stored content file. Order is
    /// unspecified; callers that need calendar order must sort.
    fn list_dates(&self) -> Result<Vec<DateKey>>;
}

/// The extension carried by every entry file.
const ENTRY_EXTENSION: &str = ".txt";

/// A [`DiaryStore`] backed by a directory tree on the local
/// filesystem.
///
/// Layout, kept bit-for-bit compatible with existing data
/// directories: one subdirectory per 4-digit year under the root, one
/// `<YYYYMMDD>.txt` file per entry, plain UTF-8, content exactly the
/// entry body. The per-year grouping only keeps per-directory file
/// counts low and carries no other meaning.
pub struct FsDiaryStore {
    root: PathBuf,
}

impl FsDiaryStore {
    /// Creates a store rooted at `root`, creating the directory if it
    /// does not exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The root directory this store owns.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: DateKey) -> PathBuf {
        self.root
            .join(key.year_group())
            .join(format!("{}{}", key.compact(), ENTRY_EXTENSION))
    }
}

impl DiaryStore for FsDiaryStore {
    fn read(&self, key: DateKey) -> Result<String> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(AppError::Storage(e)),
        }
    }

    fn write(&self, key: DateKey, content: &str) -> Result<()> {
        let path = self.entry_path(key);
        // entry_path always has the year directory as parent.
        if let Some(year_dir) = path.parent() {
            fs::create_dir_all(year_dir)?;
        }
        fs::write(&path, content)?;
        tracing::debug!("Entry written: {}", path.display());
        Ok(())
    }

    fn list_dates(&self) -> Result<Vec<DateKey>> {
        let mut dates = Vec::new();

        for group in fs::read_dir(&self.root)? {
            let group = group?;
            if !group.file_type()?.is_dir() {
                continue;
            }

            for file in fs::read_dir(group.path())? {
                let file = file?;
                if file.file_type()?.is_dir() {
                    continue;
                }

                let name = file.file_name();
                let Some(name) = name.to_str() else { continue };
                let Some(stem) = name.strip_suffix(ENTRY_EXTENSION) else {
                    continue;
                };
                // Stray files that do not carry a compact date name
                // are not entries.
                if let Ok(key) = DateKey::parse(stem) {
                    dates.push(key);
                }
            }
        }

        Ok(dates)
    }
}

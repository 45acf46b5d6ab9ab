//! Ordered, most-recent-first collection of the user's files.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    file_kind::extension_of,
    model::{FileId, FileRecord},
    size,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("file name must not be empty")]
    EmptyName,
    #[error("file not found")]
    FileNotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// File records plus the id counter.
///
/// Ids come from `next_id`, which only grows, so ids freed by deletes are never handed out again.
pub struct FileCatalog {
    files: Vec<FileRecord>,
    next_id: u64,
}

impl Default for FileCatalog {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            next_id: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Aggregate storage consumption for the sidebar meter.
pub struct StorageUsage {
    pub used_mb: f64,
    pub quota_mb: f64,
    /// Fill level in percent, clamped to `0..=100`.
    pub percent: f64,
}

impl FileCatalog {
    /// Builds a catalog from existing records, keeping their order.
    pub fn from_records(files: Vec<FileRecord>) -> Self {
        let next_id = files.iter().map(|f| f.id.0).max().unwrap_or(0) + 1;
        Self { files, next_id }
    }

    /// The five sample documents shown to a fresh account.
    pub fn with_demo_files() -> Self {
        let demo = [
            ("Отчет-Q3-2023.pdf", "2.5 МБ", "12.09.2023"),
            ("Презентация_проекта.pptx", "5.7 МБ", "23.10.2023"),
            ("Фотографии_мероприятия.zip", "45.2 МБ", "05.11.2023"),
            ("Финансовые_показатели.xlsx", "1.8 МБ", "18.11.2023"),
            ("Договор_с_клиентом.docx", "750 КБ", "01.12.2023"),
        ];
        let files = demo
            .into_iter()
            .zip(1u64..)
            .map(|((name, size, date_added), id)| FileRecord {
                id: FileId(id),
                name: name.to_string(),
                file_type: extension_of(name),
                size: size.to_string(),
                date_added: date_added.to_string(),
            })
            .collect();
        Self::from_records(files)
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, id: FileId) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Id the next inserted record will receive.
    pub fn peek_next_id(&self) -> FileId {
        FileId(self.next_id)
    }

    /// Creates a record for `name` and places it first.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyName`] when `name` is blank.
    pub fn add_file(
        &mut self,
        name: &str,
        size: impl Into<String>,
        date_added: impl Into<String>,
    ) -> Result<FileRecord, CatalogError> {
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        let record = FileRecord {
            id: FileId(self.next_id),
            name: name.to_string(),
            file_type: extension_of(name),
            size: size.into(),
            date_added: date_added.into(),
        };
        self.next_id += 1;
        self.files.insert(0, record.clone());
        Ok(record)
    }

    /// Removes the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::FileNotFound`] when no record has that id.
    pub fn delete_by_id(&mut self, id: FileId) -> Result<FileRecord, CatalogError> {
        let idx = self
            .files
            .iter()
            .position(|f| f.id == id)
            .ok_or(CatalogError::FileNotFound)?;
        Ok(self.files.remove(idx))
    }

    /// Removes every record whose name equals `name` exactly and returns how many were removed.
    pub fn delete_by_name(&mut self, name: &str) -> usize {
        let before = self.files.len();
        self.files.retain(|f| f.name != name);
        before - self.files.len()
    }

    /// Case-insensitive substring search on names. An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&FileRecord> {
        let needle = term.to_lowercase();
        self.files
            .iter()
            .filter(|f| needle.is_empty() || f.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Sum of all parseable sizes in megabytes.
    pub fn total_used_space(&self) -> f64 {
        size::total_megabytes(self.files.iter().map(|f| f.size.as_str()))
    }

    pub fn usage(&self, quota_mb: f64) -> StorageUsage {
        let used_mb = self.total_used_space();
        let percent = if quota_mb > 0.0 {
            (used_mb / quota_mb * 100.0).clamp(0.0, 100.0)
        } else {
            100.0
        };
        StorageUsage {
            used_mb,
            quota_mb,
            percent,
        }
    }
}

/// Message shown when a listing comes back empty.
pub fn empty_listing_message(term: &str) -> String {
    if term.is_empty() {
        "В вашем хранилище пока нет файлов".to_string()
    } else {
        format!("Не найдено файлов, содержащих \"{term}\"")
    }
}

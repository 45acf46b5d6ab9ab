use serde::{Deserialize, Serialize};

use crate::file_kind::FileKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileId(pub u64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: FileId,
    pub name: String,
    /// Lowercase extension; empty when the name has none.
    pub file_type: String,
    /// Formatted size label such as `"2.5 МБ"`.
    pub size: String,
    /// Localized date label such as `"12.09.2023"`.
    pub date_added: String,
}

impl FileRecord {
    pub fn kind(&self) -> FileKind {
        FileKind::from_extension(&self.file_type)
    }

    /// Size in megabytes, or `None` when the label cannot be parsed.
    pub fn size_mb(&self) -> Option<f64> {
        crate::size::parse_size_mb(&self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Toast payload emitted for the UI layer to present.
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }
}

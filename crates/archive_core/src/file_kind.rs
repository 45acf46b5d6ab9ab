use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Display category derived from a file extension; selects the list icon.
pub enum FileKind {
    Document,
    Image,
    Archive,
    Video,
    Audio,
    Spreadsheet,
    Code,
    Other,
}

impl FileKind {
    /// Classifies an extension (case-insensitive, without the leading dot).
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" | "doc" | "docx" | "txt" => Self::Document,
            "jpg" | "jpeg" | "png" | "gif" | "svg" => Self::Image,
            "zip" | "rar" | "7z" => Self::Archive,
            "mp4" | "avi" | "mov" => Self::Video,
            "mp3" | "wav" => Self::Audio,
            "xls" | "xlsx" | "csv" => Self::Spreadsheet,
            "html" | "css" | "js" | "tsx" | "jsx" => Self::Code,
            _ => Self::Other,
        }
    }

    pub fn icon_id(self) -> &'static str {
        match self {
            Self::Document => "file-text",
            Self::Image => "image",
            Self::Archive => "file-archive",
            Self::Video => "film",
            Self::Audio => "music",
            Self::Spreadsheet => "file-spreadsheet",
            Self::Code => "file-code",
            Self::Other => "file",
        }
    }
}

/// Splits a file name on its last `.` and returns the lowercase extension.
///
/// Names without a dot, or ending in one, have an empty extension.
pub fn extension_of(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

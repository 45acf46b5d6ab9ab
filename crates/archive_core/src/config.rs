//! Tunables for the archive client. Defaults reproduce the mocked front end.

use serde::{Deserialize, Serialize};

/// Preference key under which a serialized [`ArchiveConfig`] override may be stored.
pub const ARCHIVE_CONFIG_KEY: &str = "archive.config.v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
/// Locale used for size unit labels and date formatting.
pub enum Locale {
    /// `МБ`/`КБ`/`ГБ` labels and `dd.mm.yyyy` dates.
    #[default]
    Ru,
    /// `MB`/`KB`/`GB` labels and `m/d/yyyy` dates.
    En,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Runtime configuration for session flows, uploads and the storage summary.
pub struct ArchiveConfig {
    /// Display locale.
    pub locale: Locale,
    /// Storage quota shown in the usage summary, in megabytes.
    pub storage_quota_mb: f64,
    /// Progress added on every upload tick, in percent.
    pub upload_step_percent: u8,
    /// Interval between upload ticks.
    pub upload_tick_ms: u32,
    /// Artificial latency applied to login, registration and code checks.
    pub artificial_delay_ms: u32,
    /// Delay between a delete request and the catalog mutation.
    pub delete_delay_ms: u32,
    /// Seconds before a verification code may be resent.
    pub resend_cooldown_secs: u32,
    /// Exact length of a verification code.
    pub verification_code_len: usize,
    /// Size label assigned to files whose byte size is unknown.
    pub placeholder_size: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            locale: Locale::Ru,
            storage_quota_mb: 100.0,
            upload_step_percent: 5,
            upload_tick_ms: 150,
            artificial_delay_ms: 1000,
            delete_delay_ms: 500,
            resend_cooldown_secs: 60,
            verification_code_len: 3,
            placeholder_size: "1.2 МБ".to_string(),
        }
    }
}

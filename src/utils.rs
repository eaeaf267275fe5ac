//! Utility functions for the JST clock, log-friendly strings, and output paths.
//!
//! - The news site publishes in Japan Standard Time, so every resolved
//!   timestamp is pinned to a fixed +09:00 offset
//! - String truncation keeps long titles readable in log lines
//! - Output directory preparation for report files

use chrono::{DateTime, FixedOffset, Utc};
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

const JST_OFFSET_SECS: i32 = 9 * 3600;

/// The fixed +09:00 offset used for every article and range timestamp.
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(JST_OFFSET_SECS).expect("+09:00 is a valid UTC offset")
}

/// Current wall-clock time in JST.
pub fn jst_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&jst())
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a count of
/// the dropped characters appended. Counting is per `char`, so multi-byte
/// Japanese titles are never split mid-codepoint.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"あ".repeat(20), 10), "ああああああああああ…(+10 chars)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let total = s.chars().count();
    if total <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max).collect();
        format!("{}…(+{} chars)", kept, total - max)
    }
}

/// Make sure the directory that will hold `path` exists.
///
/// Paths without a parent component (a bare file name) are written to the
/// current directory and need no preparation.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).await?;
            debug!(dir = %parent.display(), "Output directory is ready");
            Ok(())
        }
        _ => Ok(()),
    }
}

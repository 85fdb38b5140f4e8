use std::path::Path;
use std::time::Duration;

/// Display a path relative to the workspace root, or just the file name if
/// it lies outside.
pub fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| {
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "[path]".to_string())
        })
}

/// Format an elapsed duration as `H:MM:SS.ss`.
pub fn format_hms(elapsed: Duration) -> String {
    let total = elapsed.as_secs_f64();
    let hours = (total / 3600.0).floor() as u64;
    let minutes = ((total % 3600.0) / 60.0).floor() as u64;
    let seconds = total % 60.0;
    format!("{hours}:{minutes:02}:{seconds:05.2}")
}

/// Unix timestamp used to tag generated file names.
pub fn timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

//! Time formatting utilities

/// Format seconds for an ffmpeg argument: up to microsecond precision,
/// trailing zeros dropped (`60`, `120.5`, `0.000001`)
pub fn format_seconds(seconds: f64) -> String {
    let formatted = format!("{:.6}", seconds);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format seconds for humans as `MM:SS.mmm` or `H:MM:SS.mmm`
pub fn format_clock(seconds: f64) -> String {
    let total_millis = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let secs = (total_millis % 60_000) / 1000;
    let millis = total_millis % 1000;

    if hours > 0 {
        format!("{}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, secs, millis)
    }
}

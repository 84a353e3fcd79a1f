use std::fmt::Write;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn text_width(value: &str) -> usize {
    UnicodeWidthStr::width(value)
}

pub fn fit_text(value: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if text_width(value) <= max_len {
        return value.to_string();
    }
    if max_len <= 3 {
        return take_width(value, max_len);
    }
    let mut trimmed = take_width(value, max_len - 3);
    trimmed.push_str("...");
    trimmed
}

pub fn take_width(value: &str, max_len: usize) -> String {
    let mut output = String::new();
    let mut width = 0;
    for ch in value.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > max_len {
            break;
        }
        output.push(ch);
        width += ch_width;
    }
    output
}

/// Progress cell text: `"<stage> <pct>%"`, `"<pct>%"`, `"<stage>"` or `"N/A"`.
pub fn format_progress(current: i64, max: i64, stage: &str) -> String {
    if max > 0 {
        let pct = (current as f64 / max as f64) * 100.0;
        if stage.is_empty() {
            return format!("{pct:.2}%");
        }
        return format!("{stage} {pct:.2}%");
    }
    if stage.is_empty() {
        "N/A".to_string()
    } else {
        stage.to_string()
    }
}

/// Millisecond-precision duration in `1h2m3.004s` form.
pub fn format_elapsed_ms(ms: u64) -> String {
    if ms == 0 {
        return "0s".to_string();
    }
    if ms < 1_000 {
        return format!("{ms}ms");
    }

    let hours = ms / 3_600_000;
    let minutes = (ms / 60_000) % 60;
    let seconds = (ms / 1_000) % 60;
    let millis = ms % 1_000;

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    if millis == 0 {
        let _ = write!(out, "{seconds}s");
    } else {
        let fraction = format!("{millis:03}");
        let _ = write!(out, "{seconds}.{}s", fraction.trim_end_matches('0'));
    }
    out
}

pub fn format_interval_secs(secs: u64) -> String {
    format_elapsed_ms(secs.saturating_mul(1_000))
}

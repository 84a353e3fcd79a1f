mod format;

pub use format::{
    fit_text, format_elapsed_ms, format_interval_secs, format_progress, take_width, text_width,
};

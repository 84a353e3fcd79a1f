mod process_table;
mod search;

pub use process_table::render;
pub use search::render_search_panel;

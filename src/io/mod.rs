pub mod json;

pub use json::{layout_to_json, parse_timeline_data, JsonError};

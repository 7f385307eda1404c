pub mod json;

pub use json::from_json;
pub use json::to_json;
pub use json::to_string_pretty as to_json_string;

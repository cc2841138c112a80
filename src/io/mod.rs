pub mod timeline_file;

pub use timeline_file::{load_timeline, parse_timeline};

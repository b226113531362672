pub mod output;
pub mod walker;

pub use output::{read_json, write_json, JsonWriter};
pub use walker::{find_python_files, normalize_path, FileWalker};

pub mod batch;
pub mod docstring;
pub mod guard;
pub mod python;

pub use batch::{analyze_files, BatchAnalyzer};
pub use guard::NestingLimits;
pub use python::{decode_source, extract_structure, PythonAnalyzer};

pub mod document;
pub mod report;
pub mod update_mode;

pub use document::*;
pub use report::*;
pub use update_mode::*;

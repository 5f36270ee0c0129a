pub mod build_info;
pub mod process;
pub mod source;

pub use source::SourceCollector;

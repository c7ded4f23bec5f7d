pub mod builder;
pub mod format;

pub use builder::build_report;
pub use format::format_report;

pub mod build;
pub mod init;

pub use build::BuildSummary;

pub mod ranking;
pub mod report;
pub mod sync;

pub mod analyze;
pub mod ask;
pub mod detail;
pub mod search;
pub mod servers;

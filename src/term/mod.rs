pub mod color;
pub mod log;

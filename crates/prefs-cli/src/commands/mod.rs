pub mod common;
pub mod debug;
pub mod focus;

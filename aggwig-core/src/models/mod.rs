pub mod region;
pub mod window;

pub use region::{Region, Strand};
pub use window::{Window, build_window};

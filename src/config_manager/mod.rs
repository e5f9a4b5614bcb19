pub mod main;
pub mod system;
pub mod translate;
pub mod utils;

pub use main::Config;

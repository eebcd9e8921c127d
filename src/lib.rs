pub mod error;
pub mod flags;
pub mod fs;
pub mod logging;
pub mod shell;

pub mod core;
pub mod highlight;
pub mod input;
pub mod path;

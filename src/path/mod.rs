mod resolver;

pub use resolver::{normalize, PathError, PathResolver};

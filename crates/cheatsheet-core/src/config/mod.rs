mod env;
mod search;

pub use search::{DEFAULT_FUZZY_THRESHOLD, SearchConfig};

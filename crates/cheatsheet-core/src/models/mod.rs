mod search;
mod sheet;

pub use search::{
    KeywordEntry, ScoredSheet, SearchCapabilities, SearchOutcome, SearchStrategy,
    StrategyResolution,
};
pub use sheet::{Sheet, is_valid_sheet_name};

pub mod doc_window;
pub mod match_list;

pub use doc_window::DocumentWindows;
pub use match_list::{ListEntry, MatchListState};

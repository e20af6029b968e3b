pub mod file_ops;
pub mod mapping;
pub mod matcher;

pub use file_ops::read_design_doc;
pub use mapping::{load_mapping, MappingEntry, MappingTable};
pub use matcher::{find_matches, match_snippet};

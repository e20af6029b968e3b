use std::fs;
use std::path::Path;

use super::MappingTable;

/// Reads `watched_dir/snippet_filename` and returns the design documents
/// whose source file contains the trimmed snippet text verbatim.
///
/// An unreadable snippet yields no matches. Results follow mapping table
/// order and may repeat a document name.
pub fn find_matches(
    snippet_filename: &str,
    watched_dir: &Path,
    mapping: &MappingTable,
    source_asset_dir: &Path,
) -> Vec<String> {
    let snippet_path = watched_dir.join(snippet_filename);
    let snippet = match fs::read_to_string(&snippet_path) {
        Ok(content) => content,
        Err(e) => {
            log::error!("Failed to read snippet {}: {}", snippet_path.display(), e);
            return Vec::new();
        }
    };

    match_snippet(&snippet, mapping, source_asset_dir)
}

pub fn match_snippet(
    snippet: &str,
    mapping: &MappingTable,
    source_asset_dir: &Path,
) -> Vec<String> {
    let snippet = snippet.trim();
    if snippet.is_empty() {
        return Vec::new();
    }

    let mut matched = Vec::new();
    for entry in mapping {
        let source_path = source_asset_dir.join(&entry.source_file);
        if !source_path.exists() {
            continue;
        }

        match fs::read_to_string(&source_path) {
            Ok(source) => {
                if source.contains(snippet) {
                    matched.push(entry.design_doc.clone());
                }
            }
            Err(e) => {
                log::error!("Failed to read source file {}: {}", source_path.display(), e);
            }
        }
    }

    matched
}

//! Saved-request catalog - parses the flat text format into named groups
//! of pre-filled requests.
//!
//! The format is line-oriented:
//!
//! ```text
//! [[pokemon]]
//! request: GET https://pokeapi.co/api/v2/pokemon/ditto
//!
//! [[personal]]
//! request: POST http://localhost:8000/items
//! ```
//!
//! Parsing is deliberately lenient and never fails: malformed lines are
//! dropped, but each drop is recorded in a diagnostics list so callers can
//! surface warnings without breaking the no-fail contract.

use std::fs;
use std::path::Path;

use regex::Regex;

/// One pre-filled request template. The method token is kept verbatim,
/// legal or not; the typed boundary is entry selection in the app layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub method: String,
    pub url: String,
}

/// A named group of templates, in file order. Duplicate entries allowed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogGroup {
    pub name: String,
    pub entries: Vec<CatalogEntry>,
}

/// Why a line was dropped during parsing
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// `request:` line seen before any `[[group]]` header
    NoOpenGroup,
    /// `request:` line with fewer than method + URL tokens
    MissingTokens,
}

/// A dropped line: where it was and why it was skipped
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    /// 1-based line number in the source text
    pub line: usize,
    pub reason: DropReason,
}

/// Parsed collection of named groups, built once at startup and read-only
/// afterwards. Groups keep first-seen order; a repeated group name replaces
/// the earlier group's entries in place (last one wins, no merge).
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub groups: Vec<CatalogGroup>,
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl Catalog {
    /// Parse catalog text. Never fails; worst case is an empty catalog.
    pub fn parse(text: &str) -> Catalog {
        let group_header = Regex::new(r"^\[\[([^\]]+)\]\]").unwrap();

        let mut groups: Vec<CatalogGroup> = Vec::new();
        let mut diagnostics = Vec::new();
        // Index into `groups` of the currently open group
        let mut current: Option<usize> = None;

        for (idx, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(caps) = group_header.captures(line) {
                let name = caps.get(1).unwrap().as_str().to_string();
                current = Some(open_group(&mut groups, name));
                continue;
            }

            if line.starts_with("request:") {
                let Some(group_idx) = current else {
                    diagnostics.push(ParseDiagnostic {
                        line: idx + 1,
                        reason: DropReason::NoOpenGroup,
                    });
                    continue;
                };

                // Positional split: keyword, method, URL. Trailing tokens
                // are dropped; URLs with embedded spaces are out of contract.
                let mut tokens = line.split_whitespace();
                let _keyword = tokens.next();
                let method = tokens.next();
                let url = tokens.next();

                match (method, url) {
                    (Some(method), Some(url)) => {
                        groups[group_idx].entries.push(CatalogEntry {
                            method: method.to_string(),
                            url: url.to_string(),
                        });
                    }
                    _ => {
                        diagnostics.push(ParseDiagnostic {
                            line: idx + 1,
                            reason: DropReason::MissingTokens,
                        });
                    }
                }
            }
            // Anything else is ignored, matching the lenient policy
        }

        Catalog {
            groups,
            diagnostics,
        }
    }

    /// Read and parse a catalog file. A missing or unreadable file yields an
    /// empty catalog; the condition is logged, never fatal.
    pub fn load(path: &Path) -> Catalog {
        match fs::read_to_string(path) {
            Ok(text) => {
                let catalog = Catalog::parse(&text);
                for diagnostic in &catalog.diagnostics {
                    tracing::warn!(
                        path = %path.display(),
                        line = diagnostic.line,
                        reason = ?diagnostic.reason,
                        "Skipped catalog line"
                    );
                }
                tracing::info!(
                    path = %path.display(),
                    groups = catalog.groups.len(),
                    "Loaded saved-request catalog"
                );
                catalog
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "No saved-request catalog loaded");
                Catalog::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|group| group.entries.is_empty())
    }

    /// Total number of entries across all groups
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|group| group.entries.len()).sum()
    }

    /// Entry at a flat index counting across groups in order
    pub fn entry_at(&self, flat_index: usize) -> Option<(&CatalogGroup, &CatalogEntry)> {
        let mut remaining = flat_index;
        for group in &self.groups {
            if remaining < group.entries.len() {
                return Some((group, &group.entries[remaining]));
            }
            remaining -= group.entries.len();
        }
        None
    }
}

/// Open (or reopen) a group by name. A repeated name clears the earlier
/// group's entries but keeps its original position.
fn open_group(groups: &mut Vec<CatalogGroup>, name: String) -> usize {
    if let Some(idx) = groups.iter().position(|group| group.name == name) {
        groups[idx].entries.clear();
        idx
    } else {
        groups.push(CatalogGroup {
            name,
            entries: Vec::new(),
        });
        groups.len() - 1
    }
}

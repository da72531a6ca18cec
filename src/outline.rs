//! Document discovery and heading extraction for markdown manuals.
//!
//! Manuals are parsed with tree-sitter-md. ATX headings at levels 1 and 2
//! become sections (the expandable content blocks listed in the TOC), deeper
//! headings become subsections nested inside the enclosing section. Every
//! heading gets an anchor slug so TOC jumps can resolve a target by id the
//! way the companion stylesheet's anchors would.

use crate::section::{Section, Subsection};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{fs, io};
use streaming_iterator::StreamingIterator;

/// Maximum heading depth that forms a section; deeper headings nest as
/// subsections.
pub const SECTION_MAX_LEVEL: usize = 2;

/// Parsed manual: source lines plus the section/subsection structure.
pub struct Outline {
    /// Source file the outline was read from.
    pub path: PathBuf,
    /// Document lines, the coordinate space for all layout.
    pub lines: Vec<String>,
    /// Top-level content blocks in document order.
    pub sections: Vec<Section>,
    /// Nested fade-in blocks in document order.
    pub subsections: Vec<Subsection>,
    slug_to_anchor: HashMap<String, Anchor>,
}

/// Resolved jump target for an anchor slug.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Anchor {
    /// Section the target lives in (the target itself for section slugs,
    /// the enclosing section for subsection slugs).
    pub section_index: usize,
    /// Source line of the target heading.
    pub line: usize,
}

impl Outline {
    /// Resolves an anchor slug to its jump target, `None` for unknown ids.
    #[must_use]
    pub fn resolve(&self, slug: &str) -> Option<Anchor> {
        self.slug_to_anchor.get(slug).copied()
    }

    /// Subsection indices belonging to one section, in document order.
    #[must_use]
    pub fn subsections_of(&self, section_index: usize) -> Vec<usize> {
        self.subsections
            .iter()
            .enumerate()
            .filter(|(_, sub)| sub.section_index == section_index)
            .map(|(i, _)| i)
            .collect()
    }

    /// Document title: the first level-1 heading, or the file stem.
    #[must_use]
    pub fn title(&self) -> String {
        self.sections
            .iter()
            .find(|s| s.level == 1)
            .map_or_else(
                || {
                    self.path
                        .file_stem()
                        .map_or_else(String::new, |s| s.to_string_lossy().to_string())
                },
                |s| s.title.clone(),
            )
    }
}

/// Serialisable TOC for the `--outline` export.
#[derive(Serialize)]
pub struct TocExport<'a> {
    /// Source file the outline was read from.
    pub path: &'a Path,
    /// Sections in document order.
    pub sections: &'a [Section],
    /// Subsections in document order.
    pub subsections: &'a [Subsection],
}

/// Collect manual files from the given paths, scanning directories for
/// matching extensions. Explicit file paths are taken as-is.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let roots = if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    };

    let mut documents = Vec::new();
    for root in roots {
        if root.is_dir() {
            collect_dir(&root, extensions, &mut documents)?;
        } else if root.is_file() {
            documents.push(root);
        }
    }
    documents.sort();
    documents.dedup();
    Ok(documents)
}

fn collect_dir(dir: &Path, extensions: &[String], out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_dir(&path, extensions, out)?;
        } else if let Some(ext) = path.extension() {
            let ext = ext.to_string_lossy();
            if extensions.iter().any(|e| e.as_str() == ext) {
                out.push(path);
            }
        }
    }
    Ok(())
}

/// A heading found by the tree-sitter query, before nesting is assigned.
struct Heading {
    title: String,
    level: usize,
    line: usize,
}

/// Parse a manual and extract its section/subsection outline.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the grammar fails to load.
pub fn extract_outline(path: &Path) -> io::Result<Outline> {
    let content = fs::read_to_string(path)?;
    let headings = parse_headings(&content)?;
    let lines: Vec<String> = content.lines().map(ToString::to_string).collect();
    let total_lines = lines.len();

    let mut slugs = SlugSet::default();
    let mut sections: Vec<Section> = Vec::new();
    let mut subsections: Vec<Subsection> = Vec::new();
    let mut slug_to_anchor = HashMap::new();

    for (i, heading) in headings.iter().enumerate() {
        // A block runs to the next heading at the same or a shallower level.
        let end = headings[i + 1..]
            .iter()
            .find(|h| h.level <= heading.level)
            .map_or(total_lines, |h| h.line);
        let slug = slugs.claim(&heading.title);

        if heading.level <= SECTION_MAX_LEVEL {
            let parent_index = sections
                .iter()
                .rposition(|s| s.level < heading.level && s.line_end > heading.line);
            let index = sections.len();
            if let Some(p) = parent_index {
                sections[p].children_indices.push(index);
            }
            slug_to_anchor.insert(
                slug.clone(),
                Anchor {
                    section_index: index,
                    line: heading.line,
                },
            );
            sections.push(Section {
                title: heading.title.clone(),
                slug,
                level: heading.level,
                line_start: heading.line,
                line_end: end,
                parent_index,
                children_indices: Vec::new(),
            });
        } else if let Some(section_index) = sections
            .iter()
            .rposition(|s| s.line_start < heading.line && s.line_end >= end)
        {
            slug_to_anchor.insert(
                slug.clone(),
                Anchor {
                    section_index,
                    line: heading.line,
                },
            );
            subsections.push(Subsection {
                title: heading.title.clone(),
                slug,
                level: heading.level,
                section_index,
                line_start: heading.line,
                line_end: end,
            });
        }
        // A deep heading before any section has no enclosing block to
        // expand, so it stays plain body text.
    }

    Ok(Outline {
        path: path.to_path_buf(),
        lines,
        sections,
        subsections,
        slug_to_anchor,
    })
}

fn parse_headings(content: &str) -> io::Result<Vec<Heading>> {
    let language: tree_sitter::Language = tree_sitter_md::LANGUAGE.into();
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let tree = parser
        .parse(content, None)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "markdown parse failed"))?;

    let query = tree_sitter::Query::new(&language, "(atx_heading) @heading")
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let mut cursor = tree_sitter::QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), content.as_bytes());

    let mut headings = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            let text = &content[node.byte_range()];
            let level = text.chars().take_while(|c| *c == '#').count();
            if level == 0 {
                continue;
            }
            let title = text.trim_start_matches('#').trim().to_string();
            headings.push(Heading {
                title,
                level,
                line: node.start_position().row,
            });
        }
    }
    headings.sort_by_key(|h| h.line);
    Ok(headings)
}

/// Generates anchor slugs, deduplicating repeats with numeric suffixes.
#[derive(Default)]
struct SlugSet {
    seen: HashMap<String, usize>,
}

impl SlugSet {
    fn claim(&mut self, title: &str) -> String {
        let mut base = String::new();
        for c in title.chars() {
            if c.is_alphanumeric() {
                base.extend(c.to_lowercase());
            } else if (c.is_whitespace() || c == '-' || c == '_') && !base.ends_with('-') {
                base.push('-');
            }
        }
        let base = base.trim_matches('-').to_string();
        let base = if base.is_empty() {
            "section".to_string()
        } else {
            base
        };

        let count = self.seen.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{base}-{}", *count - 1)
        }
    }
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;

//! Section and subsection records extracted from a manual's heading tree.
//!
//! A section is a top-level content block (an `#` or `##` heading plus the
//! body below it) that the viewer can expand and collapse as a unit. A
//! subsection is a deeper heading nested inside a section's body; subsections
//! are the units that fade in as they enter the viewport. Both carry source
//! line coordinates so the content pane can be laid out without re-parsing.

use serde::Serialize;

/// Top-level content block with a heading and an expandable body.
#[derive(Clone, Serialize)]
pub struct Section {
    /// Heading text without the `#` markers.
    pub title: String,
    /// Anchor id derived from the title, unique within the document.
    pub slug: String,
    /// Heading depth in the source (1 or 2).
    pub level: usize,
    /// Source line of the heading (0-based).
    pub line_start: usize,
    /// Source line where the next section begins or the file ends.
    pub line_end: usize,
    /// Index of the containing section, for `##` under a `#`.
    pub parent_index: Option<usize>,
    /// Indices of directly nested sections.
    pub children_indices: Vec<usize>,
}

/// Nested block inside a section that receives the scroll-in reveal.
#[derive(Clone, Serialize)]
pub struct Subsection {
    /// Heading text without the `#` markers.
    pub title: String,
    /// Anchor id derived from the title, unique within the document.
    pub slug: String,
    /// Heading depth in the source (3 or deeper).
    pub level: usize,
    /// Index of the enclosing section.
    pub section_index: usize,
    /// Source line of the heading (0-based).
    pub line_start: usize,
    /// Source line where the subsection's body ends.
    pub line_end: usize,
}

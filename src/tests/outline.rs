use super::{extract_outline, find_documents};
use std::fs;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

#[test]
fn test_extract_sections_and_subsections() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "# Manual\n\nIntro.\n\n## Setup\n\nSteps.\n\n### Requirements\n\nA list.\n\n## Usage\n\nText.\n"
    )
    .unwrap();

    let outline = extract_outline(file.path()).unwrap();

    let titles: Vec<&str> = outline.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["Manual", "Setup", "Usage"]);
    assert_eq!(outline.sections[0].level, 1);
    assert_eq!(outline.sections[1].level, 2);

    assert_eq!(outline.subsections.len(), 1);
    assert_eq!(outline.subsections[0].title, "Requirements");
    assert_eq!(
        outline.subsections[0].section_index, 1,
        "subsection should attach to the enclosing section"
    );

    assert_eq!(outline.sections[1].parent_index, Some(0));
    assert_eq!(outline.sections[0].children_indices, vec![1, 2]);

    assert_eq!(outline.title(), "Manual");
}

#[test]
fn test_slugs_resolve_and_deduplicate() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "## Setup\n\nFirst.\n\n## Setup\n\nSecond.\n\n### API & Tokens!\n\nBody.\n"
    )
    .unwrap();

    let outline = extract_outline(file.path()).unwrap();

    assert_eq!(outline.sections[0].slug, "setup");
    assert_eq!(outline.sections[1].slug, "setup-1");
    assert_eq!(outline.subsections[0].slug, "api-tokens");

    let anchor = outline.resolve("setup-1").unwrap();
    assert_eq!(anchor.section_index, 1);
    assert_eq!(anchor.line, outline.sections[1].line_start);

    // A subsection slug resolves to its enclosing section.
    let anchor = outline.resolve("api-tokens").unwrap();
    assert_eq!(anchor.section_index, 1);

    assert!(outline.resolve("missing").is_none());
}

#[test]
fn test_section_line_ranges() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "## One\n\nA.\n\n## Two\n\nB.\n").unwrap();

    let outline = extract_outline(file.path()).unwrap();

    assert_eq!(outline.sections[0].line_start, 0);
    assert_eq!(
        outline.sections[0].line_end, 4,
        "first section should end where the second begins"
    );
    assert_eq!(outline.sections[1].line_end, outline.lines.len());
}

#[test]
fn test_subsections_of_groups_by_section() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "## A\n\n### A1\n\nx\n\n### A2\n\ny\n\n## B\n\n### B1\n\nz\n"
    )
    .unwrap();

    let outline = extract_outline(file.path()).unwrap();

    assert_eq!(outline.subsections_of(0), vec![0, 1]);
    assert_eq!(outline.subsections_of(1), vec![2]);
}

#[test]
fn test_find_documents_filters_by_extension() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("guide.md"), "# Guide\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "plain\n").unwrap();
    let nested = dir.path().join("chapters");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("intro.md"), "# Intro\n").unwrap();

    let exts = vec!["md".to_string()];
    let found = find_documents(vec![dir.path().to_path_buf()], &exts).unwrap();

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|p| p.extension().unwrap() == "md"));

    // Explicit file paths are taken as-is, whatever the extension.
    let txt = dir.path().join("notes.txt");
    let found = find_documents(vec![txt.clone()], &exts).unwrap();
    assert_eq!(found, vec![txt]);
}

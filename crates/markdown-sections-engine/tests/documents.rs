use markdown_sections_engine::{
    AddOptions, Document, DuplicateNameError, EditError, MarkdownFile, NameStyle, ParseOptions,
    RenderOptions, StructureError, TocOptions, parse_document, render,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

fn parse(text: &str) -> Result<Document, StructureError> {
    parse_document(text, &ParseOptions::default())
}

/// One line per section, indented by depth.
fn outline(doc: &Document) -> String {
    doc.sections()
        .map(|(id, section)| {
            format!(
                "{}{}",
                "  ".repeat(section.level() - 1),
                doc.display_name(id)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn child_names(doc: &Document, name: &str) -> Vec<String> {
    let id = doc.find(name).unwrap();
    doc[id]
        .children()
        .iter()
        .map(|&c| doc[c].name().to_string())
        .collect()
}

#[rstest]
#[case("notes", NameStyle::Verbatim)]
#[case("fenced", NameStyle::Verbatim)]
#[case("snake_case", NameStyle::SnakeCase)]
#[case("snake_case", NameStyle::Verbatim)]
fn render_then_parse_is_lossless(#[case] name: &str, #[case] style: NameStyle) {
    let options = ParseOptions::default().with_name_style(style);
    let doc = parse_document(&fixture(name), &options).unwrap();

    let text = render(&doc, &RenderOptions::default()).unwrap();
    let reparsed = parse_document(&text, &options).unwrap();

    assert_eq!(reparsed, doc);
    assert_eq!(render(&reparsed, &RenderOptions::default()).unwrap(), text);
}

#[rstest]
#[case("notes")]
#[case("fenced")]
#[case("snake_case")]
fn every_child_is_one_level_deeper(#[case] name: &str) {
    let doc = parse(&fixture(name)).unwrap();
    for (_, section) in doc.sections() {
        for &child in section.children() {
            assert_eq!(doc[child].level(), section.level() + 1);
        }
    }
    assert_eq!(doc.root().level(), 1);
}

#[test]
fn notes_outline() {
    let doc = parse(&fixture("notes")).unwrap();
    insta::assert_snapshot!(outline(&doc), @r"
    Project Notes
      Cache
        Default Prompts
          Create Agent
        Eviction
      Links
    ");
}

#[test]
fn notes_render_canonically() {
    let doc = parse(&fixture("notes")).unwrap();
    assert_eq!(
        render(&doc, &RenderOptions::default()).unwrap(),
        "# Project Notes\n\n\
         Some intro text\\\nthat wraps across lines.\n\n\
         ## Cache\n\n\
         Cached values live here.\n\n\
         ### Default Prompts\n\n\
         #### Create Agent\n\n\
         You are an agent.\\\nFollow instructions\\\nclosely.\n\n\
         ### Eviction\n\n\
         - least recently used\n- time based\n\n\
         ## Links\n\n\
         <!-- generated -->\nSee the wiki.\n\n"
    );
}

#[test]
fn continuation_markers_are_stripped_on_parse() {
    let doc = parse(&fixture("notes")).unwrap();
    let agent = doc.find("create agent").unwrap();
    assert_eq!(
        doc[agent].content(),
        "You are an agent.\nFollow instructions\nclosely."
    );
}

#[test]
fn fenced_headings_stay_content() {
    let doc = parse(&fixture("fenced")).unwrap();

    assert_eq!(child_names(&doc, "Snippets"), vec!["Shell", "Rust"]);
    assert_eq!(doc.find("still code"), None);

    let shell = doc.find("Shell").unwrap();
    assert!(doc[shell].content().contains("# this is a comment"));
    assert!(doc[shell].content().contains("echo hi \\\n  there"));

    let rust = doc.find("Rust").unwrap();
    assert!(doc[rust].content().ends_with("~~~\n\nTrailing text."));
}

#[test]
fn snake_case_paths_use_document_name() {
    let options = ParseOptions::default()
        .with_name_style(NameStyle::SnakeCase)
        .with_document_name("test");
    let doc = parse_document(&fixture("snake_case"), &options).unwrap();
    let agent = doc.find("Create Agent").unwrap();

    assert_eq!(doc[agent].name(), "create_agent");
    assert_eq!(doc.path(agent), "test/my_notes/default_prompts/create_agent");
    assert_eq!(doc.display_name(agent), "Create Agent");
}

#[test]
fn siblings_keep_order() {
    let doc = parse("# Doc\n\n## Alpha\n\n## Beta\n").unwrap();
    assert_eq!(child_names(&doc, "Doc"), vec!["Alpha", "Beta"]);
    for name in ["Alpha", "Beta"] {
        assert_eq!(doc[doc.find(name).unwrap()].level(), 2);
    }
}

#[test]
fn shallower_heading_returns_to_root() {
    let doc = parse("# Doc\n## One\n### Deep\n## Two\n").unwrap();
    let two = doc.find("Two").unwrap();
    assert_eq!(doc[two].parent(), Some(doc.root_id()));
    assert_eq!(child_names(&doc, "One"), vec!["Deep"]);
}

#[test]
fn skipped_level_fails() {
    assert!(matches!(
        parse("# Doc\n## One\n#### Deep\n"),
        Err(StructureError::IncorrectNesting { level: 4, .. })
    ));
}

#[test]
fn case_insensitive_duplicate_add_fails() {
    let mut doc = parse(&fixture("notes")).unwrap();
    let before = doc.clone();
    let root = doc.root_id();

    let err = doc
        .add_section(root, "cache", "again", AddOptions::default())
        .unwrap_err();

    assert_eq!(
        err,
        EditError::Duplicate(DuplicateNameError {
            name: "cache".into(),
            existing: "Cache".into(),
        })
    );
    assert_eq!(doc, before);
}

#[test]
fn table_of_contents_twice_leaves_one_first() {
    let mut doc = parse(&fixture("notes")).unwrap();
    let options = TocOptions::default();

    for _ in 0..2 {
        doc.insert_table_of_contents(&options).unwrap();
        assert_eq!(
            child_names(&doc, "Project Notes"),
            vec!["Table of Contents", "Cache", "Links"]
        );
        let tocs = doc
            .sections()
            .filter(|(_, s)| s.name() == "Table of Contents")
            .count();
        assert_eq!(tocs, 1);
    }

    let toc = doc.find("table of contents").unwrap();
    insta::assert_snapshot!(doc[toc].content(), @r"
    - [Project Notes](#project-notes)
      - [Cache](#cache)
        - [Default Prompts](#default-prompts)
          - [Create Agent](#create-agent)
        - [Eviction](#eviction)
      - [Links](#links)
    ");
}

#[test]
fn add_then_delete_restores_document() {
    let original = parse(&fixture("notes")).unwrap();
    let mut doc = original.clone();

    doc.add_section_by_name("Eviction", "Policies", "lru\nttl", AddOptions::default())
        .unwrap();
    assert_eq!(doc.len(), original.len() + 1);
    assert!(doc.delete_section("policies").unwrap());

    assert_eq!(doc, original);
    assert_eq!(
        render(&doc, &RenderOptions::default()).unwrap(),
        render(&original, &RenderOptions::default()).unwrap()
    );
}

#[test]
fn deleting_a_branch_drops_its_descendants_from_lookup() {
    let mut doc = parse(&fixture("notes")).unwrap();
    assert!(doc.delete_section("Cache").unwrap());

    for gone in ["Cache", "Default Prompts", "Create Agent", "Eviction"] {
        assert_eq!(doc.find(gone), None, "{gone} still indexed");
    }
    assert_eq!(child_names(&doc, "Project Notes"), vec!["Links"]);
    assert!(!doc.delete_section("Cache").unwrap());
}

#[test]
fn file_round_trip_keeps_front_matter_and_toc() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.md");
    std::fs::write(&path, format!("---\nowner: ops\n---\n{}", fixture("notes"))).unwrap();

    let file = MarkdownFile::open(&path, ParseOptions::default()).unwrap();
    file.save(&RenderOptions::default().with_toc(true)).unwrap();

    let reopened = MarkdownFile::open(&path, ParseOptions::default()).unwrap();
    let doc = reopened.document();
    assert_eq!(
        doc.front_matter()
            .and_then(|fm| fm.get("owner"))
            .and_then(|v| v.as_str()),
        Some("ops")
    );
    assert_eq!(
        child_names(doc, "Project Notes"),
        vec!["Table of Contents", "Cache", "Links"]
    );
    assert_eq!(doc.path(doc.find("Eviction").unwrap()), "notes/Project Notes/Cache/Eviction");
}

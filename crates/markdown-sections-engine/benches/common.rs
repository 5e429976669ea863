// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2

/// A document with `size` top-level sections, each holding a nested
/// subsection, a list, a wrapped paragraph and a code fence.
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let mut out = String::from("# Title\n\nIntro paragraph.\n\n");
    for i in 0..size {
        out.push_str(&format!(
            "## Section {i}\n\nParagraph with some content\nthat wraps onto a second line.\n\n- Bullet point\n  - Nested item\n- Another item\n\n### Detail {i}\n\n```rust\n# not a heading\nfn example() {{}}\n```\n\n"
        ));
    }
    out
}

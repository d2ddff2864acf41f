//! Relative link rewriting for composed markup files
//!
//! Composed files land one directory level deeper than they sit in their
//! origin repository, so relative links have to be prefixed with `../` to
//! keep pointing at their neighbors. Absolute links and pure anchor links
//! must survive untouched.
//!
//! The rewrites are plain text substitutions. Targets that must not be
//! rewritten are swapped for placeholder tokens first and restored after
//! the general rewrite has run. The tokens contain a NUL byte, which can
//! not occur in valid markup text.

/// Protects `](http...` targets during the Markdown rewrite.
const MD_ABSOLUTE: &str = "]\u{0}abs\u{0}";
/// Protects `](#...` anchor targets during the Markdown rewrite.
const MD_ANCHOR: &str = "]\u{0}anchor\u{0}";
/// Protects `image::http...` targets during the Asciidoc rewrite.
const ADOC_BLOCK_ABSOLUTE: &str = "\u{0}imgblockabs\u{0}";
/// Protects `image:http...` targets during the Asciidoc rewrite.
const ADOC_INLINE_ABSOLUTE: &str = "\u{0}imginlineabs\u{0}";
/// Holds rewritten `image::` macros out of reach of the `image:` rewrite.
const ADOC_BLOCK_RELATIVE: &str = "\u{0}imgblockrel\u{0}";

/// Prefix relative Markdown link targets with `../`.
///
/// `](http...)` and `](#...)` targets are left alone, every other `](`
/// target is moved one level up.
pub fn rewrite_markdown(content: &str) -> String {
    let mut text = content.replace("](http", MD_ABSOLUTE);
    text = text.replace("](#", MD_ANCHOR);
    text = text.replace("](", "](../");
    text = text.replace(MD_ABSOLUTE, "](http");
    text.replace(MD_ANCHOR, "](#")
}

/// Prefix relative Asciidoc image targets with `../`.
///
/// Handles both the block (`image::`) and inline (`image:`) macro forms.
/// `./`-prefixed targets are normalized first so they end up with exactly
/// one `../`. The block form contains the inline form as a substring, so
/// rewritten block macros are parked in a placeholder until the inline
/// rewrite has run.
pub fn rewrite_asciidoc(content: &str) -> String {
    let mut text = content.replace("image::./", "image::");
    text = text.replace("image:./", "image:");
    text = text.replace("image::http", ADOC_BLOCK_ABSOLUTE);
    text = text.replace("image:http", ADOC_INLINE_ABSOLUTE);
    text = text.replace("image::", ADOC_BLOCK_RELATIVE);
    text = text.replace("image:", "image:../");
    text = text.replace(ADOC_BLOCK_RELATIVE, "image::../");
    text = text.replace(ADOC_BLOCK_ABSOLUTE, "image::http");
    text.replace(ADOC_INLINE_ABSOLUTE, "image:http")
}

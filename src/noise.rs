//! Noise Filter
//!
//! Three passes over a parsed page:
//!
//! 1. structural strip: elements that never hold readable content are removed
//!    from the whole document;
//! 2. region strip: inside the content root, containers whose id/class names
//!    boilerplate (comments, share bars, menus...) are removed;
//! 3. line clean: the remaining text is split into lines and short, noisy or
//!    metadata-label lines are dropped.
//!
//! Passes 1 and 2 always finish matching before the first removal.

use dom_query::{Document, NodeRef, Selection};

use crate::dom;
use crate::options::Options;
use crate::patterns::{
    BLANK_LINE_RUN, METADATA_LABEL, NOISE_PHRASES, NOISE_REGION_HINTS, NOISE_REGION_SELECTOR,
    STRUCTURAL_NOISE_SELECTOR,
};

/// Remove script/style/header/footer/nav/aside/form/button/iframe/figure
/// elements from the whole document. Returns the number of matched elements.
pub fn strip_structural(doc: &Document) -> usize {
    let matched: Vec<NodeRef> = doc.select(STRUCTURAL_NOISE_SELECTOR).nodes().to_vec();
    dom::remove_all(&matched);
    matched.len()
}

/// Descendants of `root` whose id/class contains a boilerplate keyword, in
/// document order. Nothing is modified.
#[must_use]
pub fn collect_noise_regions<'a>(root: &Selection<'a>) -> Vec<NodeRef<'a>> {
    root.select(NOISE_REGION_SELECTOR)
        .nodes()
        .iter()
        .filter(|node| dom::has_keyword(&Selection::from(**node), NOISE_REGION_HINTS))
        .copied()
        .collect()
}

/// Remove boilerplate regions below `root`. Returns the number of matched
/// regions, including ones nested in other matches.
pub fn strip_noise_regions(root: &Selection) -> usize {
    let matched = collect_noise_regions(root);
    dom::remove_all(&matched);
    matched.len()
}

/// Whether a trimmed line should be dropped.
fn is_noise_line(line: &str, options: &Options) -> bool {
    line.chars().count() < options.min_line_len
        || NOISE_PHRASES.iter().any(|phrase| line.contains(phrase))
        || METADATA_LABEL.is_match(line)
}

/// Line-level cleanup of extracted text.
///
/// Runs of three or more line breaks collapse to one blank line, then every
/// line is trimmed and kept only if it is long enough, free of noise phrases
/// and not a metadata label. Surviving lines keep their order.
#[must_use]
pub fn clean_text(text: &str, options: &Options) -> String {
    let collapsed = BLANK_LINE_RUN.replace_all(text, "\n\n");

    collapsed
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_noise_line(line, options))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip boilerplate regions from the content root and return its cleaned text.
#[must_use]
pub fn clean_content_root(root: &Selection, options: &Options) -> String {
    strip_noise_regions(root);
    let raw = dom::text_with_separator(root, "\n");
    clean_text(&raw, options)
}

//! Candidate Locator
//!
//! Scores every block-level element by text density and picks the content
//! root. Link-heavy regions are penalised quadratically so navigation and
//! related-article lists lose against prose even when they carry more text.

use dom_query::{Document, NodeRef, Selection};

use crate::dom;
use crate::options::Options;
use crate::patterns::{CANDIDATE_SELECTOR, CONTENT_HINTS};

/// Tags that can never be a content root.
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "a"];

/// Scoring context for one candidate element.
#[derive(Clone, Copy)]
pub struct ScoredNode<'a> {
    /// The scored element.
    pub node: NodeRef<'a>,
    /// Visible text length in characters.
    pub text_length: usize,
    /// Share of the visible text that sits inside anchors.
    pub link_density: f64,
    /// Final score, 0 for rejected elements.
    pub score: f64,
}

/// Total visible text length of all anchors under `element`.
fn link_text_len(element: &Selection) -> usize {
    element
        .select("a")
        .nodes()
        .iter()
        .map(|link| dom::visible_text_len(&Selection::from(*link)))
        .sum()
}

/// Measure and score a single element.
///
/// Elements that cannot hold content, or whose visible text is shorter than
/// `options.min_block_len`, score 0.
#[must_use]
pub fn score_element<'a>(element: &Selection<'a>, options: &Options) -> Option<ScoredNode<'a>> {
    let node = *element.nodes().first()?;

    let tag = dom::tag_name(element).unwrap_or_default();
    if NON_CONTENT_TAGS.contains(&tag.as_str()) {
        return Some(ScoredNode { node, text_length: 0, link_density: 0.0, score: 0.0 });
    }

    let text_length = dom::visible_text_len(element);
    if text_length < options.min_block_len {
        return Some(ScoredNode { node, text_length, link_density: 0.0, score: 0.0 });
    }

    let link_length = link_text_len(element).min(text_length);
    let pure_text_length = (text_length - link_length) as f64;
    let link_density = link_length as f64 / text_length.max(1) as f64;

    let mut score = pure_text_length * (1.0 - link_density.powi(2));
    if dom::has_keyword(element, CONTENT_HINTS) {
        score *= options.content_hint_boost;
    }

    Some(ScoredNode { node, text_length, link_density, score })
}

/// Highest-scoring candidate, or `None` when nothing scores above 0.
///
/// Candidates are visited in document order and only a strictly greater score
/// replaces the current best, so ties go to the earlier element.
#[must_use]
pub fn best_candidate<'a>(doc: &'a Document, options: &Options) -> Option<ScoredNode<'a>> {
    let mut best: Option<ScoredNode<'a>> = None;

    for node in doc.select(CANDIDATE_SELECTOR).nodes() {
        let Some(scored) = score_element(&Selection::from(*node), options) else {
            continue;
        };
        let highest = best.map_or(0.0, |b| b.score);
        if scored.score > highest {
            best = Some(scored);
        }
    }

    best
}

/// Select the content root: the best candidate, else `<body>`, else the
/// whole document.
#[must_use]
pub fn find_content_root<'a>(doc: &'a Document, options: &Options) -> Selection<'a> {
    if let Some(best) = best_candidate(doc, options) {
        return Selection::from(best.node);
    }

    let body = doc.select("body");
    if body.exists() {
        return body;
    }
    Selection::from(doc.root())
}

//! Document Parser: section extraction for command/skill markdown documents.
//!
//! Documents follow a fixed convention: an optional leading metadata block
//! delimited by `---` lines, then a body whose recognized `## ` sections are
//! `Overview`, `Definitions`, `Prerequisites`, `Steps`, `Tools`, `Guidance`.
//! Additional headings are allowed and silently ignored.

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Recognized section heading names, in canonical document order.
pub const SECTION_NAMES: &[&str] = &[
    "Overview",
    "Definitions",
    "Prerequisites",
    "Steps",
    "Tools",
    "Guidance",
];

static SECTION_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n## ").expect("section split regex"));

// A digit run is a step marker only when its period is not the start of a
// decimal number ("0.1" in prose is not a step).
static STEP_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.([^0-9]|$)").expect("step number regex"));

static MCP_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"mcp_[A-Za-z0-9-]+_[A-Za-z0-9_]+").expect("mcp ref regex"));

/// The `Steps` section with its enumerated step markers.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Steps {
    /// Raw section body.
    pub content: String,
    /// Standalone list-marker integers found in the body, in order, all >= 1.
    pub numbers: Vec<u64>,
}

/// A command/skill document split into its recognized sections.
///
/// Section bodies never include the heading line and are trimmed of
/// surrounding blank lines; absent sections default to the empty string.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ParsedDocument {
    pub overview: String,
    pub definitions: String,
    pub prerequisites: String,
    pub steps: Steps,
    pub tools: String,
    pub guidance: String,
    /// Distinct `mcp_<server>_<tool>` tokens in first-occurrence order,
    /// present only when at least one token was found anywhere in the text.
    #[serde(rename = "mcpRefs", skip_serializing_if = "Option::is_none")]
    pub mcp_refs: Option<Vec<String>>,
}

/// Strip a leading `---`-delimited metadata block.
///
/// Returns the text unchanged when there is no leading delimiter line, or when
/// the opening delimiter has no closing counterpart.
pub fn strip_metadata_block(text: &str) -> &str {
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return text;
    };
    if first.trim_end() != "---" {
        return text;
    }
    let mut offset = first.len();
    for line in lines {
        offset += line.len();
        if line.trim_end() == "---" {
            return &text[offset..];
        }
    }
    text
}

/// Parse a document body into its recognized sections.
///
/// Splits on second-level heading boundaries; the first line of each segment
/// (trimmed) is the candidate section name and the remainder (trimmed) its
/// body. Unrecognized names are ignored; a repeated recognized name
/// overwrites the earlier occurrence. Reference tokens are extracted from the
/// entire input, not just the sections.
pub fn parse(text: &str) -> ParsedDocument {
    let mut doc = ParsedDocument::default();

    let chunks: Vec<&str> = SECTION_SPLIT_RE.split(text).collect();
    for part in chunks.iter().skip(1) {
        let (name, body) = match part.find('\n') {
            Some(idx) => (part[..idx].trim(), part[idx + 1..].trim()),
            None => (part.trim(), ""),
        };
        match name {
            "Overview" => doc.overview = body.to_string(),
            "Definitions" => doc.definitions = body.to_string(),
            "Prerequisites" => doc.prerequisites = body.to_string(),
            "Steps" => {
                doc.steps = Steps {
                    content: body.to_string(),
                    numbers: extract_step_numbers(body),
                }
            }
            "Tools" => doc.tools = body.to_string(),
            "Guidance" => doc.guidance = body.to_string(),
            _ => {}
        }
    }

    let refs = extract_refs(text);
    if !refs.is_empty() {
        doc.mcp_refs = Some(refs);
    }

    doc
}

/// Extract standalone step-marker integers (`1.`, `2.` ...), values >= 1.
pub fn extract_step_numbers(content: &str) -> Vec<u64> {
    STEP_NUMBER_RE
        .captures_iter(content)
        .filter_map(|caps| caps[1].parse::<u64>().ok())
        .filter(|n| *n >= 1)
        .collect()
}

/// Extract distinct reference tokens in first-occurrence order.
pub fn extract_refs(text: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for m in MCP_REF_RE.find_iter(text) {
        if seen.insert(m.as_str()) {
            out.push(m.as_str().to_string());
        }
    }
    out
}

/// The compiled reference-token pattern, shared with the reference checker.
pub fn mcp_ref_pattern() -> &'static Regex {
    &MCP_REF_RE
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# create-plan\n\n\
        ## Overview\n\nCreate a plan.\n\n\
        ## Definitions\n\nPlan: a plan.\n\n\
        ## Prerequisites\n\nNone.\n\n\
        ## Steps\n\n1. Call mcp_github_list_commits.\n2. Review.\n\n\
        ## Tools\n\n- mcp_github_list_commits\n\n\
        ## Guidance\n\nBe careful.\n";

    #[test]
    fn parses_all_six_sections() {
        let doc = parse(SAMPLE);
        assert_eq!(doc.overview, "Create a plan.");
        assert_eq!(doc.definitions, "Plan: a plan.");
        assert_eq!(doc.prerequisites, "None.");
        assert_eq!(doc.tools, "- mcp_github_list_commits");
        assert_eq!(doc.guidance, "Be careful.");
        assert_eq!(doc.steps.numbers, vec![1, 2]);
    }

    #[test]
    fn unrecognized_headings_are_ignored() {
        let doc = parse("# doc\n\n## Overview\n\nBody.\n\n## Extra Notes\n\nIgnored.\n");
        assert_eq!(doc.overview, "Body.");
        assert_eq!(doc.definitions, "");
    }

    #[test]
    fn repeated_heading_last_wins() {
        let doc = parse("# doc\n\n## Overview\n\nFirst.\n\n## Overview\n\nSecond.\n");
        assert_eq!(doc.overview, "Second.");
    }

    #[test]
    fn heading_at_end_of_document_has_empty_body() {
        let doc = parse("# doc\n\n## Overview\n\nBody.\n\n## Guidance");
        assert_eq!(doc.guidance, "");
    }

    #[test]
    fn decimal_numbers_in_prose_are_not_steps() {
        let numbers = extract_step_numbers("1. step one\n0.1 not a step\n2. step two");
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn step_marker_at_end_of_content_is_counted() {
        assert_eq!(extract_step_numbers("3."), vec![3]);
    }

    #[test]
    fn refs_deduplicate_in_first_seen_order() {
        let refs = extract_refs(
            "mcp_github_list_commits then mcp_ado_wit_get then mcp_github_list_commits",
        );
        assert_eq!(refs, vec!["mcp_github_list_commits", "mcp_ado_wit_get"]);
    }

    #[test]
    fn ref_extraction_is_idempotent() {
        let refs = extract_refs(SAMPLE);
        let again = extract_refs(&refs.join("\n"));
        assert_eq!(refs, again);
    }

    #[test]
    fn mcp_refs_absent_when_no_token_found() {
        let doc = parse("# doc\n\n## Overview\n\nNothing to reference.\n");
        assert!(doc.mcp_refs.is_none());
        let value = serde_json::to_value(&doc).expect("serialize");
        assert!(value.get("mcpRefs").is_none());
    }

    #[test]
    fn metadata_block_is_stripped() {
        let text = "---\nname: demo\ndescription: A demo\n---\n## Overview\n\nBody.\n";
        assert_eq!(strip_metadata_block(text), "## Overview\n\nBody.\n");
    }

    #[test]
    fn unclosed_metadata_block_is_left_in_place() {
        let text = "---\nname: demo\n## Overview\n\nBody.\n";
        assert_eq!(strip_metadata_block(text), text);
    }

    #[test]
    fn document_without_metadata_is_unchanged() {
        let text = "## Overview\n\nBody.\n";
        assert_eq!(strip_metadata_block(text), text);
    }
}

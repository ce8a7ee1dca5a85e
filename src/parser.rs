//! Doc comment extractor: turns `/** ... */` blocks into [`Block`]s.
//!
//! Tag lines follow the usual jsdoc shape:
//!
//! ```text
//! @tag {Type} [name=default] description
//! ```
//!
//! Lines that do not start with `@` continue the description of the
//! preceding tag, or of the block when no tag has been seen yet.

use crate::model::{Block, Tag};
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*\*(.*?)\*/").unwrap());

// Leading `*` gutter plus at most one separating blank
static RE_GUTTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]*\*?[[:blank:]]?").unwrap());

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([[:alpha:]][\w.-]*)[[:blank:]]*(.*)$").unwrap());

// -- Public API ---------------------------------------------------------------

/// Extract every doc comment in `source`, in source order.
pub fn parse(source: &str) -> Vec<Block> {
    RE_BLOCK
        .captures_iter(source)
        .map(|caps| parse_block(&caps[1]))
        .filter(|block| !block.description.is_empty() || !block.tags.is_empty())
        .collect()
}

// -- Block processing ---------------------------------------------------------

/// A tag line plus its continuation lines.
struct Pending {
    tag: Tag,
    lines: Vec<String>,
}

impl Pending {
    fn finish(mut self) -> Tag {
        let rest = unindent(&self.lines.join("\n"));
        let rest = rest.trim_end();
        if !rest.is_empty() {
            if !self.tag.description.is_empty() {
                self.tag.description.push('\n');
            }
            self.tag.description.push_str(rest);
        }
        self.tag
    }
}

fn parse_block(body: &str) -> Block {
    let mut description: Vec<String> = Vec::new();
    let mut tags: Vec<Tag> = Vec::new();
    let mut current: Option<Pending> = None;

    for raw in body.lines() {
        let line = RE_GUTTER.replace(raw, "");
        let line = line.trim_end();

        if let Some(caps) = RE_TAG.captures(line.trim_start()) {
            if let Some(pending) = current.take() {
                tags.push(pending.finish());
            }
            current = Some(Pending {
                tag: parse_tag(&caps[1], &caps[2]),
                lines: Vec::new(),
            });
            continue;
        }

        match current {
            Some(ref mut pending) => pending.lines.push(line.to_string()),
            None => description.push(line.to_string()),
        }
    }

    if let Some(pending) = current.take() {
        tags.push(pending.finish());
    }

    let description = unindent(&description.join("\n")).trim().to_string();
    Block { description, tags }
}

/// Parse the text after `@id` into type, name and description.
fn parse_tag(id: &str, rest: &str) -> Tag {
    let mut tag = Tag::new(id, "");
    let rest = rest.trim();

    let rest = match split_type(rest) {
        Some((ty, after)) => {
            tag.ty = Some(ty.trim().to_string());
            after.trim_start()
        }
        None => rest,
    };

    let rest = if let Some(inner) = rest.strip_prefix('[') {
        match inner.find(']') {
            Some(close) => {
                let inside = &inner[..close];
                match inside.split_once('=') {
                    Some((name, value)) => {
                        tag.name = name.trim().to_string();
                        tag.default = Some(value.trim().to_string());
                    }
                    None => tag.name = inside.trim().to_string(),
                }
                tag.optional = true;
                &inner[close + 1..]
            }
            None => {
                tag.name = rest.to_string();
                ""
            }
        }
    } else {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        tag.name = rest[..end].to_string();
        &rest[end..]
    };

    tag.description = rest.trim().to_string();
    tag
}

/// Split a leading `{...}` type annotation, honoring nested braces.
fn split_type(text: &str) -> Option<(&str, &str)> {
    if !text.starts_with('{') {
        return None;
    }
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&text[1..i], &text[i + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}

/// Remove common leading indentation from a multi-line string.
fn unindent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    // Find first non-empty line
    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };

    let min_indent = lines[start..]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches(|c: char| c == ' ' || c == '\t').len())
        .min()
        .unwrap_or(0);

    lines[start..]
        .iter()
        .map(|l| if l.len() >= min_indent { &l[min_indent..] } else { l.trim_start() })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_description_and_tags() {
        let src = "/**\n *  Create a new component.\n *\n *  @function create\n */\nfunction create() {}\n";
        let blocks = parse(src);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].description, "Create a new component.");
        assert_eq!(blocks[0].tags, vec![Tag::new("function", "create")]);
    }

    #[test]
    fn ignores_plain_comments() {
        let src = "/* not docs */\n// nor this\n/** @function a */";
        let blocks = parse(src);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].tags[0].name, "a");
    }

    #[test]
    fn tag_with_type_and_optional_name() {
        let tag = parse_tag("param", "{Object} [opts] An options arguments.");
        assert_eq!(tag.ty.as_deref(), Some("Object"));
        assert_eq!(tag.name, "opts");
        assert!(tag.optional);
        assert_eq!(tag.description, "An options arguments.");
    }

    #[test]
    fn tag_with_default_value() {
        let tag = parse_tag("param", "{Number} [level=1] Heading level.");
        assert_eq!(tag.name, "level");
        assert_eq!(tag.default.as_deref(), Some("1"));
        assert!(tag.optional);
    }

    #[test]
    fn tag_with_nested_braces() {
        let tag = parse_tag("param", "{{a: Number}} point A point.");
        assert_eq!(tag.ty.as_deref(), Some("{a: Number}"));
        assert_eq!(tag.name, "point");
    }

    #[test]
    fn bare_tag() {
        let tag = parse_tag("member", "");
        assert_eq!(tag, Tag::new("member", ""));
    }

    #[test]
    fn tag_continuation_lines() {
        let src = "/**\n *  @usage var parse = require('mdapi');\n *  parse(['index.js']);\n */";
        let blocks = parse(src);
        let usage = &blocks[0].tags[0];
        assert_eq!(usage.name, "var");
        assert_eq!(usage.description, "parse = require('mdapi');\nparse(['index.js']);");
    }

    #[test]
    fn description_keeps_relative_indent() {
        let src = "/**\n *  if (a) {\n *    b();\n *  }\n *\n *  @usage\n */";
        let blocks = parse(src);
        assert_eq!(blocks[0].description, "if (a) {\n  b();\n}");
        assert_eq!(blocks[0].tags, vec![Tag::new("usage", "")]);
    }

    #[test]
    fn inline_at_is_not_a_tag() {
        let src = "/**\n *  Using the @module tag sets the title.\n *  @module API\n */";
        let blocks = parse(src);
        assert_eq!(blocks[0].description, "Using the @module tag sets the title.");
        assert_eq!(blocks[0].tags.len(), 1);
    }

    #[test]
    fn unindent_basic() {
        assert_eq!(unindent("  a\n  b\n  c"), "a\nb\nc");
        assert_eq!(unindent("  a\n    b\n  c"), "a\n  b\nc");
        assert_eq!(unindent("\n  a\n  b"), "a\nb");
    }
}

//! Markdown fragment formatters.
//!
//! Every function here is pure: output depends only on the arguments, so
//! the renderers can be reasoned about fragment by fragment.

use crate::comment::{Comment, Info};
use crate::conf::Cues;
use crate::model::Tag;
use regex::Regex;
use std::sync::LazyLock;

static RE_PROTOCOL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w+://").unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Heading title and code signature for a callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub title: String,
    pub signature: String,
}

/// `## text`
pub fn heading(text: &str, level: usize) -> String {
    debug_assert!(level >= 1, "heading level must be at least 1");
    format!("{} {}", "#".repeat(level), text)
}

/// A fenced code block, with an info string when `lang` is set.
pub fn fenced(code: &str, lang: Option<&str>) -> String {
    format!("```{}\n{}\n```", lang.unwrap_or(""), code)
}

/// Metadata list item: `* **Author** `muji``
pub fn meta(tag: &Tag, title: &str) -> String {
    format!("* **{}** `{}`", title, tag.text())
}

/// Deprecation notice quote.
pub fn deprecated(tag: &Tag, title: &str) -> String {
    let text = tag.text();
    if text.is_empty() {
        format!("> **{}**", title)
    } else {
        format!("> **{}:** {}", title, text)
    }
}

/// Parameter list in parentheses; optional parameters are bracketed
/// together with their leading separator, e.g. `(a[, b])`.
pub fn signature(params: &[&Tag]) -> String {
    let mut sig = String::from("(");
    for (index, param) in params.iter().enumerate() {
        if param.optional {
            sig.push('[');
        }
        if index > 0 {
            sig.push_str(", ");
        }
        sig.push_str(&param.name);
        if param.optional {
            sig.push(']');
        }
    }
    sig.push(')');
    sig
}

/// Parameter list item: `* `name` Type=default description`
pub fn parameter(tag: &Tag) -> String {
    let mut item = format!("* `{}`", tag.name);
    if let Some(ref ty) = tag.ty {
        item.push(' ');
        item.push_str(ty);
        if let Some(ref value) = tag.default {
            item.push('=');
            item.push_str(value);
        }
    }
    if !tag.description.is_empty() {
        item.push(' ');
        item.push_str(&tag.description);
    }
    item
}

/// `Returns <name> <description>`
pub fn returns(comment: &Comment<'_>, tag: &Tag, title: &str) -> String {
    let text = comment.describe(tag, Some(true));
    if text.is_empty() {
        title.to_string()
    } else {
        format!("{} {}", title, text)
    }
}

/// Link list item for a `@see` tag. The visible text never shows a scheme.
pub fn link(tag: &Tag) -> String {
    let url = &tag.name;
    let text = if tag.description.is_empty() { url } else { &tag.description };
    let text = RE_PROTOCOL.replace(text, "");
    if tag.description.is_empty() {
        format!("* [{}]({})", text, url)
    } else {
        format!("* [{}]({} \"{}\")", text, url, tag.description)
    }
}

/// Access modifier prefix, e.g. `public static `; empty when none apply.
pub fn access(info: &Info<'_>) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(tag) = info.is_public.or(info.is_protected).or(info.is_private) {
        parts.push(&tag.id);
    }
    if let Some(tag) = info.is_static {
        parts.push(&tag.id);
    }
    if let Some(tag) = info.is_read_only {
        parts.push(&tag.id);
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("{} ", parts.join(" "))
    }
}

/// Declaration line for a property, e.g. `static const String ZAR = foo;`
pub fn property(tag: &Tag, info: &Info<'_>) -> String {
    let mut decl = tag.name.clone();
    if let Some(ref ty) = tag.ty {
        decl = format!("{} {}", ty, decl);
    }
    if let Some(value) = info.value {
        decl = format!("{} = {};", decl, value.text());
    }
    if info.is_constant.is_some() {
        decl = format!("const {}", decl);
    }
    format!("{}{}", access(info), decl)
}

/// Title with its ancestor chain, e.g. `Component < EventEmitter < Object`.
///
/// The `@inherits` tag's name is the direct parent; further ancestors are
/// listed whitespace-separated in its description.
pub fn inherits(tag: &Tag, info: &Info<'_>, cues: &Cues) -> String {
    let Some(parent) = info.inherits else {
        return tag.name.clone();
    };
    let mut chain = vec![tag.name.as_str()];
    chain.extend(
        std::iter::once(parent.name.as_str())
            .chain(RE_WHITESPACE.split(parent.description.trim()))
            .filter(|s| !s.is_empty()),
    );
    chain.join(cues.inherits.as_str())
}

/// Heading title and code signature for a function or constructor.
///
/// `title` overrides the plain name, e.g. with an inheritance chain.
pub fn method(tag: &Tag, info: &Info<'_>, title: Option<&str>, cues: &Cues) -> Method {
    let base = title.unwrap_or(&tag.name);
    let title = if info.is_static.is_some() {
        format!("{}{}", cues.statics, base)
    } else if info.is_member.is_some() {
        format!("{}{}", cues.member, base)
    } else {
        base.to_string()
    };

    let mut signature = if info.is_constructor {
        format!("new {}", tag.name)
    } else {
        match (&info.owner, info.is_static) {
            (Some(owner), None) if info.is_member.is_some() => {
                format!("{}.prototype.{}", owner, tag.name)
            }
            _ => tag.name.clone(),
        }
    };

    if !info.is_constructor {
        signature = format!("{}{}", access(info), signature);
    }

    Method { title, signature }
}

/// List of `@todo` items: `* `TYPE` text`
pub fn todo(items: &[&Tag]) -> String {
    items
        .iter()
        .map(|item| format!("* `{}` {}", item.ty.as_deref().unwrap_or("TODO"), item.text()))
        .collect::<Vec<_>>()
        .join("\n")
}

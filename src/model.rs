//! Data model for parsed comment blocks, as produced by the extractor.

use serde::{Deserialize, Serialize};

/// A single annotation inside a comment block, e.g. `@param {String} [name] The name.`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag identifier without the `@`, e.g. `param`
    #[serde(rename = "tag")]
    pub id: String,
    /// First token after the tag (and after the type, if any)
    #[serde(default)]
    pub name: String,
    /// Contents of a `{...}` type annotation
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Name was written as `[name]`
    #[serde(default)]
    pub optional: bool,
    /// Default from `[name=value]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Tag {
    /// Create a tag with an id and a name, everything else empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Tag {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// `name` followed by `description`, single-spaced.
    pub fn text(&self) -> String {
        match (self.name.is_empty(), self.description.is_empty()) {
            (true, _) => self.description.clone(),
            (false, true) => self.name.clone(),
            (false, false) => format!("{} {}", self.name, self.description),
        }
    }
}

/// One parsed doc comment: the prose before the first tag plus its tags in
/// source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Block {
    pub fn new(description: impl Into<String>, tags: Vec<Tag>) -> Self {
        Block {
            description: description.into(),
            tags,
        }
    }
}

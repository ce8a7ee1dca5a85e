//! Tag resolution over a single comment block.
//!
//! A [`Comment`] wraps a parsed [`Block`] and answers the questions the
//! renderers ask: which tag decides what this block documents, what it is
//! called, and which modifier flags apply.

use crate::conf;
use crate::model::{Block, Tag};
use crate::registry::Registry;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;

/// The category a comment block documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Module,
    Class,
    Constructor,
    Function,
    Property,
    /// A tag registered at runtime
    Custom(String),
}

impl Kind {
    /// Built-in kind for a canonical tag id.
    pub fn builtin(id: &str) -> Option<Kind> {
        match id {
            conf::MODULE => Some(Kind::Module),
            conf::CLASS => Some(Kind::Class),
            conf::CONSTRUCTOR => Some(Kind::Constructor),
            conf::FUNCTION => Some(Kind::Function),
            conf::PROPERTY => Some(Kind::Property),
            _ => None,
        }
    }

    pub fn from_id(id: &str) -> Kind {
        Kind::builtin(id).unwrap_or_else(|| Kind::Custom(id.to_string()))
    }

    pub fn id(&self) -> &str {
        match self {
            Kind::Module => conf::MODULE,
            Kind::Class => conf::CLASS,
            Kind::Constructor => conf::CONSTRUCTOR,
            Kind::Function => conf::FUNCTION,
            Kind::Property => conf::PROPERTY,
            Kind::Custom(id) => id,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Name and category resolved for a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    /// Tag supplying the identifier
    pub name: Tag,
    /// Tag establishing the category; its `name` is always populated
    pub ty: Tag,
    pub kind: Kind,
}

/// Modifier flags for a block. Tag-valued flags point at the tag that set them.
#[derive(Debug, Clone, Default)]
pub struct Info<'c> {
    pub is_module: bool,
    pub is_class: bool,
    pub is_static: Option<&'c Tag>,
    pub is_constant: Option<&'c Tag>,
    pub is_private: Option<&'c Tag>,
    pub is_public: Option<&'c Tag>,
    pub is_protected: Option<&'c Tag>,
    pub is_read_only: Option<&'c Tag>,
    pub is_member: Option<&'c Tag>,
    /// Owner qualifying a member, from `@member Owner` or the current class
    pub owner: Option<String>,
    pub inherits: Option<&'c Tag>,
    /// Callable only
    pub is_constructor: bool,
    /// Callable only
    pub returns: Option<&'c Tag>,
    /// Data property only
    pub value: Option<&'c Tag>,
}

pub struct Comment<'r> {
    block: Block,
    registry: &'r Registry,
    /// canonical tag id -> indices into `block.tags`
    cache: OnceCell<HashMap<String, Vec<usize>>>,
}

impl fmt::Debug for Comment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comment").field("block", &self.block).finish()
    }
}

impl<'r> Comment<'r> {
    pub fn new(block: Block, registry: &'r Registry) -> Self {
        Comment {
            block,
            registry,
            cache: OnceCell::new(),
        }
    }

    pub fn description(&self) -> &str {
        &self.block.description
    }

    /// Block prose, or nothing when a bare `@usage` claims it as code.
    pub fn prose(&self) -> &str {
        let claimed = self.collect(conf::USAGE).iter().any(|tag| tag.text().is_empty());
        if claimed {
            ""
        } else {
            &self.block.description
        }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.block.tags
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Tag lookup map, built on first use.
    pub fn cache(&self) -> &HashMap<String, Vec<usize>> {
        self.cache.get_or_init(|| {
            let mut map: HashMap<String, Vec<usize>> = HashMap::new();
            for (i, tag) in self.block.tags.iter().enumerate() {
                let id = self.registry.canonical(&tag.id);
                map.entry(id.to_string()).or_default().push(i);
            }
            map
        })
    }

    /// The last tag with this id. Later tags override earlier ones.
    pub fn find(&self, id: &str) -> Option<&Tag> {
        self.cache()
            .get(id)
            .and_then(|indices| indices.last())
            .map(|&i| &self.block.tags[i])
    }

    /// Every tag with this id, in source order.
    pub fn collect(&self, id: &str) -> Vec<&Tag> {
        self.cache()
            .get(id)
            .map(|indices| indices.iter().map(|&i| &self.block.tags[i]).collect())
            .unwrap_or_default()
    }

    /// Whether the block carries the configured exclude tag.
    pub fn is_excluded(&self) -> bool {
        self.find(&self.registry.conf.exclude).is_some()
    }

    /// Resolve the block's name and category.
    ///
    /// `names` lists extra tag ids accepted as the category when no
    /// built-in or shorthand tag applies. Returns `None` when either the
    /// category or the name cannot be resolved.
    pub fn get_detail(&self, names: &[&str]) -> Option<Detail> {
        let mut name = self.find(conf::NAME).cloned();

        let mut ty = conf::TYPES
            .iter()
            .find_map(|id| self.find(id))
            .cloned()
            .or_else(|| self.shorthand_type(names))
            .or_else(|| names.iter().find_map(|id| self.find(id)).cloned())?;

        if ty.name.is_empty() {
            if let Some(name) = &name {
                ty.name = name.name.clone();
            }
        } else if name.is_none() {
            name = Some(Tag::new(conf::NAME, ty.name.clone()));
        }

        let name = name.filter(|n| !n.name.is_empty())?;
        if ty.name.is_empty() {
            return None;
        }

        let kind = Kind::from_id(self.registry.canonical(&ty.id));
        Some(Detail { name, ty, kind })
    }

    /// Synthesize a category tag from the first shorthand tag that implies
    /// one, e.g. `@static factory` or `@name {function} create`.
    fn shorthand_type(&self, names: &[&str]) -> Option<Tag> {
        self.registry.conf.shorthand.iter().find_map(|shorthand| {
            let tag = self.find(&shorthand.id)?;
            let declared = tag.ty.as_deref().and_then(|ty| {
                let lower = ty.to_ascii_lowercase();
                let canonical = self.registry.canonical(&lower);
                if conf::TYPES.contains(&canonical) {
                    return Some(canonical.to_string());
                }
                names.iter().copied().find(|id| *id == ty).map(str::to_string)
            });
            let keep_type = declared.is_none();
            let id = declared.or_else(|| shorthand.fallback.clone())?;
            Some(Tag {
                id,
                name: tag.name.clone(),
                ty: if keep_type { tag.ty.clone() } else { None },
                description: tag.description.clone(),
                optional: false,
                default: None,
            })
        })
    }

    /// Resolve modifier flags.
    ///
    /// `Some(true)` adds the callable flags (`is_constructor`, `returns`),
    /// `Some(false)` adds the property flag (`value`), `None` adds neither.
    pub fn get_info(&self, callable: Option<bool>) -> Info<'_> {
        let is_member = self.find(conf::MEMBER);
        let mut info = Info {
            is_module: self.find(conf::MODULE).is_some(),
            is_class: self.find(conf::CLASS).is_some(),
            is_static: self.find(conf::STATIC),
            is_constant: self.find(conf::CONSTANT),
            is_private: self.find(conf::PRIVATE),
            is_public: self.find(conf::PUBLIC),
            is_protected: self.find(conf::PROTECTED),
            is_read_only: self.find(conf::READONLY),
            is_member,
            owner: is_member
                .filter(|m| !m.name.is_empty())
                .map(|m| m.name.clone()),
            inherits: self.find(conf::INHERITS),
            ..Default::default()
        };
        match callable {
            Some(true) => {
                info.is_constructor = self.find(conf::CONSTRUCTOR).is_some();
                info.returns = self.find(conf::RETURNS);
            }
            Some(false) => info.value = self.find(conf::DEFAULT),
            None => {}
        }
        info
    }

    /// Description text for a block.
    ///
    /// With `mode` unset the block's own prose wins when present. Otherwise
    /// `Some(false)` yields the tag's description and `Some(true)` the tag's
    /// name and description together, as used for `@returns`.
    pub fn describe(&self, tag: &Tag, mode: Option<bool>) -> String {
        if mode.is_none() && !self.prose().is_empty() {
            return self.prose().to_string();
        }
        if mode.unwrap_or(false) {
            tag.text()
        } else {
            tag.description.clone()
        }
    }

    /// Code examples from `@usage` tags. A bare `@usage` uses the block's
    /// prose as the example.
    pub fn usage(&self) -> Vec<String> {
        self.collect(conf::USAGE)
            .into_iter()
            .map(|tag| {
                let text = tag.text();
                if text.is_empty() {
                    self.block.description.clone()
                } else {
                    text
                }
            })
            .filter(|code| !code.is_empty())
            .collect()
    }
}

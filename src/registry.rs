//! Explicit tag and renderer registry.
//!
//! A [`Registry`] is built once and passed by reference into every render.
//! Custom tags registered here are picked up by comment resolution, and
//! custom routines are dispatched by tag id next to the built-in ones.
//! Independent registries never share state.

use crate::comment::Comment;
use crate::conf::{self, Conf};
use crate::error::Error;
use crate::model::Tag;
use crate::render::Context;
use std::collections::HashMap;
use std::fmt;

/// A routine that renders one comment block.
///
/// Returning is the completion signal: `Ok(())` once all fragments are
/// written, `Err` to abort the document.
pub trait TagRenderer {
    fn render(&self, cx: &mut Context<'_>, tag: &Tag, comment: &Comment<'_>) -> Result<(), Error>;
}

impl<F> TagRenderer for F
where
    F: Fn(&mut Context<'_>, &Tag, &Comment<'_>) -> Result<(), Error>,
{
    fn render(&self, cx: &mut Context<'_>, tag: &Tag, comment: &Comment<'_>) -> Result<(), Error> {
        self(cx, tag, comment)
    }
}

/// A registered tag definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDef {
    pub name: String,
    pub synonyms: Vec<String>,
}

pub struct Registry {
    pub conf: Conf,
    /// synonym -> canonical id
    synonyms: HashMap<String, String>,
    /// Registered tags in registration order
    tags: Vec<TagDef>,
    renderers: HashMap<String, Box<dyn TagRenderer>>,
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new(Conf::default())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderers: Vec<&String> = self.renderers.keys().collect();
        renderers.sort();
        f.debug_struct("Registry")
            .field("conf", &self.conf)
            .field("tags", &self.tags)
            .field("renderers", &renderers)
            .finish()
    }
}

impl Registry {
    pub fn new(conf: Conf) -> Self {
        let synonyms = conf::SYNONYMS
            .iter()
            .map(|(synonym, canonical)| (synonym.to_string(), canonical.to_string()))
            .collect();
        Registry {
            conf,
            synonyms,
            tags: Vec::new(),
            renderers: HashMap::new(),
        }
    }

    /// Register a tag id and its synonyms.
    ///
    /// Registering the same id again replaces the earlier definition,
    /// synonyms included, but keeps its position in the custom scan order.
    pub fn register_tag(&mut self, id: &str, synonyms: &[&str]) -> &TagDef {
        let def = TagDef {
            name: id.to_string(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        };
        if let Some(previous) = self.tag(id).cloned() {
            for synonym in &previous.synonyms {
                if self.synonyms.get(synonym).is_some_and(|c| c == id) {
                    self.synonyms.remove(synonym);
                }
            }
        }
        for synonym in &def.synonyms {
            self.synonyms.insert(synonym.clone(), def.name.clone());
        }
        let index = match self.tags.iter().position(|t| t.name == id) {
            Some(index) => {
                self.tags[index] = def;
                index
            }
            None => {
                self.tags.push(def);
                self.tags.len() - 1
            }
        };
        &self.tags[index]
    }

    /// Register a render routine for a tag id. The last registration wins.
    pub fn register_renderer<F>(&mut self, id: &str, routine: F) -> &mut Self
    where
        F: Fn(&mut Context<'_>, &Tag, &Comment<'_>) -> Result<(), Error> + 'static,
    {
        self.register_routine(id, routine)
    }

    /// Register any [`TagRenderer`] implementation for a tag id.
    ///
    /// An id that is neither built in nor registered as a tag is registered
    /// too, without synonyms, so blocks carrying it reach the routine.
    pub fn register_routine<R>(&mut self, id: &str, routine: R) -> &mut Self
    where
        R: TagRenderer + 'static,
    {
        if !conf::NAMES.contains(&id) && self.tag(id).is_none() {
            self.register_tag(id, &[]);
        }
        log::debug!("registered renderer for @{id}");
        self.renderers.insert(id.to_string(), Box::new(routine));
        self
    }

    /// Canonical id for a raw tag id, resolving synonyms.
    pub fn canonical<'a>(&'a self, id: &'a str) -> &'a str {
        self.synonyms.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn tag(&self, id: &str) -> Option<&TagDef> {
        self.tags.iter().find(|t| t.name == id)
    }

    /// Registered ids that are not built-in tags, in registration order.
    pub fn custom_ids(&self) -> Vec<&str> {
        self.tags
            .iter()
            .map(|t| t.name.as_str())
            .filter(|id| !conf::NAMES.contains(id))
            .collect()
    }

    pub fn renderer(&self, id: &str) -> Option<&dyn TagRenderer> {
        self.renderers.get(id).map(|r| r.as_ref())
    }
}

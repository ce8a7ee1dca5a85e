//! mdapi: markdown API documentation from tagged doc comments.
//!
//! The pipeline has three stages:
//!
//! 1. **Extract**: [`parser::parse`] turns `/** ... */` comments into
//!    [`Block`]s (any other extractor producing blocks works too).
//! 2. **Resolve**: each block is wrapped in a [`Comment`] that decides which
//!    tag governs it and which modifiers apply.
//! 3. **Render**: [`render::render`] walks the blocks in order, tracking
//!    heading depth, the enclosing module and the current class, and writes
//!    markdown to any [`std::io::Write`].
//!
//! Custom tags plug in through a [`Registry`]:
//!
//! ```
//! use mdapi::{Block, Options, Registry, Tag};
//!
//! let mut registry = Registry::default();
//! registry.register_tag("hook", &["callback"]);
//! registry.register_renderer("hook", |cx, tag, _comment| {
//!     let level = cx.state.depth;
//!     cx.heading(&format!("{} (hook)", tag.name), level)
//! });
//!
//! let blocks = vec![Block::new("", vec![Tag::new("hook", "beforeSave")])];
//! let out = mdapi::render_to_string(blocks, &registry, &Options::default()).unwrap();
//! assert!(out.contains("### beforeSave (hook)"));
//! ```

pub mod comment;
pub mod conf;
pub mod error;
pub mod format;
pub mod model;
pub mod parser;
pub mod registry;
pub mod render;

pub use comment::{Comment, Detail, Info, Kind};
pub use error::{Error, Result};
pub use model::{Block, Tag};
pub use registry::{Registry, TagDef, TagRenderer};
pub use render::{render, render_to_string, Context, Options, State};

use std::io::Write;

/// Extract doc comments from `source` and render them to `out`.
///
/// Returns the extracted blocks.
pub fn generate(
    source: &str,
    registry: &Registry,
    options: &Options,
    out: &mut dyn Write,
) -> Result<Vec<Block>> {
    let blocks = parser::parse(source);
    render(blocks.iter().cloned(), registry, options, out)?;
    Ok(blocks)
}

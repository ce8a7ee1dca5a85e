//! Render driver: walks comment blocks in order and dispatches each one
//! to the routine for its resolved kind.
//!
//! Blocks are rendered strictly one after another: a routine returns only
//! once all of its fragments are written, and the first error stops the
//! document. Output already written is left in the sink.

pub mod builtin;

use crate::comment::{Comment, Detail, Info, Kind};
use crate::error::Result;
use crate::format;
use crate::model::{Block, Tag};
use crate::registry::Registry;
use std::io::Write;

/// Highest heading level markdown supports.
pub const MAX_LEVEL: usize = 6;

/// Document-level render options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Level of the first heading
    pub level: usize,
    /// Document title; `None` suppresses it
    pub heading: Option<String>,
    /// Info string for fenced code; `None` suppresses it
    pub lang: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            level: 1,
            heading: Some("API".to_string()),
            lang: Some("javascript".to_string()),
        }
    }
}

/// Cross-block context for one document render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    /// Level of top-level entries (modules, classes outside a module)
    pub base: usize,
    /// Level for the next function or property heading
    pub depth: usize,
    /// Heading level of the enclosing `@module`
    pub in_module: Option<usize>,
    /// Most recent class or constructor, owner of bare `@member` entries
    pub current_class: Option<Tag>,
}

impl State {
    pub fn new(base: usize) -> Self {
        State {
            base,
            depth: base.saturating_add(1),
            in_module: None,
            current_class: None,
        }
    }

    /// Level for a class or constructor heading.
    pub fn class_level(&self) -> usize {
        self.in_module.map_or(self.base, |level| level.saturating_add(1))
    }
}

/// Everything a render routine may touch: the sink, the registry, the
/// options and the mutable [`State`].
pub struct Context<'a> {
    out: &'a mut dyn Write,
    pub registry: &'a Registry,
    pub options: &'a Options,
    pub state: State,
    /// Examples from `@usage` blocks waiting for the next heading
    pending_usage: Vec<String>,
}

impl<'a> Context<'a> {
    pub fn new(out: &'a mut dyn Write, registry: &'a Registry, options: &'a Options) -> Self {
        let level = options.level.clamp(1, MAX_LEVEL);
        if level != options.level {
            log::warn!("heading level {} out of range, using {level}", options.level);
        }
        let base = if options.heading.is_some() { level + 1 } else { level };
        Context {
            out,
            registry,
            options,
            state: State::new(base),
            pending_usage: Vec::new(),
        }
    }

    pub fn lang(&self) -> Option<&str> {
        self.options.lang.as_deref()
    }

    /// Write a raw fragment.
    pub fn write(&mut self, fragment: &str) -> Result<()> {
        self.out.write_all(fragment.as_bytes())?;
        Ok(())
    }

    /// Write a fragment followed by a blank line.
    pub fn paragraph(&mut self, text: &str) -> Result<()> {
        self.write(text)?;
        self.write("\n\n")
    }

    pub fn heading(&mut self, text: &str, level: usize) -> Result<()> {
        let level = level.clamp(1, MAX_LEVEL);
        self.paragraph(&format::heading(text, level))
    }

    pub fn fenced(&mut self, code: &str) -> Result<()> {
        let block = format::fenced(code, self.lang());
        self.paragraph(&block)
    }

    /// Write list items as one list; nothing when empty.
    pub fn list(&mut self, items: &[String]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        self.paragraph(&items.join("\n"))
    }

    /// A titled sub-list, skipped when empty.
    pub fn section(&mut self, title: &str, level: usize, items: &[String]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        self.heading(title, level)?;
        self.list(items)
    }

    pub fn description(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.paragraph(text)
    }

    /// Pending `@usage` examples, then the block's own.
    pub fn usage(&mut self, comment: &Comment<'_>) -> Result<()> {
        let mut examples = std::mem::take(&mut self.pending_usage);
        examples.extend(comment.usage());
        for code in &examples {
            self.fenced(code)?;
        }
        Ok(())
    }

    /// Deprecation notice, metadata list and todo list.
    pub fn meta(&mut self, comment: &Comment<'_>) -> Result<()> {
        let registry = self.registry;
        let conf = &registry.conf;
        if let Some(tag) = comment.find(crate::conf::DEPRECATED) {
            let notice = format::deprecated(tag, &conf.titles.deprecated);
            self.paragraph(&notice)?;
        }
        let items: Vec<String> = conf
            .meta
            .iter()
            .flat_map(|(id, title)| {
                comment
                    .collect(id)
                    .into_iter()
                    .map(move |tag| format::meta(tag, title))
            })
            .collect();
        self.list(&items)?;
        let todos = comment.collect(crate::conf::TODO);
        if !todos.is_empty() {
            let list = format::todo(&todos);
            self.paragraph(&list)?;
        }
        Ok(())
    }

    /// `@see` links under a sub-heading.
    pub fn see(&mut self, comment: &Comment<'_>, level: usize) -> Result<()> {
        let links: Vec<String> = comment
            .collect(crate::conf::SEE)
            .into_iter()
            .map(format::link)
            .collect();
        let registry = self.registry;
        self.section(&registry.conf.titles.see, level, &links)
    }

    /// Qualify a bare `@member` with the current class.
    pub fn resolve_owner(&self, info: &mut Info<'_>) {
        if info.is_member.is_some() && info.owner.is_none() {
            info.owner = self.state.current_class.as_ref().map(|c| c.name.clone());
        }
    }

    /// Write examples still waiting from earlier `@usage` blocks.
    fn drain_usage(&mut self) -> Result<()> {
        let examples = std::mem::take(&mut self.pending_usage);
        for code in &examples {
            self.fenced(code)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.drain_usage()?;
        self.out.flush()?;
        Ok(())
    }
}

/// Render comment blocks as a markdown document.
///
/// Blocks with no resolvable kind or name, and blocks carrying the exclude
/// tag, are skipped. The first write or routine error aborts the render.
pub fn render<I>(blocks: I, registry: &Registry, options: &Options, out: &mut dyn Write) -> Result<()>
where
    I: IntoIterator<Item = Block>,
{
    let mut cx = Context::new(out, registry, options);

    if let Some(ref title) = options.heading {
        cx.heading(title, options.level)?;
    }

    let custom = registry.custom_ids();
    for (index, block) in blocks.into_iter().enumerate() {
        let comment = Comment::new(block, registry);

        if comment.is_excluded() {
            log::debug!("block {index}: excluded by @{}", registry.conf.exclude);
            continue;
        }

        let Some(detail) = comment.get_detail(&custom) else {
            let examples = comment.usage();
            if examples.is_empty() {
                log::debug!("block {index}: no type or name, skipping");
            } else {
                cx.pending_usage.extend(examples);
            }
            continue;
        };

        log::debug!("block {index}: @{} {}", detail.kind, detail.ty.name);
        dispatch(&mut cx, &detail, &comment)?;
    }

    cx.flush()
}

/// Run the routine for a resolved block. A registered routine takes
/// precedence over the built-in one for the same id.
///
/// Pending usage examples a registered routine leaves untouched are written
/// after its output.
fn dispatch(cx: &mut Context<'_>, detail: &Detail, comment: &Comment<'_>) -> Result<()> {
    let registry = cx.registry;
    if let Some(routine) = registry.renderer(detail.kind.id()) {
        routine.render(cx, &detail.ty, comment)?;
        return cx.drain_usage();
    }
    match detail.kind {
        Kind::Module | Kind::Class => builtin::class(cx, detail, comment),
        Kind::Constructor | Kind::Function => builtin::function(cx, detail, comment),
        Kind::Property => builtin::property(cx, detail, comment),
        Kind::Custom(ref id) => {
            log::warn!("no renderer registered for @{id}, skipping {}", detail.ty.name);
            Ok(())
        }
    }
}

/// Render blocks into a string.
pub fn render_to_string<I>(blocks: I, registry: &Registry, options: &Options) -> Result<String>
where
    I: IntoIterator<Item = Block>,
{
    let mut buf: Vec<u8> = Vec::new();
    render(blocks, registry, options, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

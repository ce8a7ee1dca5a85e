//! Built-in routines for modules, classes, functions and properties.

use super::Context;
use crate::comment::{Comment, Detail, Kind};
use crate::conf;
use crate::error::Result;
use crate::format;

/// Render a `@module` or `@class` block.
///
/// A module heading sits at the document base and becomes the parent of
/// the classes that follow; a class heading sits one level below the
/// current module.
pub fn class(cx: &mut Context<'_>, detail: &Detail, comment: &Comment<'_>) -> Result<()> {
    let registry = cx.registry;
    let info = comment.get_info(None);

    let (title, level, description) = if detail.kind == Kind::Module {
        let level = cx.state.base;
        cx.state.in_module = Some(level);
        cx.state.current_class = None;
        // the whole tag text titles a module, e.g. `@module API Documents`
        (detail.ty.text(), level, comment.prose().to_string())
    } else {
        let level = cx.state.class_level();
        cx.state.current_class = Some(detail.ty.clone());
        let title = format::inherits(&detail.ty, &info, &registry.conf.cues);
        (title, level, comment.describe(&detail.ty, None))
    };

    cx.heading(&title, level)?;
    cx.state.depth = level + 1;
    cx.usage(comment)?;
    cx.description(&description)?;
    cx.meta(comment)?;
    cx.see(comment, level + 1)
}

/// Render a `@function` or `@constructor` block.
pub fn function(cx: &mut Context<'_>, detail: &Detail, comment: &Comment<'_>) -> Result<()> {
    let registry = cx.registry;
    let titles = &registry.conf.titles;
    let mut info = comment.get_info(Some(true));
    info.is_constructor = detail.kind == Kind::Constructor;

    let (level, title) = if info.is_constructor {
        let level = cx.state.class_level();
        cx.state.current_class = Some(detail.ty.clone());
        let title = info
            .inherits
            .map(|_| format::inherits(&detail.ty, &info, &registry.conf.cues));
        (level, title)
    } else {
        (cx.state.depth, None)
    };
    cx.resolve_owner(&mut info);

    let method = format::method(&detail.ty, &info, title.as_deref(), &registry.conf.cues);
    let params = comment.collect(conf::PARAM);

    cx.heading(&method.title, level)?;
    cx.fenced(&format!("{}{}", method.signature, format::signature(&params)))?;
    cx.usage(comment)?;
    cx.description(&comment.describe(&detail.ty, None))?;
    if let Some(tag) = info.returns {
        cx.paragraph(&format::returns(comment, tag, &titles.returns))?;
    }
    cx.meta(comment)?;

    let items: Vec<String> = params.iter().map(|p| format::parameter(p)).collect();
    cx.list(&items)?;

    let sub = level + 1;
    for (id, title) in [
        (conf::OPTION, &titles.options),
        (conf::THROWS, &titles.throws),
        (conf::EVENT, &titles.events),
    ] {
        let items: Vec<String> = comment
            .collect(id)
            .into_iter()
            .map(format::parameter)
            .collect();
        cx.section(title, sub, &items)?;
    }

    cx.see(comment, sub)?;

    if info.is_constructor {
        cx.state.depth = level + 1;
    }
    Ok(())
}

/// Render a `@property` or `@constant` block.
pub fn property(cx: &mut Context<'_>, detail: &Detail, comment: &Comment<'_>) -> Result<()> {
    let mut info = comment.get_info(Some(false));
    cx.resolve_owner(&mut info);
    let level = cx.state.depth;

    cx.heading(&detail.ty.name, level)?;
    cx.fenced(&format::property(&detail.ty, &info))?;
    cx.usage(comment)?;
    cx.description(&comment.describe(&detail.ty, None))?;
    cx.meta(comment)?;
    cx.see(comment, level + 1)
}

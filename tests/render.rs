use mdapi::{render, render_to_string, Block, Error, Options, Registry, Tag};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

fn run(blocks: Vec<Block>) -> String {
    render_to_string(blocks, &Registry::default(), &Options::default()).unwrap()
}

/// A sink that accepts `limit` bytes, then fails every write.
struct FailingSink {
    written: Vec<u8>,
    limit: usize,
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written.len() + buf.len() > self.limit {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn block_without_type_is_skipped() {
    let out = run(vec![
        Block::new("Just prose.", vec![Tag::new("author", "muji")]),
        Block::new("", vec![Tag::new("function", "create")]),
    ]);
    assert!(!out.contains("Just prose."), "{out}");
    assert!(out.contains("### create"), "{out}");
}

#[test]
fn private_block_never_reaches_a_renderer() {
    let calls = Rc::new(RefCell::new(0));
    let mut registry = Registry::default();
    let seen = Rc::clone(&calls);
    registry.register_renderer("function", move |_cx, _tag, _comment| {
        *seen.borrow_mut() += 1;
        Ok(())
    });

    let blocks = vec![Block::new(
        "",
        vec![Tag::new("function", "secret"), Tag::new("private", "")],
    )];
    let out = render_to_string(blocks, &registry, &Options::default()).unwrap();
    assert_eq!(out, "# API\n\n");
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn class_inside_module_sits_one_level_down() {
    let out = run(vec![
        Block::new("", vec![Tag::new("module", "Mock")]),
        Block::new("", vec![Tag::new("class", "Widget")]),
        Block::new("", vec![Tag::new("function", "draw"), Tag::new("member", "")]),
    ]);
    assert_eq!(
        out,
        "# API\n\n## Mock\n\n### Widget\n\n#### .draw\n\n```javascript\nWidget.prototype.draw()\n```\n\n"
    );
}

#[test]
fn class_outside_module_sits_at_base() {
    let out = run(vec![
        Block::new("", vec![Tag::new("class", "Widget")]),
        Block::new("", vec![Tag::new("property", "size")]),
    ]);
    assert_eq!(out, "# API\n\n## Widget\n\n### size\n\n```javascript\nsize\n```\n\n");
}

#[test]
fn member_with_explicit_owner() {
    let out = run(vec![Block::new(
        "",
        vec![Tag::new("function", "render"), Tag::new("member", "View")],
    )]);
    assert!(out.contains("### .render\n\n```javascript\nView.prototype.render()\n```"), "{out}");
}

#[test]
fn static_deprecated_function() {
    let out = run(vec![Block::new(
        "Create a component.",
        vec![
            Tag::new("static", "factory"),
            Tag::new("deprecated", "use").with_description("create instead."),
        ],
    )]);
    assert!(out.contains("### #factory\n\n```javascript\nstatic factory()\n```"), "{out}");
    assert!(out.contains("> **Deprecated:** use create instead."), "{out}");
}

#[test]
fn custom_tag_renderer_receives_tag_and_block() {
    let received: Rc<RefCell<Vec<(Tag, String)>>> = Rc::new(RefCell::new(Vec::new()));
    let mut registry = Registry::default();
    registry.register_tag("custom", &[]);
    let sink = Rc::clone(&received);
    registry.register_renderer("custom", move |cx, tag, comment| {
        sink.borrow_mut()
            .push((tag.clone(), comment.description().to_string()));
        cx.paragraph("custom output")
    });

    let tag = Tag::new("custom", "Name")
        .with_type("Type")
        .with_description("Description");
    let blocks = vec![Block::new("Custom tag description.", vec![tag.clone()])];
    let out = render_to_string(blocks, &registry, &Options::default()).unwrap();

    assert_eq!(out, "# API\n\ncustom output\n\n");
    let received = received.borrow();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, tag);
    assert_eq!(received[0].1, "Custom tag description.");
}

#[test]
fn custom_synonym_resolves_to_tag() {
    let mut registry = Registry::default();
    registry.register_tag("hook", &["callback"]);
    registry.register_renderer("hook", |cx, tag, _comment| {
        let level = cx.state.depth;
        cx.heading(&format!("{} (hook)", tag.name), level)
    });

    let blocks = vec![Block::new("", vec![Tag::new("callback", "beforeSave")])];
    let out = render_to_string(blocks, &registry, &Options::default()).unwrap();
    assert_eq!(out, "# API\n\n### beforeSave (hook)\n\n");
}

#[test]
fn custom_tag_without_renderer_is_skipped() {
    let mut registry = Registry::default();
    registry.register_tag("hook", &[]);
    let blocks = vec![Block::new("", vec![Tag::new("hook", "beforeSave")])];
    let out = render_to_string(blocks, &registry, &Options::default()).unwrap();
    assert_eq!(out, "# API\n\n");
}

#[test]
fn registered_renderer_overrides_builtin() {
    let mut registry = Registry::default();
    registry.register_renderer("property", |cx, tag, _comment| {
        cx.paragraph(&format!("prop {}", tag.name))
    });
    registry.register_renderer("property", |cx, tag, _comment| {
        cx.paragraph(&format!("last {}", tag.name))
    });
    let blocks = vec![Block::new("", vec![Tag::new("property", "size")])];
    let out = render_to_string(blocks, &registry, &Options::default()).unwrap();
    assert_eq!(out, "# API\n\nlast size\n\n");
}

#[test]
fn failing_sink_stops_the_render() {
    let mut sink = FailingSink {
        written: Vec::new(),
        limit: 7,
    };
    let blocks = vec![
        Block::new("", vec![Tag::new("function", "first")]),
        Block::new("", vec![Tag::new("function", "second")]),
    ];
    let err = render(blocks, &Registry::default(), &Options::default(), &mut sink).unwrap_err();
    assert!(matches!(err, Error::Write(_)), "{err}");
    assert_eq!(sink.written, b"# API\n\n");
}

#[test]
fn routine_error_aborts_later_blocks() {
    let mut registry = Registry::default();
    registry.register_renderer("class", |_cx, tag, _comment| {
        Err(Error::render("class", format!("cannot document {}", tag.name)))
    });
    let blocks = vec![
        Block::new("", vec![Tag::new("function", "before")]),
        Block::new("", vec![Tag::new("class", "Broken")]),
        Block::new("", vec![Tag::new("function", "after")]),
    ];

    let mut out = Vec::new();
    let err = render(blocks, &registry, &Options::default(), &mut out).unwrap_err();
    assert_eq!(err.to_string(), "failed to render @class: cannot document Broken");

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("### before"), "{out}");
    assert!(!out.contains("after"), "{out}");
}

#[test]
fn usage_block_attaches_to_next_entry() {
    let out = run(vec![
        Block::new("var c = create();", vec![Tag::new("usage", "")]),
        Block::new("", vec![Tag::new("function", "create")]),
    ]);
    assert_eq!(
        out,
        "# API\n\n### create\n\n```javascript\ncreate()\n```\n\n```javascript\nvar c = create();\n```\n\n"
    );
}

#[test]
fn trailing_usage_block_is_flushed() {
    let out = run(vec![Block::new("var c = create();", vec![Tag::new("usage", "")])]);
    assert_eq!(out, "# API\n\n```javascript\nvar c = create();\n```\n\n");
}

#[test]
fn independent_registries_do_not_share_tags() {
    let mut first = Registry::default();
    first.register_tag("hook", &[]);
    first.register_renderer("hook", |cx, _tag, _comment| cx.paragraph("hooked"));
    let second = Registry::default();

    let blocks = vec![Block::new("", vec![Tag::new("hook", "x")])];
    let a = render_to_string(blocks.clone(), &first, &Options::default()).unwrap();
    let b = render_to_string(blocks, &second, &Options::default()).unwrap();
    assert!(a.contains("hooked"));
    assert_eq!(b, "# API\n\n");
}

#[test]
fn generate_parses_and_renders() {
    let mut out = Vec::new();
    let blocks = mdapi::generate(
        "/**\n * Make one.\n * @function create\n * @param {String} name Name.\n */\n",
        &Registry::default(),
        &Options::default(),
        &mut out,
    )
    .unwrap();
    assert_eq!(blocks.len(), 1);
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("create(name)"), "{out}");
    assert!(out.contains("* `name` String Name."), "{out}");
}

#[test]
fn reregistered_tag_forgets_old_synonyms() {
    let mut registry = Registry::default();
    registry.register_tag("hook", &["callback"]);
    registry.register_tag("hook", &["listener"]);
    registry.register_renderer("hook", |cx, tag, _comment| {
        cx.paragraph(&format!("HOOK {}", tag.name))
    });

    let blocks = vec![
        Block::new("", vec![Tag::new("callback", "stale")]),
        Block::new("", vec![Tag::new("listener", "fresh")]),
    ];
    let out = render_to_string(blocks, &registry, &Options::default()).unwrap();
    assert_eq!(out, "# API\n\nHOOK fresh\n\n");
}

#[test]
fn renderer_without_tag_registration_is_reached() {
    let mut registry = Registry::default();
    registry.register_renderer("custom", |cx, tag, comment| {
        cx.paragraph(&format!("{} {}", tag.name, comment.description()))
    });

    let tag = Tag::new("custom", "Name").with_type("Type");
    let blocks = vec![Block::new("Custom tag description.", vec![tag])];
    let out = render_to_string(blocks, &registry, &Options::default()).unwrap();
    assert_eq!(out, "# API\n\nName Custom tag description.\n\n");
}

#[test]
fn usage_block_attaches_to_custom_entry() {
    let mut registry = Registry::default();
    registry.register_renderer("hook", |cx, tag, _comment| {
        cx.paragraph(&format!("hook {}", tag.name))
    });

    let blocks = vec![
        Block::new("hook(save);", vec![Tag::new("usage", "")]),
        Block::new("", vec![Tag::new("hook", "save")]),
        Block::new("", vec![Tag::new("function", "create")]),
    ];
    let out = render_to_string(blocks, &registry, &Options::default()).unwrap();
    assert_eq!(
        out,
        "# API\n\nhook save\n\n```javascript\nhook(save);\n```\n\n### create\n\n```javascript\ncreate()\n```\n\n"
    );
}

#[test]
fn custom_routine_can_place_usage_itself() {
    let mut registry = Registry::default();
    registry.register_renderer("hook", |cx, tag, comment| {
        cx.usage(comment)?;
        cx.paragraph(&format!("hook {}", tag.name))
    });

    let blocks = vec![
        Block::new("hook(save);", vec![Tag::new("usage", "")]),
        Block::new("", vec![Tag::new("hook", "save")]),
    ];
    let out = render_to_string(blocks, &registry, &Options::default()).unwrap();
    assert_eq!(out, "# API\n\n```javascript\nhook(save);\n```\n\nhook save\n\n");
}

//! mdapi: generate markdown API documentation from doc comments.
//!
//! Reads source files (or stdin), extracts `/** ... */` comments and writes
//! markdown to stdout or `-o FILE`:
//!
//! - `mdapi index.js lib/*.js > API.md`
//! - `mdapi --ast index.js` dumps the extracted comment blocks as JSON
//! - `mdapi --from-ast blocks.json` renders a previously dumped AST

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use mdapi::render::MAX_LEVEL;
use mdapi::{parser, Block, Options, Registry};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// JSON indent used when `--indent` is unusable.
const DEFAULT_INDENT: usize = 2;

#[derive(Parser)]
#[command(
    name = "mdapi",
    about = "Generate markdown API documentation from tagged doc comments"
)]
struct Cli {
    /// Input files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output file (defaults to stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Level of the first heading
    #[arg(short = 'l', long, default_value = "1")]
    level: String,

    /// Document title
    #[arg(long, default_value = "API")]
    heading: String,

    /// Omit the document title
    #[arg(long)]
    no_heading: bool,

    /// Info string for fenced code blocks
    #[arg(long, default_value = "javascript")]
    lang: String,

    /// Omit the info string on fenced code blocks
    #[arg(long)]
    no_lang: bool,

    /// Print the extracted comment blocks as JSON instead of markdown
    #[arg(long)]
    ast: bool,

    /// JSON indent for --ast; 0 prints compact JSON
    #[arg(long, default_value = "2", allow_hyphen_values = true)]
    indent: String,

    /// Inputs are JSON comment ASTs (as printed by --ast)
    #[arg(long)]
    from_ast: bool,

    /// Enable verbose debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let blocks = load_blocks(&cli)?;
    let options = Options {
        level: parse_level(&cli.level),
        heading: (!cli.no_heading).then(|| cli.heading.clone()),
        lang: (!cli.no_lang).then(|| cli.lang.clone()),
    };

    with_output(cli.output.as_deref(), |out| {
        if cli.ast {
            write_ast(&blocks, parse_indent(&cli.indent), out)
        } else {
            let registry = Registry::default();
            mdapi::render(blocks, &registry, &options, out).context("failed to render documentation")
        }
    })
}

/// Read every input in order and extract its comment blocks.
///
/// Source inputs are concatenated before extraction; AST inputs are parsed
/// one by one and appended.
fn load_blocks(cli: &Cli) -> Result<Vec<Block>> {
    let inputs: Vec<(String, String)> = if cli.files.is_empty() {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        vec![("<stdin>".to_string(), input)]
    } else {
        expand_globs(&cli.files)?
            .into_iter()
            .map(|path| {
                fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))
                    .map(|content| (path.display().to_string(), content))
            })
            .collect::<Result<_>>()?
    };

    if cli.from_ast {
        let mut blocks = Vec::new();
        for (name, content) in &inputs {
            let parsed: Vec<Block> = serde_json::from_str(content)
                .map_err(mdapi::Error::from)
                .with_context(|| format!("failed to load AST from {name}"))?;
            blocks.extend(parsed);
        }
        return Ok(blocks);
    }

    let source: String = inputs.iter().map(|(_, content)| content.as_str()).collect();
    let blocks = parser::parse(&source);
    if blocks.is_empty() {
        log::warn!("no doc comments found");
    }
    Ok(blocks)
}

/// Run `f` against stdout or a freshly created file.
///
/// Stdout is left open; a file is flushed and closed when `f` succeeds.
fn with_output<F>(path: Option<&Path>, f: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            f(&mut writer)?;
            writer
                .flush()
                .with_context(|| format!("failed to write {}", path.display()))?;
            Ok(())
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            f(&mut lock)
        }
    }
}

fn write_ast(blocks: &[Block], indent: usize, out: &mut dyn Write) -> Result<()> {
    if indent == 0 {
        serde_json::to_writer(&mut *out, blocks).context("failed to serialize AST")?;
    } else {
        let pad = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(pad.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut *out, formatter);
        serde::Serialize::serialize(blocks, &mut ser).context("failed to serialize AST")?;
    }
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Parse `--indent`, falling back to the default for non-numeric input.
/// Negative values use their magnitude.
fn parse_indent(raw: &str) -> usize {
    match raw.trim().parse::<i64>() {
        Ok(n) => n.unsigned_abs() as usize,
        Err(_) => {
            log::warn!("invalid indent {raw:?}, using {DEFAULT_INDENT}");
            DEFAULT_INDENT
        }
    }
}

/// Parse `--level`; anything but a positive integer becomes 1 and levels
/// past the deepest markdown heading are capped.
fn parse_level(raw: &str) -> usize {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > MAX_LEVEL => {
            log::warn!("heading level {n} is too deep, using {MAX_LEVEL}");
            MAX_LEVEL
        }
        Ok(n) if n >= 1 => n,
        _ => {
            log::warn!("invalid heading level {raw:?}, using 1");
            1
        }
    }
}

/// File extensions scanned when a directory is given.
const SUPPORTED_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx", "ts", "tsx"];

/// Expand glob patterns into a list of real file paths, keeping the order
/// in which patterns were given. Bare directories are scanned
/// (non-recursively) for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            let mut found: Vec<PathBuf> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|p| {
                    p.is_file()
                        && p.extension()
                            .and_then(|e| e.to_str())
                            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
                })
                .collect();
            found.sort();
            files.extend(found);
            continue;
        }
        let mut matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            anyhow::bail!("no files matched: {}", pattern);
        }
        matches.sort();
        files.extend(matches);
    }
    // Input order matters, so only drop repeats of an earlier path
    let mut seen = std::collections::HashSet::new();
    files.retain(|p| seen.insert(p.clone()));
    Ok(files)
}

//! Static catalog of recognized tags, cues and section titles.
//!
//! Non-structural output settings live here; callers adjust them on a
//! [`crate::registry::Registry`] before rendering.

pub const NAME: &str = "name";
pub const STATIC: &str = "static";
pub const CONSTANT: &str = "constant";
pub const PUBLIC: &str = "public";
pub const PRIVATE: &str = "private";
pub const PROTECTED: &str = "protected";
pub const READONLY: &str = "readonly";
pub const MODULE: &str = "module";
pub const CLASS: &str = "class";
pub const CONSTRUCTOR: &str = "constructor";
pub const INHERITS: &str = "inherits";
pub const FUNCTION: &str = "function";
pub const MEMBER: &str = "member";
pub const PARAM: &str = "param";
pub const OPTION: &str = "option";
pub const RETURNS: &str = "returns";
pub const PROPERTY: &str = "property";
pub const DEFAULT: &str = "default";
pub const DEPRECATED: &str = "deprecated";
pub const AUTHOR: &str = "author";
pub const VERSION: &str = "version";
pub const SINCE: &str = "since";
pub const SEE: &str = "see";
pub const USAGE: &str = "usage";
pub const THROWS: &str = "throws";
pub const EVENT: &str = "event";
pub const TODO: &str = "todo";

/// Every built-in tag id.
pub const NAMES: &[&str] = &[
    NAME, STATIC, CONSTANT, PUBLIC, PRIVATE, PROTECTED, READONLY, MODULE, CLASS, CONSTRUCTOR,
    INHERITS, FUNCTION, MEMBER, PARAM, OPTION, RETURNS, PROPERTY, DEFAULT, DEPRECATED, AUTHOR,
    VERSION, SINCE, SEE, USAGE, THROWS, EVENT, TODO,
];

/// Category tags in resolution priority order.
pub const TYPES: &[&str] = &[MODULE, CLASS, CONSTRUCTOR, FUNCTION, PROPERTY];

/// Built-in `(synonym, canonical)` pairs.
pub const SYNONYMS: &[(&str, &str)] = &[
    ("return", RETURNS),
    ("func", FUNCTION),
    ("method", FUNCTION),
    ("prop", PROPERTY),
    ("field", PROPERTY),
    ("const", CONSTANT),
    ("extends", INHERITS),
    ("augments", INHERITS),
    ("throw", THROWS),
    ("exception", THROWS),
    ("fires", EVENT),
    ("emits", EVENT),
    ("example", USAGE),
    ("defaultvalue", DEFAULT),
];

/// Visual cue strings inserted into headings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cues {
    /// Separator in inheritance chains
    pub inherits: String,
    /// Heading prefix for instance members
    pub member: String,
    /// Heading prefix for static members
    pub statics: String,
}

impl Default for Cues {
    fn default() -> Self {
        Cues {
            inherits: " < ".to_string(),
            member: ".".to_string(),
            statics: "#".to_string(),
        }
    }
}

/// Sub-heading and notice titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Titles {
    pub options: String,
    pub throws: String,
    pub events: String,
    pub returns: String,
    pub deprecated: String,
    pub see: String,
    pub todo: String,
}

impl Default for Titles {
    fn default() -> Self {
        Titles {
            options: "Options".to_string(),
            throws: "Throws".to_string(),
            events: "Events".to_string(),
            returns: "Returns".to_string(),
            deprecated: "Deprecated".to_string(),
            see: "See also".to_string(),
            todo: "Todo".to_string(),
        }
    }
}

/// A shorthand tag and the category it stands for when its own type
/// annotation does not name one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shorthand {
    pub id: String,
    pub fallback: Option<String>,
}

/// Tag configuration consumed by comment resolution and the renderers.
#[derive(Debug, Clone)]
pub struct Conf {
    pub cues: Cues,
    pub titles: Titles,
    /// Scanned in order when no category tag is present
    pub shorthand: Vec<Shorthand>,
    /// `(tag, title)` pairs rendered as the metadata list
    pub meta: Vec<(String, String)>,
    /// Blocks carrying this tag are never rendered
    pub exclude: String,
}

impl Default for Conf {
    fn default() -> Self {
        let shorthand = [
            (NAME, None),
            (STATIC, Some(FUNCTION)),
            (CONSTANT, Some(PROPERTY)),
            (PUBLIC, None),
            (PRIVATE, None),
            (PROTECTED, None),
        ]
        .into_iter()
        .map(|(id, fallback)| Shorthand {
            id: id.to_string(),
            fallback: fallback.map(str::to_string),
        })
        .collect();

        let meta = [(AUTHOR, "Author"), (VERSION, "Version"), (SINCE, "Since")]
            .into_iter()
            .map(|(tag, title)| (tag.to_string(), title.to_string()))
            .collect();

        Conf {
            cues: Cues::default(),
            titles: Titles::default(),
            shorthand,
            meta,
            exclude: PRIVATE.to_string(),
        }
    }
}

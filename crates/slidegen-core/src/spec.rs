//! Slide specifications.
//!
//! A slide specification is one JSON object of the configuration document.
//! [`SlideSpec::from_object`] checks it once against the variant named by its
//! `type` property; everything downstream works with the typed value.

use std::fmt;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::error::{SlideError, SlideResult};

/// The five slide variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideKind {
    Title,
    Text,
    List,
    Picture,
    Plot,
}

impl SlideKind {
    /// Every variant, in documentation order
    pub const ALL: [SlideKind; 5] = [
        Self::Title,
        Self::Text,
        Self::List,
        Self::Picture,
        Self::Plot,
    ];

    /// Value of the `type` discriminator
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Text => "text",
            Self::List => "list",
            Self::Picture => "picture",
            Self::Plot => "plot",
        }
    }

    /// Look up a variant by its `type` discriminator
    pub fn from_type(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// Properties accepted besides `type`
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Self::Plot => &["title", "content", "configuration"],
            _ => &["title", "content"],
        }
    }
}

impl fmt::Display for SlideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bullet of a list slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Indentation level (0 = top level)
    pub level: u32,
    /// Bullet text
    pub text: String,
}

/// Axis labels of a plot slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotConfiguration {
    pub x_label: String,
    pub y_label: String,
}

/// A validated slide specification
#[derive(Debug, Clone, PartialEq)]
pub enum SlideSpec {
    /// Title slide with a subtitle
    Title { title: String, content: String },

    /// Title plus a free text box
    Text { title: String, content: String },

    /// Title plus a leveled bullet list
    List {
        title: String,
        content: Vec<ListEntry>,
    },

    /// Title plus an image file
    Picture { title: String, content: PathBuf },

    /// Title plus a line plot of a data file
    Plot {
        title: String,
        content: PathBuf,
        configuration: PlotConfiguration,
    },
}

impl SlideSpec {
    /// Validate a JSON object and convert it into a typed specification
    pub fn from_object(mut object: Map<String, Value>) -> SlideResult<Self> {
        let kind = match object.remove("type") {
            None => return Err(SlideError::MissingField("type".to_string())),
            Some(Value::String(value)) => {
                SlideKind::from_type(&value).ok_or(SlideError::UnknownSlideType(value))?
            }
            Some(_) => return Err(SlideError::type_mismatch("type", "a string")),
        };

        if let Some(field) = object.keys().find(|key| !kind.fields().contains(&key.as_str())) {
            return Err(SlideError::UnexpectedField {
                kind,
                field: field.clone(),
            });
        }

        let title = optional_string(&object, "title")?;

        let spec = match kind {
            SlideKind::Title => Self::Title {
                title,
                content: optional_string(&object, "content")?,
            },
            SlideKind::Text => Self::Text {
                title,
                content: optional_string(&object, "content")?,
            },
            SlideKind::List => Self::List {
                title,
                content: list_entries(object.get("content"))?,
            },
            SlideKind::Picture => Self::Picture {
                title,
                content: PathBuf::from(optional_string(&object, "content")?),
            },
            SlideKind::Plot => Self::Plot {
                title,
                content: PathBuf::from(optional_string(&object, "content")?),
                configuration: plot_configuration(object.get("configuration"))?,
            },
        };

        Ok(spec)
    }

    /// Variant of this specification
    pub fn kind(&self) -> SlideKind {
        match self {
            Self::Title { .. } => SlideKind::Title,
            Self::Text { .. } => SlideKind::Text,
            Self::List { .. } => SlideKind::List,
            Self::Picture { .. } => SlideKind::Picture,
            Self::Plot { .. } => SlideKind::Plot,
        }
    }

    /// Slide title
    pub fn title(&self) -> &str {
        match self {
            Self::Title { title, .. }
            | Self::Text { title, .. }
            | Self::List { title, .. }
            | Self::Picture { title, .. }
            | Self::Plot { title, .. } => title,
        }
    }
}

/// String property that defaults to ""
fn optional_string(object: &Map<String, Value>, field: &str) -> SlideResult<String> {
    match object.get(field) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(SlideError::type_mismatch(field, "a string")),
    }
}

fn required_string(object: &Map<String, Value>, field: &str, path: &str) -> SlideResult<String> {
    match object.get(field) {
        None => Err(SlideError::MissingField(path.to_string())),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(SlideError::type_mismatch(path, "a string")),
    }
}

fn list_entries(content: Option<&Value>) -> SlideResult<Vec<ListEntry>> {
    let items = match content {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(SlideError::type_mismatch("content", "an array")),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| list_entry(i, item))
        .collect()
}

fn list_entry(position: usize, item: &Value) -> SlideResult<ListEntry> {
    let path = format!("content[{}]", position);
    let entry = item
        .as_object()
        .ok_or_else(|| SlideError::type_mismatch(path.clone(), "an object"))?;

    if let Some(field) = entry.keys().find(|key| !matches!(key.as_str(), "level" | "text")) {
        return Err(SlideError::UnexpectedField {
            kind: SlideKind::List,
            field: format!("{}.{}", path, field),
        });
    }

    let level_path = format!("{}.level", path);
    let level = match entry.get("level") {
        None => return Err(SlideError::MissingField(level_path)),
        Some(value) => value
            .as_u64()
            .and_then(|level| u32::try_from(level).ok())
            .ok_or_else(|| SlideError::type_mismatch(level_path, "a non-negative integer"))?,
    };

    let text = required_string(entry, "text", &format!("{}.text", path))?;

    Ok(ListEntry { level, text })
}

fn plot_configuration(configuration: Option<&Value>) -> SlideResult<PlotConfiguration> {
    let empty = Map::new();
    let object = match configuration {
        None => &empty,
        Some(Value::Object(object)) => object,
        Some(_) => return Err(SlideError::type_mismatch("configuration", "an object")),
    };

    Ok(PlotConfiguration {
        x_label: required_string(object, "x-label", "configuration.x-label")?,
        y_label: required_string(object, "y-label", "configuration.y-label")?,
    })
}

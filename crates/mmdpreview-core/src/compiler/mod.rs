//! Offline SVG icon compiler: vendor SVG files -> [`IconRecord`] -> [`IconPackDocument`].
//!
//! Entries are compiled independently; a failing entry is reported and left out of the
//! document, it never aborts the batch.

pub mod aws;

use crate::model::{IconPackDocument, IconRecord};
use crate::{CompileError, Error, Result};
use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub use aws::{ARCHITECTURE_SERVICE_DIR, PROBLEMATIC_NAMES};

pub const DEFAULT_PREFIX: &str = "aws";

/// Icon size used when the SVG has no usable `viewBox`.
pub const DEFAULT_ICON_SIZE: f64 = 48.0;

/// Maximum number of filename candidates printed per name by [`suggest_candidates`].
pub const MAX_SUGGESTIONS: usize = 3;

fn viewbox_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"viewBox=["']([^"']+)["']"#).expect("valid regex"))
}

fn root_open_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)\A.*?<svg[^>]*>").expect("valid regex"))
}

fn root_close_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</svg>\s*\z").expect("valid regex"))
}

fn comment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"))
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Ordered `short name -> relative path` mapping fed to [`compile_pack`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconTable {
    entries: Vec<(String, String)>,
}

impl IconTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table for the `aws-icons` package.
    pub fn aws() -> Self {
        let mut table = Self::new();
        for (name, file) in aws::AWS_ICONS {
            table.push(*name, format!("{ARCHITECTURE_SERVICE_DIR}/{file}"));
        }
        table
    }

    /// Reads a table from a JSON object (`{ "lambda": "architecture-service/AWSLambda.svg" }`).
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(map) = value else {
            return Err(Error::InvalidIconTable {
                message: "icon table must be a JSON object".to_string(),
            });
        };
        let mut table = Self::new();
        for (name, path) in map {
            let Value::String(path) = path else {
                return Err(Error::InvalidIconTable {
                    message: format!("icon table entry `{name}` must be a string path"),
                });
            };
            table.push(name, path);
        }
        Ok(table)
    }

    pub fn push(&mut self, name: impl Into<String>, relative_path: impl Into<String>) {
        self.entries.push((name.into(), relative_path.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSvg {
    pub width: f64,
    pub height: f64,
    /// Inner markup of the root element; may be empty.
    pub body: String,
}

/// Extracts the intrinsic size and inner body of an SVG document.
///
/// Size comes from the `viewBox` (components 3 and 4); anything other than four positive
/// numbers falls back to [`DEFAULT_ICON_SIZE`]. The body drops the root element tags and all
/// comments, and collapses whitespace runs to single spaces.
pub fn parse_svg(svg: &str) -> ParsedSvg {
    let (width, height) = viewbox_size(svg).unwrap_or((DEFAULT_ICON_SIZE, DEFAULT_ICON_SIZE));

    let body = root_open_regex().replace(svg, "");
    let body = root_close_regex().replace(&body, "");
    let body = comment_regex().replace_all(&body, "");
    let body = whitespace_regex().replace_all(&body, " ");

    ParsedSvg {
        width,
        height,
        body: body.trim().to_string(),
    }
}

fn viewbox_size(svg: &str) -> Option<(f64, f64)> {
    let raw = viewbox_regex().captures(svg)?.get(1)?.as_str();
    let parts = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<_>>>()?;
    let [_, _, width, height] = parts.as_slice() else {
        return None;
    };
    (*width > 0.0 && *height > 0.0).then_some((*width, *height))
}

/// Locates `relative_path` under `base`, falling back to a case-insensitive filename match
/// inside the containing directory.
pub fn resolve_resource(
    base: &Path,
    relative_path: &str,
) -> std::result::Result<PathBuf, CompileError> {
    let not_found = || CompileError::ResourceNotFound {
        path: relative_path.to_string(),
    };

    let exact = base.join(relative_path);
    if exact.is_file() {
        return Ok(exact);
    }

    let (dir, file) = match relative_path.rsplit_once('/') {
        Some((dir, file)) => (base.join(dir), file),
        None => (base.to_path_buf(), relative_path),
    };
    if !dir.is_dir() {
        return Err(not_found());
    }

    let wanted = file.to_lowercase();
    let entries = std::fs::read_dir(&dir).map_err(|source| CompileError::Io {
        path: dir.clone(),
        source,
    })?;
    for entry in entries.flatten() {
        let name = entry.file_name();
        if name.to_string_lossy().to_lowercase() == wanted {
            return Ok(entry.path());
        }
    }
    Err(not_found())
}

/// Compiles one vendor SVG into an [`IconRecord`].
pub fn compile_icon(
    base: &Path,
    relative_path: &str,
) -> std::result::Result<IconRecord, CompileError> {
    let path = resolve_resource(base, relative_path)?;
    let svg = std::fs::read_to_string(&path).map_err(|source| CompileError::Io {
        path: path.clone(),
        source,
    })?;
    let parsed = parse_svg(&svg);
    if parsed.body.is_empty() {
        return Err(CompileError::EmptyBody {
            path: relative_path.to_string(),
        });
    }
    Ok(IconRecord::new(parsed.width, parsed.height, parsed.body))
}

#[derive(Debug)]
pub enum EntryOutcome {
    Compiled,
    Failed(CompileError),
}

#[derive(Debug)]
pub struct EntryReport {
    pub name: String,
    pub relative_path: String,
    pub outcome: EntryOutcome,
}

impl EntryReport {
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, EntryOutcome::Compiled)
    }
}

#[derive(Debug)]
pub struct CompileReport {
    pub document: IconPackDocument,
    pub entries: Vec<EntryReport>,
}

impl CompileReport {
    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }

    pub fn failed_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| !e.is_ok())
            .map(|e| e.name.as_str())
            .collect()
    }
}

/// Compiles every table entry, collecting per-entry outcomes.
///
/// `on_entry` is called after each entry with its 0-based index, which lets callers stream
/// progress.
pub fn compile_pack_with(
    base: &Path,
    table: &IconTable,
    prefix: &str,
    mut on_entry: impl FnMut(usize, &EntryReport),
) -> CompileReport {
    let mut document = IconPackDocument::new(prefix);
    let mut entries = Vec::with_capacity(table.len());

    for (idx, (name, relative_path)) in table.iter().enumerate() {
        let outcome = match compile_icon(base, relative_path) {
            Ok(record) => {
                tracing::debug!(icon = name, path = relative_path, "compiled icon");
                document.icons.insert(name.to_string(), record);
                EntryOutcome::Compiled
            }
            Err(err) => {
                tracing::debug!(icon = name, path = relative_path, error = %err, "icon failed");
                EntryOutcome::Failed(err)
            }
        };
        let report = EntryReport {
            name: name.to_string(),
            relative_path: relative_path.to_string(),
            outcome,
        };
        on_entry(idx, &report);
        entries.push(report);
    }

    CompileReport { document, entries }
}

pub fn compile_pack(base: &Path, table: &IconTable, prefix: &str) -> CompileReport {
    compile_pack_with(base, table, prefix, |_, _| {})
}

/// Writes the document as compact JSON and returns the artifact size in bytes.
pub fn write_pack(document: &IconPackDocument, path: &Path) -> Result<u64> {
    let json = document.to_json_string()?;
    std::fs::write(path, &json).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(json.len() as u64)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub name: String,
    pub candidates: Vec<String>,
}

fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Lists up to [`MAX_SUGGESTIONS`] filenames in `dir` whose normalized name contains each
/// requested name. Advisory only; a missing directory yields no suggestions.
pub fn suggest_candidates(dir: &Path, names: &[&str]) -> Result<Vec<Suggestion>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = std::fs::read_dir(dir)
        .map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    files.sort();

    let normalized = files.iter().map(|f| normalize_name(f)).collect::<Vec<_>>();

    Ok(names
        .iter()
        .map(|name| {
            let keyword = normalize_name(name);
            let candidates = files
                .iter()
                .zip(&normalized)
                .filter(|(_, norm)| norm.contains(&keyword))
                .take(MAX_SUGGESTIONS)
                .map(|(file, _)| file.clone())
                .collect();
            Suggestion {
                name: name.to_string(),
                candidates,
            }
        })
        .collect())
}

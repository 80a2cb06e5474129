//! Dependency manifest reading
//!
//! The manifest is a requirements file: one requirement, option directive
//! or file/URL reference per logical line. It is only read here so that a
//! missing, malformed or empty manifest is detected before the installer
//! runs; resolving and installing the entries is the package manager's job.

pub mod parser;


use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::error::{LaunchkitError, Result, step as step_error};

/// Version comparison operator of a specifier clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    ArbitraryEqual,
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,
    Compatible,
    Less,
    Greater,
}

impl Operator {
    /// Every operator, longest token first so prefix matching is unambiguous
    pub const ALL: [Operator; 8] = [
        Operator::ArbitraryEqual,
        Operator::Equal,
        Operator::NotEqual,
        Operator::LessEqual,
        Operator::GreaterEqual,
        Operator::Compatible,
        Operator::Less,
        Operator::Greater,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::ArbitraryEqual => "===",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::LessEqual => "<=",
            Operator::GreaterEqual => ">=",
            Operator::Compatible => "~=",
            Operator::Less => "<",
            Operator::Greater => ">",
        }
    }
}

/// One clause of a version constraint, e.g. `>=1.26`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpecifier {
    pub operator: Operator,
    pub version: String,
}

impl fmt::Display for VersionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator.as_str(), self.version)
    }
}

impl Serialize for VersionSpecifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A named package with optional extras, constraint, URL and marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub name: String,
    pub extras: Vec<String>,
    pub specifiers: Vec<VersionSpecifier>,
    pub url: Option<String>,
    pub marker: Option<String>,
    /// Per-requirement installer options, e.g. `--hash=sha256:...`
    pub options: Vec<Directive>,
}

impl Requirement {
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Constraint as written back, e.g. `>=1.0,<2`
    pub fn constraint(&self) -> String {
        match &self.url {
            Some(url) => format!("@ {url}"),
            None => self
                .specifiers
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// An installer option line such as `-r base.txt` or `--index-url ...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub flag: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntryKind {
    Requirement(Requirement),
    Directive(Directive),
    /// A local path, archive or VCS URL, kept verbatim
    Reference { target: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// 1-based line the entry starts on
    pub line: usize,
    #[serde(flatten)]
    pub kind: EntryKind,
}

/// A parsed dependency manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub path: PathBuf,
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Read and parse the manifest at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LaunchkitError::ManifestNotFound {
                path: display.clone(),
            },
            _ => LaunchkitError::ManifestReadFailed {
                path: display.clone(),
                reason: e.to_string(),
            },
        })?;

        Self::parse(path, &content)
    }

    /// Parse manifest content; `path` is only used for errors and display
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let entries = parser::logical_lines(content)
            .into_iter()
            .map(|(line, text)| {
                parser::parse_line(&text)
                    .map(|kind| ManifestEntry { line, kind })
                    .map_err(|reason| {
                        step_error::manifest_invalid(path.display().to_string(), line, reason)
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// A manifest with no entries of any kind needs no installer run
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.entries.iter().filter_map(|entry| match &entry.kind {
            EntryKind::Requirement(requirement) => Some(requirement),
            _ => None,
        })
    }

    /// Packages declared more than once, compared by normalized name
    ///
    /// Each later declaration is reported against the first one.
    pub fn duplicates(&self) -> Vec<DuplicateRequirement> {
        let mut first_seen: HashMap<String, usize> = HashMap::new();
        let mut duplicates = Vec::new();

        for entry in &self.entries {
            let EntryKind::Requirement(requirement) = &entry.kind else {
                continue;
            };
            match first_seen.entry(requirement.normalized_name()) {
                Entry::Occupied(first) => duplicates.push(DuplicateRequirement {
                    name: requirement.name.clone(),
                    first_line: *first.get(),
                    line: entry.line,
                }),
                Entry::Vacant(slot) => {
                    slot.insert(entry.line);
                }
            }
        }

        duplicates
    }
}

/// A requirement whose package was already declared on an earlier line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateRequirement {
    pub name: String,
    pub first_line: usize,
    pub line: usize,
}

/// Normalize a package name: lowercase, runs of `-`, `_`, `.` become `-`
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator = false;

    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                normalized.push('-');
            }
            in_separator = true;
        } else {
            normalized.push(c.to_ascii_lowercase());
            in_separator = false;
        }
    }

    normalized
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// A declared value of a matched type.
///
/// ```text
/// pub const MY_FLAG: Flag = "hello";
/// ```
///
/// is equivalent to `Match { name: "MY_FLAG", value: "\"hello\"" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub name: String,
    /// Canonical form of the value, the literal exactly as written in source.
    pub value: String,
}

impl Match {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Matches found by a scan, ready to be diffed against runtime values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Qualified name of the matched type, e.g. `full::Flag`.
    pub type_name: String,
    /// For struct types, the field tagged `#[typedecl(identifier)]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    /// Sorted by name.
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl Collection {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    pub fn with_matches(mut self, matches: Vec<Match>) -> Self {
        self.matches = matches;
        self
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// The difference between a [`Collection`] and a list of runtime values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    /// Declared matches never seen among the runtime values. Carries the
    /// collection's type and field name even when empty.
    pub missing: Collection,
    /// Canonical forms of runtime values that match no declaration.
    pub extra: Vec<String>,
}

impl Diff {
    /// Whether there is nothing in the diff.
    pub fn is_zero(&self) -> bool {
        self.missing.matches.is_empty() && self.extra.is_empty()
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("<Diff{}>");
        }

        if !self.missing.matches.is_empty() {
            f.write_str("Matches declared but not part of actual:\n")?;
            for m in &self.missing.matches {
                writeln!(f, "\t{} = {}", m.name, m.value)?;
            }
        }

        if !self.extra.is_empty() {
            f.write_str("Extra values provided but not part of Matches:\n")?;
            for v in &self.extra {
                writeln!(f, "\t{v}")?;
            }
        }

        Ok(())
    }
}

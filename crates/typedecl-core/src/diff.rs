//! Comparing a scanned [`Collection`] with runtime values.

use std::collections::HashMap;

use crate::encode::{canonical, Declared};
use crate::types::{Collection, Diff, Match};

impl Collection {
    /// Indicates differences between the collection and `actual`.
    ///
    /// Because a collection stores all values as strings, the difference is
    /// calculated on the canonical string form of each runtime value. Each
    /// runtime value accounts for at most one declaration; a repeated value
    /// shows up in `extra` the second time.
    pub fn diff<I>(&self, actual: I) -> Diff
    where
        I: IntoIterator,
        I::Item: Declared,
    {
        let mut values: HashMap<&str, &Match> = HashMap::with_capacity(self.matches.len());
        for m in &self.matches {
            values.insert(m.value.as_str(), m);
        }

        let mut extra = Vec::new();
        for item in actual {
            let val = canonical(&item, self);
            if values.remove(val.as_str()).is_some() {
                continue;
            }
            extra.push(val);
        }

        let mut missing: Vec<Match> = values.into_values().cloned().collect();
        missing.sort_by(|a, b| a.name.cmp(&b.name));

        Diff {
            missing: Collection {
                type_name: self.type_name.clone(),
                field_name: self.field_name.clone(),
                matches: missing,
            },
            extra,
        }
    }

    /// A copy of the collection without the matches for `ignored` values.
    ///
    /// Useful when some values are intentionally left out of a list but new
    /// declarations should still be reported.
    pub fn without<I>(&self, ignored: I) -> Collection
    where
        I: IntoIterator,
        I::Item: Declared,
    {
        let skip: Vec<String> = ignored
            .into_iter()
            .map(|item| canonical(&item, self))
            .collect();

        Collection {
            type_name: self.type_name.clone(),
            field_name: self.field_name.clone(),
            matches: self
                .matches
                .iter()
                .filter(|m| !skip.contains(&m.value))
                .cloned()
                .collect(),
        }
    }
}

use serde::{Deserialize, Serialize};
use crate::errors::CategoryError;

pub const DEFAULT_CATEGORIES: [&str; 9] = [
    "embroidery",
    "knitting",
    "quilting",
    "macrame",
    "cross-stitch",
    "crochet",
    "weaving",
    "sewing",
    "other",
];

/// User-managed labels a project can be filed under. Names are stored
/// trimmed and lowercased, in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet(Vec<String>);

impl Default for CategorySet {
    fn default() -> Self {
        Self(DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect())
    }
}

impl CategorySet {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|c| c == name)
    }

    pub fn add(&mut self, raw: &str) -> Result<&str, CategoryError> {
        let name = normalize(raw).ok_or(CategoryError::EmptyName)?;
        if self.contains(&name) {
            return Err(CategoryError::Duplicate(name));
        }
        self.0.push(name);
        Ok(self.0.last().map(String::as_str).unwrap_or_default())
    }

    /// Rename in place. Keeping the current name is allowed; taking the
    /// name of a different category is not.
    pub fn rename(&mut self, index: usize, raw: &str) -> Result<(), CategoryError> {
        if index >= self.0.len() {
            return Err(CategoryError::IndexOutOfRange(index));
        }
        let name = normalize(raw).ok_or(CategoryError::EmptyName)?;
        if let Some(existing) = self.position(&name) {
            if existing != index {
                return Err(CategoryError::Duplicate(name));
            }
        }
        self.0[index] = name;
        Ok(())
    }

    /// Remove the category at `index` unless `in_use` reports a project
    /// filed under it. `confirm` is only asked once the category is free.
    pub fn delete(
        &mut self,
        index: usize,
        in_use: impl Fn(&str) -> bool,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<String, CategoryError> {
        let name = self
            .get(index)
            .ok_or(CategoryError::IndexOutOfRange(index))?
            .to_string();

        if in_use(&name) {
            return Err(CategoryError::InUse(name));
        }
        if !confirm(&name) {
            return Err(CategoryError::Declined(name));
        }

        Ok(self.0.remove(index))
    }
}

fn normalize(raw: &str) -> Option<String> {
    let name = raw.trim().to_lowercase();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

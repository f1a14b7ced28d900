#![forbid(unsafe_code)]

//! Section descriptors.

use thiserror::Error;

/// A named content region: stable `id`, human `label`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionDescriptor {
    pub id: String,
    pub label: String,
}

impl SectionDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionListError {
    #[error("a section list needs at least one section")]
    Empty,
    #[error("duplicate section id: {id}")]
    DuplicateId { id: String },
}

/// Ordered, non-empty list of sections with unique ids.
///
/// Index `i` names both the i-th navigation entry and the i-th content
/// block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionList {
    sections: Vec<SectionDescriptor>,
}

impl SectionList {
    pub fn new(
        sections: impl IntoIterator<Item = SectionDescriptor>,
    ) -> Result<Self, SectionListError> {
        let sections: Vec<SectionDescriptor> = sections.into_iter().collect();
        if sections.is_empty() {
            return Err(SectionListError::Empty);
        }
        for (i, s) in sections.iter().enumerate() {
            if sections[..i].iter().any(|prev| prev.id == s.id) {
                return Err(SectionListError::DuplicateId { id: s.id.clone() });
            }
        }
        Ok(Self { sections })
    }

    /// Build from `(id, label)` pairs.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, SectionListError> {
        Self::new(
            pairs
                .into_iter()
                .map(|(id, label)| SectionDescriptor::new(id, label)),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SectionDescriptor> {
        self.sections.get(index)
    }

    /// Position of the section with `id`.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SectionDescriptor> {
        self.sections.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.id.as_str())
    }
}

impl<'a> IntoIterator for &'a SectionList {
    type Item = &'a SectionDescriptor;
    type IntoIter = std::slice::Iter<'a, SectionDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

#![forbid(unsafe_code)]

//! Display titles for bar segments.
//!
//! A child reports its selected text through `update_title`; the bar
//! resolves each label at render time with [`resolve_title`].

use super::entry::{EntryConfig, MenuOption};

/// Ordered per-entry title overrides, grown lazily on first write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleOverrides {
    titles: Vec<Option<String>>,
}

impl TitleOverrides {
    /// No overrides recorded.
    #[must_use]
    pub const fn new() -> Self {
        Self { titles: Vec::new() }
    }

    /// The last override recorded for `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.titles.get(index).and_then(|t| t.as_deref())
    }

    /// Overwrite the override for `index`.
    pub(crate) fn set(&mut self, index: usize, text: impl Into<String>) {
        if self.titles.len() <= index {
            self.titles.resize(index + 1, None);
        }
        self.titles[index] = Some(text.into());
    }

    /// Forget all overrides.
    pub(crate) fn reset(&mut self) {
        self.titles.clear();
    }
}

/// Resolve the label shown for one entry. First non-empty match wins:
///
/// 1. the entry's static title
/// 2. the override recorded for its position
/// 3. the text of the first option whose value equals the current value
/// 4. the empty string
#[must_use]
pub fn resolve_title<'a>(entry: &EntryConfig<'a>, override_title: Option<&'a str>) -> &'a str {
    if let Some(title) = entry.title.filter(|t| !t.is_empty()) {
        return title;
    }
    if let Some(title) = override_title.filter(|t| !t.is_empty()) {
        return title;
    }
    let options: &'a [MenuOption] = entry.options;
    entry
        .value
        .and_then(|value| options.iter().find(|option| option.value == value))
        .map(|option| option.text.as_str())
        .filter(|text| !text.is_empty())
        .unwrap_or("")
}

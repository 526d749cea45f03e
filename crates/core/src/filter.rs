//! Selection and ordering over the loaded prompt collection
//!
//! Everything here is a pure function over borrowed prompts. The popup
//! composes them as `order(search(..))` or `order(filter_by(..))` on every
//! render.

use serde::{Deserialize, Serialize};

use crate::db::Prompt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Pinned,
}

pub fn filter_by(mode: FilterMode, prompts: &[Prompt]) -> Vec<&Prompt> {
    match mode {
        FilterMode::All => prompts.iter().collect(),
        FilterMode::Pinned => prompts.iter().filter(|p| p.is_pinned).collect(),
    }
}

/// `(pinned, unpinned)`, each in input order
pub fn partition_pinned(prompts: &[Prompt]) -> (Vec<&Prompt>, Vec<&Prompt>) {
    prompts.iter().partition(|p| p.is_pinned)
}

/// Case-insensitive substring match on title or content
///
/// An empty query matches everything; callers treat an empty search box as
/// "no search" and never get here with one.
pub fn search<'a>(query: &str, prompts: &'a [Prompt]) -> Vec<&'a Prompt> {
    let needle = query.to_lowercase();
    prompts
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle) || p.content.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Pinned first, then most recently used; stable for ties
pub fn order(mut prompts: Vec<&Prompt>) -> Vec<&Prompt> {
    prompts.sort_by(|a, b| {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then_with(|| b.last_used_or_zero().cmp(&a.last_used_or_zero()))
    });
    prompts
}

//! Land map - symmetric adjacency between players
//!
//! Players without a land link can still reach each other by sea, so the map
//! only decides whether an attack pays the sea penalty.

use std::collections::BTreeSet;

use crate::core::error::ValidationError;
use crate::core::types::PlayerIndex;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LandMap {
    links: Vec<BTreeSet<PlayerIndex>>,
}

impl LandMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from raw link lists after checking it
    pub fn from_links(
        links: Vec<BTreeSet<PlayerIndex>>,
        player_count: usize,
    ) -> Result<Self, ValidationError> {
        Self::check(&links, player_count)?;
        Ok(Self { links })
    }

    /// Wrap a link table that already passed [`LandMap::check`]
    pub(crate) fn from_checked(links: Vec<BTreeSet<PlayerIndex>>) -> Self {
        Self { links }
    }

    /// Verify a link table covers every player, stays in range and is symmetric
    pub fn check(links: &[BTreeSet<PlayerIndex>], player_count: usize) -> Result<(), ValidationError> {
        if links.len() < player_count {
            return Err(ValidationError::MapTooShort {
                entries: links.len(),
                required: player_count,
            });
        }

        for (from, neighbours) in links.iter().enumerate() {
            for &to in neighbours {
                let Some(back) = links.get(to) else {
                    return Err(ValidationError::MapLinkOutOfRange { from, to });
                };
                if !back.contains(&from) {
                    return Err(ValidationError::MapAsymmetric { from, to });
                }
            }
        }

        Ok(())
    }

    /// Whether two players share a land border
    pub fn linked(&self, a: PlayerIndex, b: PlayerIndex) -> bool {
        self.links.get(a).is_some_and(|set| set.contains(&b))
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn links(&self) -> &[BTreeSet<PlayerIndex>] {
        &self.links
    }

    /// Add unlinked entries until the map covers `len` players
    pub fn grow_to(&mut self, len: usize) {
        if self.links.len() < len {
            self.links.resize_with(len, BTreeSet::new);
        }
    }

    pub fn truncate(&mut self, len: usize) {
        self.links.truncate(len);
    }

    pub fn is_symmetric(&self) -> bool {
        Self::check(&self.links, 0).is_ok()
    }

    /// Bracketed payload accepted by `set-map`, e.g. `[[1],[0]]`
    pub fn to_payload(&self) -> String {
        let lists: Vec<String> = self
            .links
            .iter()
            .map(|set| {
                let linked: Vec<String> = set.iter().map(|p| p.to_string()).collect();
                format!("[{}]", linked.join(","))
            })
            .collect();
        format!("[{}]", lists.join(","))
    }
}

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::Result;

/// One `raw identity -> canonical owner` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    /// Raw identity as it appears in blame output (a committer email).
    pub identity: String,
    /// Canonical owner name credited for that identity.
    pub owner: String,
}

/// Ordered mapping from raw blame identities to canonical owner names.
///
/// Entries keep the document order of the config file. Ranking ties are
/// broken by first appearance, so iteration order is part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    /// Read the alias table from a JSON object of identity -> owner pairs.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(identity, owner)| AliasEntry {
                    identity: identity.into(),
                    owner: owner.into(),
                })
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Hand-rolled so entries stay in document order; deserializing through a
// standard map type would reorder keys.
impl<'de> Deserialize<'de> for AliasTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = AliasTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of blame identity to owner name")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((identity, owner)) = map.next_entry::<String, String>()? {
                    entries.push(AliasEntry { identity, owner });
                }
                Ok(AliasTable { entries })
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

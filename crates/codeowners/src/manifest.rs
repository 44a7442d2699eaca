use std::path::Path;

use crate::Result;

/// Comment block written ahead of the entries on every rewrite. Parsing
/// skips it, so rewrites stay stable.
const HEADER: &str = "\
# Lines starting with '#' are comments.
# Each line is a file pattern followed by one or more owners.
# These owners will be the default owners for everything in the repo.
# * <@insert_github_username>
#
# Order is important. The last matching pattern has the most precedence.


# This file is also being managed automatically by the gitown tool.
";

/// One `pattern owner…` line of a CODEOWNERS file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub pattern: String,
    pub owners: Vec<String>,
}

/// Ordered mapping of file pattern to owner list.
///
/// Order is significant: the last matching pattern takes precedence, and
/// rewrites must keep the existing relative order with new keys appended.
/// Owners within an entry are kept verbatim, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the space-delimited manifest format.
    ///
    /// A line whose first field is empty or starts with `#` is skipped.
    /// A repeated pattern keeps its first position and takes the last
    /// owner list.
    pub fn parse(text: &str) -> Self {
        let mut manifest = Self::new();
        for line in text.lines() {
            let mut fields = line.split(' ');
            let pattern = fields.next().unwrap_or_default();
            if pattern.is_empty() || pattern.starts_with('#') {
                continue;
            }
            let owners: Vec<String> = fields
                .filter(|field| !field.is_empty())
                .map(str::to_string)
                .collect();
            manifest.set(pattern, owners);
        }
        manifest
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Render the comment header followed by one line per entry.
    pub fn render(&self) -> String {
        let mut out = String::from(HEADER);
        for entry in &self.entries {
            out.push_str(&entry.pattern);
            for owner in &entry.owners {
                out.push(' ');
                out.push_str(owner);
            }
            out.push('\n');
        }
        out
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.render())?;
        Ok(())
    }

    /// Replace the owner list under `pattern`, or append a new entry.
    pub fn set(&mut self, pattern: impl Into<String>, owners: Vec<String>) {
        let pattern = pattern.into();
        match self.entries.iter_mut().find(|e| e.pattern == pattern) {
            Some(entry) => entry.owners = owners,
            None => self.entries.push(ManifestEntry { pattern, owners }),
        }
    }

    pub fn get(&self, pattern: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.pattern == pattern)
            .map(|e| e.owners.as_slice())
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.entries.iter().any(|e| e.pattern == pattern)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

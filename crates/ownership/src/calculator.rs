use std::collections::HashMap;

use crate::alias::AliasTable;
use crate::blame::BlameSource;
use crate::Result;

/// Computes the qualifying owners of a file from blame line frequencies.
///
/// Blame text is fetched through the source at most once per distinct path
/// and kept for the lifetime of the calculator; the working set is bounded
/// by the file list of a single run, so nothing is ever evicted.
pub struct OwnershipCalculator<S> {
    source: S,
    aliases: AliasTable,
    threshold: f64,
    blame_cache: HashMap<String, String>,
}

impl<S: BlameSource> OwnershipCalculator<S> {
    pub fn new(source: S, aliases: AliasTable, threshold: f64) -> Self {
        Self {
            source,
            aliases,
            threshold,
            blame_cache: HashMap::new(),
        }
    }

    /// Owner names whose accumulated line frequency strictly exceeds the
    /// threshold, lowest frequency first.
    ///
    /// An empty result means no qualifying owners, not a failure.
    pub fn owners_for(&mut self, path: &str) -> Result<Vec<String>> {
        if !self.blame_cache.contains_key(path) {
            let text = self.source.blame(path)?;
            self.blame_cache.insert(path.to_string(), text);
        }
        let blame = &self.blame_cache[path];
        let total_lines = blame.matches('\n').count();

        // Accumulate additively per canonical owner: several identities may
        // alias to the same owner, and their shares sum (past 100 included).
        // First-appearance order is kept so equal frequencies rank in alias
        // table order.
        let mut frequencies: Vec<(String, f64)> = Vec::new();
        for entry in self.aliases.iter() {
            let percentage = if total_lines == 0 {
                0.0
            } else {
                let occurrences = blame.matches(entry.identity.as_str()).count();
                occurrences as f64 / total_lines as f64 * 100.0
            };
            match frequencies.iter_mut().find(|(owner, _)| *owner == entry.owner) {
                Some((_, sum)) => *sum += percentage,
                None => frequencies.push((entry.owner.clone(), percentage)),
            }
        }
        log::trace!("{path} line frequencies: {frequencies:?}");

        frequencies.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(frequencies
            .into_iter()
            .filter(|(_, percentage)| *percentage > self.threshold)
            .map(|(owner, _)| owner)
            .collect())
    }
}

use crate::manifest::Manifest;

/// Result of merging freshly computed ownership into an existing manifest.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Original entries with fresh owner lists merged in and new patterns
    /// appended.
    pub updated: Manifest,
    /// `updated` with wildcard-redundant entries stripped.
    pub optimized: Manifest,
    /// Whether `optimized` differs from the original manifest.
    pub changed: bool,
}

/// Merge `fresh` ownership into `original`, then strip entries whose owners
/// the wildcard default already implies.
///
/// The splat owner set is snapshotted once, between the carry-forward pass
/// and the insertion pass, and held fixed for both redundancy filters.
pub fn reconcile(original: &Manifest, fresh: &Manifest) -> Reconciliation {
    let mut updated = Manifest::new();

    // Carry forward every existing pattern in order; a fresh owner list for
    // the same key replaces the stored one wholesale.
    for entry in original.iter() {
        let owners = fresh.get(&entry.pattern).unwrap_or(&entry.owners).to_vec();
        updated.set(entry.pattern.clone(), owners);
    }

    let splat: Vec<String> = updated.get("*").map(<[String]>::to_vec).unwrap_or_default();

    // Append fresh patterns unknown to the original, unless the wildcard
    // default already implies one of their owners.
    for entry in fresh.iter() {
        if original.contains(&entry.pattern) {
            continue;
        }
        if !intersects(&entry.owners, &splat) {
            updated.set(entry.pattern.clone(), entry.owners.clone());
        } else {
            log::debug!(
                "suppressing {} {:?}: covered by * {:?}",
                entry.pattern,
                entry.owners,
                splat
            );
        }
    }

    // Second filter over the merged result: carried entries may have become
    // redundant only after the merge. The "*" entry itself always stays.
    let mut optimized = Manifest::new();
    for entry in updated.iter() {
        if entry.pattern == "*" || !intersects(&entry.owners, &splat) {
            optimized.set(entry.pattern.clone(), entry.owners.clone());
        }
    }

    let changed = optimized != *original;
    Reconciliation {
        updated,
        optimized,
        changed,
    }
}

fn intersects(owners: &[String], splat: &[String]) -> bool {
    owners.iter().any(|owner| splat.contains(owner))
}

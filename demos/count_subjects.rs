use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Distinct subjects with at least one event, per arm.
fn subjects_with_event(rows: &[(String, String)]) -> BTreeMap<&str, usize> {
    let mut seen: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for (arm, subject) in rows {
        seen.entry(arm).or_default().insert(subject);
    }
    seen.into_iter().map(|(arm, ids)| (arm, ids.len())).collect()
}

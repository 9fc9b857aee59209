use crate::alias::AliasSnapshot;

/// One alias surfaced to the user: what to display and the command to hand
/// to the terminal runner when picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Display label, the alias name.
    pub label: String,
    /// Secondary description, the verbatim expansion.
    pub description: String,
    /// The string to run in a terminal. The alias name itself: running it
    /// in an interactive shell resolves the alias again.
    pub command: String,
}

/// Filter a snapshot against the typed query. An entry is kept iff its name
/// contains the query as a contiguous, case-sensitive substring; the empty
/// query keeps everything. Snapshot order is preserved and no score is
/// computed. Never fails: an empty snapshot yields an empty result list.
pub fn match_query(snapshot: &AliasSnapshot, query: &str) -> Vec<MatchResult> {
    snapshot
        .entries()
        .iter()
        .filter(|entry| entry.name.contains(query))
        .map(|entry| MatchResult {
            label: entry.name.clone(),
            description: entry.expansion.clone(),
            command: entry.name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::decode_listing;

    fn snapshot() -> AliasSnapshot {
        decode_listing("alias ll='ls -la'\nalias gs=git status\nalias empty=\n")
    }

    fn labels(results: &[MatchResult]) -> Vec<&str> {
        results.iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn matches_on_name_substring_only() {
        let results = match_query(&snapshot(), "l");
        assert_eq!(labels(&results), vec!["ll"]);
        // "empty" would match on expansion content if the filter leaked
        // into descriptions; it must not.
        assert!(match_query(&snapshot(), "status").is_empty());
    }

    #[test]
    fn empty_query_returns_every_entry_in_order() {
        let results = match_query(&snapshot(), "");
        assert_eq!(labels(&results), vec!["ll", "gs", "empty"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(match_query(&snapshot(), "LL").is_empty());
    }

    #[test]
    fn each_matching_entry_appears_exactly_once() {
        let snapshot = decode_listing("alias lla=1\nalias all=2\nalias ll=3\n");
        let results = match_query(&snapshot, "ll");
        assert_eq!(labels(&results), vec!["lla", "all", "ll"]);
    }

    #[test]
    fn result_carries_name_expansion_and_runnable_command() {
        let results = match_query(&snapshot(), "gs");
        assert_eq!(
            results,
            vec![MatchResult {
                label: "gs".to_string(),
                description: "git status".to_string(),
                command: "gs".to_string(),
            }]
        );
    }

    #[test]
    fn empty_snapshot_yields_empty_results() {
        assert!(match_query(&AliasSnapshot::new(), "anything").is_empty());
        assert!(match_query(&AliasSnapshot::new(), "").is_empty());
    }
}

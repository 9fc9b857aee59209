/// A single resolved alias: its name and the verbatim right-hand side it
/// expands to. Surrounding quote characters emitted by the shell listing
/// are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub name: String,
    pub expansion: String,
}

/// The aliases resolved from one listing invocation, in first-seen order.
/// Built once per query and never mutated afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AliasSnapshot {
    entries: Vec<AliasEntry>,
}

impl AliasSnapshot {
    pub fn new() -> AliasSnapshot {
        AliasSnapshot {
            entries: Vec::new(),
        }
    }

    /// Record an entry. A name declared twice keeps its original position
    /// but takes the latest expansion, the way re-declaring an alias in a
    /// running shell does.
    fn push(&mut self, name: String, expansion: String) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => existing.expansion = expansion,
            None => self.entries.push(AliasEntry { name, expansion }),
        }
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decode the text produced by `alias` in an interactive bash into a
/// snapshot. Lines that do not follow the `alias name=value` convention
/// are dropped, never turned into partial entries.
pub fn decode_listing(listing: &str) -> AliasSnapshot {
    let mut snapshot = AliasSnapshot::new();

    for line in listing.lines() {
        if line.is_empty() {
            continue;
        }
        if let Some((name, expansion)) = parse_line(line) {
            snapshot.push(name.to_string(), expansion.to_string());
        }
    }

    snapshot
}

/// Split one listing line into `(name, expansion)`. A single pass: drop the
/// declaration keyword by taking everything after the first space, then cut
/// at the first `=`. The same pair is reused for every field downstream, so
/// the line is never parsed twice.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    // "alias ll='ls -la'" -> "ll='ls -la'"
    let (_keyword, declaration) = line.split_once(' ')?;
    let (name, expansion) = declaration.split_once('=')?;
    if name.is_empty() {
        return None;
    }
    Some((name, expansion))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "alias ll='ls -la'\nalias gs=git status\nnot a valid line\nalias empty=\n";

    fn entry(name: &str, expansion: &str) -> AliasEntry {
        AliasEntry {
            name: name.to_string(),
            expansion: expansion.to_string(),
        }
    }

    #[test]
    fn decodes_well_formed_lines_and_drops_the_rest() {
        let snapshot = decode_listing(LISTING);
        assert_eq!(
            snapshot.entries(),
            &[
                entry("ll", "'ls -la'"),
                entry("gs", "git status"),
                entry("empty", ""),
            ]
        );
    }

    #[test]
    fn decoding_is_idempotent() {
        assert_eq!(decode_listing(LISTING), decode_listing(LISTING));
    }

    #[test]
    fn line_without_equal_sign_is_dropped() {
        assert!(decode_listing("alias broken\n").is_empty());
    }

    #[test]
    fn line_without_keyword_prefix_is_dropped() {
        assert!(decode_listing("ll='ls -la'\n").is_empty());
    }

    #[test]
    fn empty_name_is_dropped() {
        assert!(decode_listing("alias ='oops'\n").is_empty());
    }

    #[test]
    fn expansion_keeps_embedded_equal_signs_and_quotes() {
        let snapshot = decode_listing("alias grep='grep --color=auto'\n");
        assert_eq!(snapshot.entries(), &[entry("grep", "'grep --color=auto'")]);
    }

    #[test]
    fn duplicate_name_keeps_position_and_takes_latest_expansion() {
        let snapshot = decode_listing("alias a=1\nalias b=2\nalias a=3\n");
        assert_eq!(snapshot.entries(), &[entry("a", "3"), entry("b", "2")]);
    }

    #[test]
    fn empty_listing_decodes_to_empty_snapshot() {
        assert!(decode_listing("").is_empty());
        assert!(decode_listing("\n\n").is_empty());
    }
}

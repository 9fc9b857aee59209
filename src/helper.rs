use crate::matcher::match_query;
use crate::source::AliasSource;

use std::borrow::Cow::{self, Borrowed, Owned};
use std::io::Cursor;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{Highlighter, MatchingBracketHighlighter};
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::{self, MatchingBracketValidator, Validator};
use rustyline::Context;
use rustyline_derive::Helper;

use skim::prelude::*;

#[derive(Helper)]
pub struct AlfHelper {
    pub completer: AliasCompleter,
    pub highlighter: MatchingBracketHighlighter,
    pub validator: MatchingBracketValidator,
    pub hinter: HistoryHinter,
    pub colored_prompt: String,
}

impl Completer for AlfHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Hinter for AlfHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for AlfHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Borrowed(&self.colored_prompt)
        } else {
            Borrowed(prompt)
        }
    }

    /// Hint for query suggestions based on history
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned("\x1b[2m".to_owned() + hint + "\x1b[m")
    }

    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_char(&self, line: &str, pos: usize) -> bool {
        self.highlighter.highlight_char(line, pos)
    }
}

impl Validator for AlfHelper {
    fn validate(
        &self,
        ctx: &mut validate::ValidationContext,
    ) -> rustyline::Result<validate::ValidationResult> {
        self.validator.validate(ctx)
    }

    fn validate_while_typing(&self) -> bool {
        self.validator.validate_while_typing()
    }
}

/// A `Completer` over the names of the currently defined aliases.
pub struct AliasCompleter {
    source: AliasSource,
}

impl AliasCompleter {
    pub fn new(source: AliasSource) -> AliasCompleter {
        AliasCompleter { source }
    }

    /// Complete the typed query against a fresh snapshot of alias names.
    /// Any name containing the query is a candidate; a single candidate is
    /// substituted right away, several go through skim so the user can pick
    /// one.
    fn try_complete_query(&self, line: &str, pos: usize) -> rustyline::Result<(usize, Vec<Pair>)> {
        let pattern = &line[..pos];

        let snapshot = match self.source.fetch() {
            Ok(s) => s,
            Err(e) => {
                // No listing, no completion. The query loop will surface
                // the warning on its next fetch.
                log::debug!("No completion, alias listing unavailable: {}", e);
                return Ok((0, Vec::new()));
            }
        };

        let candidates: Vec<String> = match_query(&snapshot, pattern)
            .into_iter()
            .map(|result| result.label)
            .collect();

        if candidates.len() > 1 {
            // Several aliases match what has been typed so far, let skim
            // filter them
            let options = SkimOptionsBuilder::default()
                .height(Some("30%"))
                .multi(false)
                .reverse(true)
                .build()
                .unwrap();
            let item_reader = SkimItemReader::default();
            let items = item_reader.of_bufread(Cursor::new(candidates.join("\n")));

            #[allow(clippy::redundant_closure)]
            let selected_items = Skim::run_with(&options, Some(items))
                .map(|out| out.selected_items)
                .unwrap_or_else(|| Vec::new());

            let mut entries = Vec::new();
            if let Some(item) = selected_items.first() {
                entries.push(Pair {
                    display: "".into(), // No display needed, the line is replaced in place
                    replacement: item.output().to_string(),
                });
            }
            return Ok((0, entries));
        }

        let entries = candidates
            .into_iter()
            .map(|name| Pair {
                display: "".into(),
                replacement: name,
            })
            .collect();
        Ok((0, entries))
    }
}

impl Completer for AliasCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        self.try_complete_query(line, pos)
    }
}

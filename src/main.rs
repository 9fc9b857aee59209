#[macro_use]
mod macros;

mod alias;
mod config;
mod helper;
mod logging;
mod matcher;
mod source;
mod terminal;
mod utils;

use crate::alias::AliasSnapshot;
use crate::config::ConfigFile;
use crate::helper::{AlfHelper, AliasCompleter};
use crate::matcher::{match_query, MatchResult};
use crate::source::AliasSource;
use crate::terminal::{ExternalTerminal, TerminalRunner};
use crate::utils::{expand_path, history_path};

use std::fs::OpenOptions;
use std::io::{stdout, Write};

use console::style;
use rustyline::error::ReadlineError;
use rustyline::highlight::MatchingBracketHighlighter;
use rustyline::hint::HistoryHinter;
use rustyline::validate::MatchingBracketValidator;
use rustyline::{Cmd, CompletionType, Config, Editor, KeyEvent, Movement, Word};

/// Fetch a fresh snapshot for this query, dumping the raw listing if the
/// configuration asks for one. Any source failure means "no aliases right
/// now": warn the operator and carry on with an empty snapshot.
fn fetch_snapshot(config: &ConfigFile, source: &AliasSource) -> AliasSnapshot {
    let fetched = match &config.dump_file {
        Some(path) => {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(expand_path(path));
            match file {
                Ok(mut f) => source.fetch_with_dump(Some(&mut f)),
                Err(e) => {
                    wwarning!("Cannot open dump file '{}': {}", path, e);
                    source.fetch()
                }
            }
        }
        None => source.fetch(),
    };

    match fetched {
        Ok(snapshot) => snapshot,
        Err(e) => {
            wwarning!("Alias listing unavailable: {}", e);
            AliasSnapshot::new()
        }
    }
}

fn run_query(config: &ConfigFile, source: &AliasSource, query: &str) -> Vec<MatchResult> {
    let snapshot = fetch_snapshot(config, source);
    let results = match_query(&snapshot, query);
    wdebug!(
        config,
        "{} aliases in snapshot, {} matching '{}'",
        snapshot.len(),
        results.len(),
        query
    );
    results
}

fn render(results: &[MatchResult]) {
    if results.is_empty() {
        println!("{}", style("No matching alias").dim());
        return;
    }
    for (i, result) in results.iter().enumerate() {
        println!(
            "{} {} {}",
            style(format!("{:>3}.", i + 1)).dim(),
            style(&result.label).green().bold(),
            style(&result.description).dim(),
        );
    }
}

fn main() -> rustyline::Result<()> {
    logging::setup_logging();
    let config = ConfigFile::new();

    let source = AliasSource::new(&config.shell, config.timeout());
    let runner = ExternalTerminal::new(&config.terminal, &config.shell);

    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .build();
    let helper = AlfHelper {
        // The completer fetches its own snapshots, one per Tab press
        completer: AliasCompleter::new(AliasSource::new(&config.shell, config.timeout())),
        highlighter: MatchingBracketHighlighter::new(),
        validator: MatchingBracketValidator::new(),
        hinter: HistoryHinter {},
        colored_prompt: "".to_owned(),
    };
    let mut rl = Editor::with_config(rl_config);
    rl.set_helper(Some(helper));

    // Keybindings mimicking the usual interactive-shell plugins
    rl.bind_sequence(KeyEvent::alt('n'), Cmd::HistorySearchForward);
    rl.bind_sequence(KeyEvent::alt('p'), Cmd::HistorySearchBackward);
    rl.bind_sequence(
        KeyEvent::alt('w'),
        Cmd::Kill(Movement::BackwardWord(1, Word::Emacs)),
    );
    rl.bind_sequence(KeyEvent::ctrl('f'), Cmd::CompleteHint);

    let history = history_path();
    let _ = rl.load_history(&history);

    // Results of the previous query, so a typed number can pick one
    let mut last_results: Vec<MatchResult> = Vec::new();

    loop {
        let prompt = format!("{} ", config.prompt);
        // Need to explicitly flush to ensure it prints before read_line
        stdout().flush().unwrap();
        rl.helper_mut().expect("No helper").colored_prompt =
            format!("{} ", style(&config.prompt).green().bold());

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    // An empty query matches every alias
                    last_results = run_query(&config, &source, "");
                    render(&last_results);
                    continue;
                }

                rl.add_history_entry(line);
                let _ = rl.save_history(&history);

                if line == "exit" {
                    break;
                }

                // A bare number runs that entry from the previous listing
                if let Ok(n) = line.parse::<usize>() {
                    match n.checked_sub(1).and_then(|i| last_results.get(i)) {
                        Some(result) => {
                            winfo!("Running '{}'", result.command);
                            runner.run(&result.command);
                        }
                        None => {
                            wwarning!("No result number {}", n);
                        }
                    }
                    continue;
                }

                // "!query" runs the first match right away
                if let Some(query) = line.strip_prefix('!') {
                    let query = query.trim();
                    last_results = run_query(&config, &source, query);
                    match last_results.first() {
                        Some(result) => {
                            winfo!("Running '{}'", result.command);
                            runner.run(&result.command);
                        }
                        None => {
                            wwarning!("No alias matching '{}'", query);
                        }
                    }
                    continue;
                }

                last_results = run_query(&config, &source, line);
                render(&last_results);
            }
            Err(ReadlineError::Interrupted) => (),
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                werror!("Interactive error: {:?}. Exiting", err);
                break;
            }
        }
    }
    let _ = rl.save_history(&history);

    Ok(())
}

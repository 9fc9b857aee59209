use std::process::{Command, Stdio};

use console::style;

/// Host-side "run in terminal" capability. The matcher only supplies the
/// string to run; whatever implements this decides how a terminal gets
/// spawned.
pub trait TerminalRunner {
    /// Fire-and-forget: dispatch `command` and return without waiting for
    /// or inspecting its outcome.
    fn run(&self, command: &str);
}

/// Runs commands through an external terminal emulator, e.g.
/// `x-terminal-emulator -e bash -ic <command>`. The interactive shell
/// resolves the alias name again on its side.
pub struct ExternalTerminal {
    terminal: String,
    shell: String,
}

impl ExternalTerminal {
    pub fn new(terminal: &str, shell: &str) -> ExternalTerminal {
        ExternalTerminal {
            terminal: terminal.to_string(),
            shell: shell.to_string(),
        }
    }
}

impl TerminalRunner for ExternalTerminal {
    fn run(&self, command: &str) {
        let argv = match build_command(&self.terminal, &self.shell, command) {
            Ok(argv) => argv,
            Err(e) => {
                werror!("Bad terminal command '{}': {}", self.terminal, e);
                return;
            }
        };
        if argv.is_empty() {
            werror!("No terminal command configured");
            return;
        }

        let spawned = Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(_) => log::info!("Dispatched '{}' to {}", command, argv[0]),
            Err(e) => {
                werror!("Failed to spawn terminal '{}': {}", argv[0], e);
            }
        }
    }
}

/// Split the configured terminal command line and append the shell
/// invocation that will run `command` interactively.
fn build_command(
    terminal: &str,
    shell: &str,
    command: &str,
) -> Result<Vec<String>, shell_words::ParseError> {
    let mut argv = shell_words::split(terminal)?;
    if argv.is_empty() {
        return Ok(argv);
    }
    argv.push(shell.to_string());
    argv.push("-ic".to_string());
    argv.push(command.to_string());
    Ok(argv)
}

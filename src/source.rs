use crate::alias::{decode_listing, AliasSnapshot};

use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::string::FromUtf8Error;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Any of these means "no aliases available for this query". Callers are
/// expected to log and present an empty result list, not to crash.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("failed to wait for '{program}': {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },
    #[error("'{program}' exited with {status}")]
    Exit { program: String, status: ExitStatus },
    #[error("'{program}' did not produce the alias listing within {timeout:?}")]
    Timeout { program: String, timeout: Duration },
    #[error("alias listing is not valid UTF-8: {0}")]
    Decode(#[from] FromUtf8Error),
    #[error("failed to read the alias listing: {0}")]
    Read(std::io::Error),
}

/// Obtains the current alias table by running the single `alias` builtin in
/// an interactive shell and decoding its output. Stateless: every fetch
/// re-invokes the shell, so each query sees the live table.
pub struct AliasSource {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl AliasSource {
    /// Source backed by `<shell> -i -c alias`. Interactive mode so the
    /// user's profile, and therefore their aliases, get loaded.
    pub fn new(shell: &str, timeout: Duration) -> AliasSource {
        AliasSource::with_command(shell, &["-i", "-c", "alias"], timeout)
    }

    fn with_command(program: &str, args: &[&str], timeout: Duration) -> AliasSource {
        AliasSource {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            timeout,
        }
    }

    pub fn fetch(&self) -> Result<AliasSnapshot, SourceError> {
        self.fetch_with_dump(None)
    }

    /// Fetch a fresh snapshot, optionally copying the raw listing text to
    /// `dump` for diagnostic inspection. A failing dump sink is logged and
    /// does not fail the fetch.
    pub fn fetch_with_dump(
        &self,
        dump: Option<&mut dyn Write>,
    ) -> Result<AliasSnapshot, SourceError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SourceError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Drain stdout from a separate thread. An interactive shell with a
        // verbose profile could otherwise fill the pipe and never exit
        // while we poll for its status.
        let mut stdout = child.stdout.take().expect("child stdout is piped");
        let reader = thread::spawn(move || {
            let mut buffer = Vec::new();
            stdout.read_to_end(&mut buffer).map(|_| buffer)
        });

        let status = self.wait_bounded(&mut child)?;
        let output = reader
            .join()
            .expect("listing reader thread panicked")
            .map_err(SourceError::Read)?;

        if !status.success() {
            return Err(SourceError::Exit {
                program: self.program.clone(),
                status,
            });
        }

        let listing = String::from_utf8(output)?;

        if let Some(sink) = dump {
            if let Err(e) = sink.write_all(listing.as_bytes()) {
                log::warn!("Failed to dump raw alias listing: {}", e);
            }
        }

        Ok(decode_listing(&listing))
    }

    /// Wait for the child within the configured timeout. On expiry the
    /// child is killed and reaped before the error is returned, so no
    /// zombie survives a slow shell.
    fn wait_bounded(&self, child: &mut Child) -> Result<ExitStatus, SourceError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            let polled = child.try_wait().map_err(|source| SourceError::Wait {
                program: self.program.clone(),
                source,
            })?;
            match polled {
                Some(status) => return Ok(status),
                None => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(SourceError::Timeout {
                            program: self.program.clone(),
                            timeout: self.timeout,
                        });
                    }
                    thread::sleep(Duration::from_millis(10));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::AliasEntry;

    fn source(args: &[&str]) -> AliasSource {
        AliasSource::with_command("/bin/sh", args, Duration::from_secs(5))
    }

    #[test]
    fn fetch_decodes_the_listing() {
        let source = source(&["-c", "echo \"alias ll='ls -la'\"; echo \"alias gs=git status\""]);
        let snapshot = source.fetch().unwrap();
        assert_eq!(
            snapshot.entries(),
            &[
                AliasEntry {
                    name: "ll".to_string(),
                    expansion: "'ls -la'".to_string(),
                },
                AliasEntry {
                    name: "gs".to_string(),
                    expansion: "git status".to_string(),
                },
            ]
        );
    }

    #[test]
    fn spawn_failure_is_source_unavailable() {
        let source = AliasSource::new("/nonexistent/shell", Duration::from_secs(5));
        match source.fetch() {
            Err(SourceError::Spawn { .. }) => (),
            other => panic!("expected spawn error, got {:?}", other),
        }
    }

    #[test]
    fn non_zero_exit_is_source_unavailable() {
        match source(&["-c", "exit 3"]).fetch() {
            Err(SourceError::Exit { .. }) => (),
            other => panic!("expected exit error, got {:?}", other),
        }
    }

    #[test]
    fn slow_shell_is_killed_and_reported_as_timeout() {
        let source =
            AliasSource::with_command("/bin/sh", &["-c", "sleep 30"], Duration::from_millis(100));
        match source.fetch() {
            Err(SourceError::Timeout { .. }) => (),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[test]
    fn invalid_utf8_is_a_decode_failure() {
        match source(&["-c", "printf 'alias a=\\377\\n'"]).fetch() {
            Err(SourceError::Decode(_)) => (),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn dump_sink_receives_the_raw_listing() {
        let source = source(&["-c", "echo \"alias ll='ls -la'\""]);
        let mut raw = Vec::new();
        let snapshot = source.fetch_with_dump(Some(&mut raw)).unwrap();
        assert_eq!(raw, b"alias ll='ls -la'\n");
        assert_eq!(snapshot.len(), 1);
    }
}

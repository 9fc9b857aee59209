use crate::utils::expand_path;

use std::time::Duration;

use console::style;
use serde::Deserialize;

const CONFIG_PATH: &str = "~/.alf.yaml";

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    /// Interactive shell used both to list aliases and to run them.
    #[serde(default = "default_shell")]
    pub shell: String,
    /// Terminal emulator command the picked alias is handed to.
    #[serde(default = "default_terminal")]
    pub terminal: String,
    /// Bound, in seconds, on how long the alias listing may take.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default)]
    pub debug: bool,
    /// Where to dump the raw alias listing for inspection. No dump when
    /// unset.
    #[serde(default)]
    pub dump_file: Option<String>,
}

impl ConfigFile {
    pub fn new() -> ConfigFile {
        match std::fs::File::open(expand_path(CONFIG_PATH)) {
            Ok(f) => match serde_yaml::from_reader::<_, ConfigFile>(f) {
                Ok(c) => {
                    wdebug!(c, "Config file: {:#?}", c);
                    c
                }
                Err(e) => {
                    werror!("Invalid configuration file '{}': {}", CONFIG_PATH, e);
                    ConfigFile::built_in()
                }
            },
            // Running without a configuration file is the common case
            Err(_) => ConfigFile::built_in(),
        }
    }

    fn built_in() -> ConfigFile {
        ConfigFile {
            shell: default_shell(),
            terminal: default_terminal(),
            timeout: default_timeout(),
            prompt: default_prompt(),
            debug: false,
            dump_file: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

fn default_shell() -> String {
    "/bin/bash".to_string()
}

fn default_terminal() -> String {
    "x-terminal-emulator -e".to_string()
}

fn default_timeout() -> u64 {
    5
}

fn default_prompt() -> String {
    "alias>".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_configuration_is_parsed() {
        let yaml = "shell: /usr/bin/zsh\n\
                    terminal: xterm -e\n\
                    timeout: 2\n\
                    prompt: '?'\n\
                    debug: true\n\
                    dump_file: /tmp/aliases.txt\n";
        let config: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.shell, "/usr/bin/zsh");
        assert_eq!(config.terminal, "xterm -e");
        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert_eq!(config.prompt, "?");
        assert!(config.debug);
        assert_eq!(config.dump_file.as_deref(), Some("/tmp/aliases.txt"));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: ConfigFile = serde_yaml::from_str("timeout: 1\n").unwrap();
        assert_eq!(config.shell, "/bin/bash");
        assert_eq!(config.terminal, "x-terminal-emulator -e");
        assert_eq!(config.timeout(), Duration::from_secs(1));
        assert_eq!(config.prompt, "alias>");
        assert!(!config.debug);
        assert!(config.dump_file.is_none());
    }

    #[test]
    fn built_in_config_matches_defaults() {
        let config = ConfigFile::built_in();
        assert_eq!(config.shell, "/bin/bash");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}

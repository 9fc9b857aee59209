use std::env;

/// Expand `~` and a leading `$VAR` in a configured path.
pub fn expand_path(value: &str) -> String {
    if let Some(key) = value.strip_prefix('$') {
        return match env::var(key) {
            Ok(x) => x,
            Err(_) => "".into(),
        };
    }

    if value.contains('~') && env::var("HOME").is_ok() {
        return value.replace('~', &env::var("HOME").unwrap());
    }

    value.into()
}

pub fn history_path() -> String {
    let homedir = match env::var("HOME") {
        Ok(val) => val,
        // Use /tmp as default directory if no $HOME directory has been found
        // This way, the user can still use this feature, even if the history
        // content won't survive reboots
        Err(_) => "/tmp".into(),
    };
    homedir + "/.alf_history"
}

/// Fixed UI text and key bindings

pub const APP_TITLE: &str = "System Monitor";
pub const LOGIN_SUBTITLE: &str = "Sign in to access your dashboard";
pub const REMEMBER_ME_LABEL: &str = "Remember me for 30 days";
pub const SIGNING_IN_LABEL: &str = "Signing in...";
pub const SIGN_IN_LABEL: &str = "Sign In";
pub const USERNAME_PLACEHOLDER: &str = "admin@system.com";
pub const PASSWORD_PLACEHOLDER: &str = "Enter your password";
pub const SEARCH_PLACEHOLDER: &str = "Search by process name or PID...";

/// (key, description) pairs for the help overlay
pub const DASHBOARD_KEYS: &[(&str, &str)] = &[
    ("/", "Search processes by name or PID"),
    ("s", "Cycle status filter"),
    ("t", "Cycle threshold filter"),
    ("c", "Clear search and filters"),
    ("↑ ↓", "Select process"),
    ("r", "Refresh metrics now"),
    ("l", "Log out"),
    ("?", "Toggle this help"),
    ("q / Esc", "Quit"),
];

pub const LOGIN_KEYS: &[(&str, &str)] = &[
    ("Tab", "Next field"),
    ("Space", "Toggle remember me (on checkbox)"),
    ("F2", "Show / hide password"),
    ("Enter", "Sign in"),
    ("Esc", "Quit"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_tables_have_no_duplicates() {
        for table in [DASHBOARD_KEYS, LOGIN_KEYS] {
            let mut keys: Vec<&str> = table.iter().map(|(k, _)| *k).collect();
            keys.sort();
            keys.dedup();
            assert_eq!(keys.len(), table.len());
        }
    }
}

//! Executable lookup for cargo and forge.

use crate::FORGE_BIN;

const CARGO_PATH_ENV: &str = "FORGE_CARGO_PATH";
const FORGE_PATH_ENV: &str = "FORGE_BIN_PATH";

/// `$FORGE_CARGO_PATH` if set and non-blank, otherwise `cargo` from PATH.
pub fn resolve_cargo_executable() -> String {
    resolve_with(CARGO_PATH_ENV, "cargo", |name| std::env::var(name).ok())
}

/// `$FORGE_BIN_PATH` if set and non-blank, otherwise `forge` from PATH.
pub fn resolve_forge_executable() -> String {
    resolve_with(FORGE_PATH_ENV, FORGE_BIN, |name| std::env::var(name).ok())
}

fn resolve_with<F>(name: &str, fallback: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(var: &'static str, value: &'static str) -> impl Fn(&str) -> Option<String> {
        move |name| (name == var).then(|| value.to_string())
    }

    #[test]
    fn picks_forge_path_when_set() {
        let resolved = resolve_with(
            FORGE_PATH_ENV,
            FORGE_BIN,
            only(FORGE_PATH_ENV, " /opt/foundry/bin/forge "),
        );
        assert_eq!(resolved, "/opt/foundry/bin/forge");
    }

    #[test]
    fn blank_cargo_override_falls_back() {
        let resolved = resolve_with(CARGO_PATH_ENV, "cargo", only(CARGO_PATH_ENV, "   "));
        assert_eq!(resolved, "cargo");
    }

    #[test]
    fn unset_variable_falls_back() {
        let resolved = resolve_with(FORGE_PATH_ENV, FORGE_BIN, |_| None);
        assert_eq!(resolved, "forge");
    }

    #[test]
    fn other_variables_are_ignored() {
        let resolved = resolve_with(CARGO_PATH_ENV, "cargo", only(FORGE_PATH_ENV, "/usr/bin/forge"));
        assert_eq!(resolved, "cargo");
    }
}

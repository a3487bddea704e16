use crate::error::{InstallError, Result};

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

// Capture:
// 1) namespace: up to the only hyphen
// 2) folder: the rest
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_.]+)-([A-Za-z0-9_.]+)$").expect("application token pattern")
});

/// One deployable application: a folder in the apps repository, deployed into
/// a namespace. Its pipeline task is named after the original token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSpec {
    pub namespace: String,
    pub folder: String,
}

impl ApplicationSpec {
    /// Pipeline task name, `{namespace}-{folder}`.
    pub fn node_name(&self) -> String {
        format!("{}-{}", self.namespace, self.folder)
    }
}

impl fmt::Display for ApplicationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.namespace, self.folder)
    }
}

/// Parse operator tokens in order.
///
/// A token splits on its hyphen into exactly two non-empty parts; neither
/// part may itself contain a hyphen, since the split could not tell where the
/// namespace ends. Both parts are restricted to letters, digits, `_` and `.`
/// so the task name stays a plain YAML scalar inside `runAfter: [...]`.
pub fn parse_application_list(tokens: &[String]) -> Result<Vec<ApplicationSpec>> {
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        let parts: Vec<&str> = token.split('-').collect();
        if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
            return Err(InstallError::validation(format!(
                "application {:?} must be <namespace>-<folder> with exactly one hyphen and both parts non-empty",
                token
            )));
        }

        let caps = TOKEN_RE.captures(token).ok_or_else(|| {
            InstallError::validation(format!(
                "application {:?}: namespace and folder may only contain letters, digits, '_' and '.'",
                token
            ))
        })?;

        out.push(ApplicationSpec {
            namespace: caps[1].to_string(),
            folder: caps[2].to_string(),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn splits_on_the_hyphen_and_keeps_order() {
        let apps = parse_application_list(&tokens(&["nsB-folder2", "nsA-folder1"])).unwrap();
        assert_eq!(
            apps,
            vec![
                ApplicationSpec {
                    namespace: "nsB".to_string(),
                    folder: "folder2".to_string(),
                },
                ApplicationSpec {
                    namespace: "nsA".to_string(),
                    folder: "folder1".to_string(),
                },
            ]
        );
        assert_eq!(apps[0].node_name(), "nsB-folder2");
    }

    #[test]
    fn rejects_wrong_arity() {
        for bad in ["nofolder", "a-b-c", "-folder", "ns-", "-", ""] {
            let err = parse_application_list(&tokens(&[bad])).unwrap_err();
            assert!(matches!(err, InstallError::Validation { .. }), "{bad}");
        }
    }

    #[test]
    fn rejects_characters_that_break_the_run_after_list() {
        for bad in ["ns 1-app", "ns,x-app", "ns-[app]", "ns-app: x"] {
            let err = parse_application_list(&tokens(&[bad])).unwrap_err();
            assert!(matches!(err, InstallError::Validation { .. }), "{bad}");
        }
    }

    #[test]
    fn token_pattern_compiles_once() {
        let first: *const Regex = &*TOKEN_RE;
        let second: *const Regex = &*TOKEN_RE;
        assert_eq!(first, second);
        assert!(TOKEN_RE.is_match("ns.1-app_2"));
    }

    #[test]
    fn empty_list_is_fine() {
        assert!(parse_application_list(&[]).unwrap().is_empty());
    }
}

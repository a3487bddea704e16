use crate::error::{InstallError, Result};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Base64 (standard alphabet, padded) as Kubernetes secret `data` expects.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}

/// Read a file, normalise CRLF line endings to LF, and base64 encode it.
pub fn file_to_base64(path: &Path) -> Result<String> {
    let data = fs::read(path)
        .map_err(|e| InstallError::validation(format!("read {}: {}", path.display(), e)))?;
    Ok(encode(normalize_line_endings(&data)))
}

fn normalize_line_endings(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut i = 0;
    while i < data.len() {
        if data[i] == b'\r' && data.get(i + 1) == Some(&b'\n') {
            i += 1;
            continue;
        }
        out.push(data[i]);
        i += 1;
    }
    out
}

/// Container registry login for a docker-config secret.
#[derive(Debug, Clone)]
pub struct DockerCredentials {
    pub server: String,
    pub username: String,
    pub password: String,
}

impl DockerCredentials {
    /// Both username and password must be non-empty.
    pub fn new(server: &str, username: &str, password: &str) -> Result<Self> {
        if username.is_empty() || password.is_empty() {
            return Err(InstallError::validation(
                "both --docker-username and --docker-password must be set and not empty",
            ));
        }
        Ok(Self {
            server: server.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// `base64("<username>:<password>")`.
    pub fn auth(&self) -> String {
        encode(format!("{}:{}", self.username, self.password))
    }

    /// `.dockerconfigjson` payload:
    /// `{"auths":{"<server>":{"auth":..,"password":..,"username":..}}}`.
    pub fn config_json(&self) -> String {
        let entry = serde_json::json!({
            "username": self.username,
            "password": self.password,
            "auth": self.auth(),
        });
        let mut auths = serde_json::Map::new();
        auths.insert(self.server.clone(), entry);
        serde_json::json!({ "auths": auths }).to_string()
    }

    pub fn config_json_base64(&self) -> String {
        encode(self.config_json())
    }
}

/// Parse repeated `key=value` overrides. Later keys win.
pub fn parse_overrides(overrides: &[String]) -> Result<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    for item in overrides {
        let parts: Vec<&str> = item.split('=').collect();
        if parts.len() != 2 || parts[0].is_empty() {
            return Err(InstallError::validation(format!(
                "incorrect format for custom flag `{}`, expected key=value",
                item
            )));
        }
        out.insert(parts[0].to_string(), parts[1].to_string());
    }
    Ok(out)
}

/// Wrap in double quotes unless already quoted.
pub fn ensure_quoted(value: &str) -> String {
    if value.starts_with('"') {
        value.to_string()
    } else {
        format!("\"{}\"", value)
    }
}

/// Remove one pair of surrounding double quotes, if present.
pub fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use pretty_assertions::assert_eq;

    fn decode(s: &str) -> String {
        String::from_utf8(STANDARD.decode(s).unwrap()).unwrap()
    }

    #[test]
    fn docker_config_embeds_basic_auth() {
        let creds = DockerCredentials::new("index.docker.io", "u", "p").unwrap();
        assert_eq!(creds.auth(), encode("u:p"));

        let json: serde_json::Value =
            serde_json::from_str(&decode(&creds.config_json_base64())).unwrap();
        let entry = &json["auths"]["index.docker.io"];
        assert_eq!(entry["auth"], serde_json::Value::String(encode("u:p")));
        assert_eq!(entry["username"], "u");
        assert_eq!(entry["password"], "p");
    }

    #[test]
    fn credentials_with_quotes_stay_valid_json() {
        let creds = DockerCredentials::new("r.example", "u\"x", "p\\q").unwrap();
        let json: serde_json::Value = serde_json::from_str(&creds.config_json()).unwrap();
        assert_eq!(json["auths"]["r.example"]["username"], "u\"x");
    }

    #[test]
    fn empty_credentials_are_rejected() {
        for (u, p) in [("", "p"), ("u", ""), ("", "")] {
            let err = DockerCredentials::new("s", u, p).unwrap_err();
            assert!(matches!(err, InstallError::Validation { .. }));
        }
    }

    #[test]
    fn file_to_base64_normalises_crlf() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("key");
        fs::write(&path, b"line1\r\nline2\r\n\rx").unwrap();
        assert_eq!(decode(&file_to_base64(&path).unwrap()), "line1\nline2\n\rx");
    }

    #[test]
    fn unreadable_file_is_a_validation_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = file_to_base64(&tmp.path().join("missing")).unwrap_err();
        assert!(matches!(err, InstallError::Validation { .. }));
    }

    #[test]
    fn overrides_need_key_and_value() {
        let ok = parse_overrides(&["a=1".to_string(), "b=2".to_string(), "a=3".to_string()]).unwrap();
        assert_eq!(ok.get("a").map(String::as_str), Some("3"));
        assert_eq!(ok.len(), 2);

        for bad in ["novalue", "a=b=c", "=x"] {
            assert!(parse_overrides(&[bad.to_string()]).is_err(), "{bad}");
        }
    }

    #[test]
    fn quoting_helpers() {
        assert_eq!(ensure_quoted("{{.Name}}.{{.Domain}}"), "\"{{.Name}}.{{.Domain}}\"");
        assert_eq!(ensure_quoted("\"x\""), "\"x\"");
        assert_eq!(strip_quotes("\"1.2.3.4\""), "1.2.3.4");
        assert_eq!(strip_quotes("localhost"), "localhost");
    }
}

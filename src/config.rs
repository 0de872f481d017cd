use std::path::PathBuf;

use tracing::debug;

use crate::error::{Error, Result};
use crate::util::strip_quotes;

pub(crate) const ENV_KEY: &str = "EBIRD_API_KEY";
pub(crate) const ENV_URL: &str = "EBIRD_API_URL";
pub(crate) const ENV_RC: &str = "EBIRD_RC";
const RC_NAME: &str = ".ebirdrc";

/// Settings gathered by [`Client::from_env`](crate::Client::from_env).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// eBird API token.
    pub key: String,
    /// Base API URL; `None` keeps the default.
    pub url: Option<String>,
    /// Value for the `Accept-Language` header.
    pub locale: Option<String>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("key", &"<redacted>")
            .field("url", &self.url)
            .field("locale", &self.locale)
            .finish()
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct RcConfig {
    key: Option<String>,
    url: Option<String>,
    locale: Option<String>,
}

pub(crate) fn load_config(key: Option<String>, url: Option<String>) -> Result<ClientConfig> {
    load_config_with(key, url, |name| std::env::var(name).ok(), &rc_candidates())
}

fn load_config_with(
    key: Option<String>,
    url: Option<String>,
    env: impl Fn(&str) -> Option<String>,
    rc_candidates: &[PathBuf],
) -> Result<ClientConfig> {
    let mut key = key.or_else(|| env(ENV_KEY)).filter(|k| !k.trim().is_empty());
    let mut url = url.or_else(|| env(ENV_URL)).filter(|u| !u.trim().is_empty());
    let mut locale = None;

    for rc_path in rc_candidates {
        if !rc_path.exists() {
            continue;
        }
        let text = std::fs::read_to_string(rc_path).map_err(|e| {
            Error::Config(format!(
                "failed to read configuration file {}: {e}",
                rc_path.display()
            ))
        })?;
        debug!(path = %rc_path.display(), "loaded eBird rc file");
        let rc = parse_rc(&text);
        key = key.or(rc.key);
        url = url.or(rc.url);
        locale = rc.locale;
        break;
    }

    let Some(key) = key else {
        let searched = rc_candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>();
        return Err(if searched.is_empty() {
            Error::Config(format!(
                "missing API key (set {ENV_KEY} or create {RC_NAME})"
            ))
        } else {
            Error::Config(format!(
                "missing API key (set {ENV_KEY} or put `key:` in one of: {})",
                searched.join(", ")
            ))
        });
    };

    Ok(ClientConfig { key, url, locale })
}

fn parse_rc(text: &str) -> RcConfig {
    let mut cfg = RcConfig::default();

    // `key:` may be alone on its line with the token on the next one.
    let mut pending: Option<&str> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(name) = pending.take() {
            if !line.contains(':') {
                set_field(&mut cfg, name, strip_quotes(line));
                continue;
            }
        }

        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = strip_quotes(value.trim());
        if value.is_empty() {
            pending = Some(match name {
                "key" => "key",
                "url" => "url",
                "locale" => "locale",
                _ => continue,
            });
        } else {
            set_field(&mut cfg, name, value);
        }
    }

    cfg
}

fn set_field(cfg: &mut RcConfig, name: &str, value: &str) {
    let value = Some(value.to_string());
    match name {
        "key" => cfg.key = value,
        "url" => cfg.url = value,
        "locale" => cfg.locale = value,
        _ => {}
    }
}

fn rc_candidates() -> Vec<PathBuf> {
    // 1) $EBIRD_RC  2) ./.ebirdrc  3) ~/.ebirdrc
    if let Ok(p) = std::env::var(ENV_RC) {
        return vec![PathBuf::from(p)];
    }

    let mut v = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        v.push(cwd.join(RC_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        v.push(home.join(RC_NAME));
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn rc_parses_inline_and_next_line_values() {
        let rc = parse_rc(
            "# eBird settings\n\
             url: 'https://example.test/v2/'\n\
             key:\n\
             \"abc123\"\n\
             locale: es\n\
             verify: 0\n",
        );
        assert_eq!(
            rc,
            RcConfig {
                key: Some("abc123".into()),
                url: Some("https://example.test/v2/".into()),
                locale: Some("es".into()),
            }
        );
    }

    #[test]
    fn url_with_colons_keeps_everything_after_first_colon() {
        let rc = parse_rc("url: http://localhost:8080/v2/");
        assert_eq!(rc.url.as_deref(), Some("http://localhost:8080/v2/"));
    }

    #[test]
    fn explicit_key_beats_environment() {
        let cfg = load_config_with(
            Some("explicit".into()),
            None,
            |name| (name == ENV_KEY).then(|| "from-env".to_string()),
            &[],
        )
        .unwrap();
        assert_eq!(cfg.key, "explicit");
        assert_eq!(cfg.url, None);
    }

    #[test]
    fn environment_fills_missing_values() {
        let cfg = load_config_with(
            None,
            None,
            |name| match name {
                ENV_KEY => Some("k1".to_string()),
                ENV_URL => Some("http://localhost:1/".to_string()),
                _ => None,
            },
            &[],
        )
        .unwrap();
        assert_eq!(cfg.key, "k1");
        assert_eq!(cfg.url.as_deref(), Some("http://localhost:1/"));
    }

    #[test]
    fn rc_file_is_last_resort() {
        let dir = std::env::temp_dir().join(format!("ebird-rc-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let rc_path = dir.join(RC_NAME);
        std::fs::write(&rc_path, "key: from-file\nlocale: fr\n").unwrap();

        let missing = dir.join("nope").join(RC_NAME);
        let cfg = load_config_with(None, None, no_env, &[missing, rc_path.clone()]).unwrap();
        assert_eq!(cfg.key, "from-file");
        assert_eq!(cfg.locale.as_deref(), Some("fr"));

        std::fs::remove_file(&rc_path).ok();
    }

    #[test]
    fn missing_key_lists_searched_files() {
        let err = load_config_with(
            None,
            None,
            no_env,
            &[PathBuf::from("/nonexistent/.ebirdrc")],
        )
        .unwrap_err();
        match err {
            Error::Config(msg) => {
                assert!(msg.contains(ENV_KEY));
                assert!(msg.contains("/nonexistent/.ebirdrc"));
            }
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn blank_environment_key_counts_as_missing() {
        let err = load_config_with(None, None, |_| Some("  ".to_string()), &[]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let cfg = ClientConfig {
            key: "secret".into(),
            ..Default::default()
        };
        assert!(!format!("{cfg:?}").contains("secret"));
    }
}

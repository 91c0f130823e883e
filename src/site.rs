//! Site metadata resolution
//!
//! Maps site identifiers to repository remote URLs. The mapping lives in a
//! JSON file (`$CLU_SITES_FILE`, default `<config dir>/clu/sites.json`)
//! shaped as `{"example-site": "https://github.com/acme/example.git"}`.
//! Arguments that already look like Git remote URLs bypass the lookup.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Whether `target` is already a Git remote URL rather than a site name.
pub fn looks_like_remote_url(target: &str) -> bool {
    target.contains("://") || target.starts_with("git@")
}

/// Resolve a site name or explicit URL to a repository remote URL.
pub fn resolve_repository_url(target: &str) -> Result<String> {
    if looks_like_remote_url(target) {
        return Ok(target.to_string());
    }

    let path = sites_file_path()?;
    let data = fs::read_to_string(&path).map_err(|e| {
        Error::UnknownSite(format!("{target} (cannot read {}: {e})", path.display()))
    })?;
    lookup(&data, target)
}

fn lookup(sites_json: &str, site: &str) -> Result<String> {
    let sites: HashMap<String, String> = serde_json::from_str(sites_json)
        .map_err(|e| Error::Config(format!("malformed sites file: {e}")))?;
    sites
        .get(site)
        .cloned()
        .ok_or_else(|| Error::UnknownSite(site.to_string()))
}

fn sites_file_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("CLU_SITES_FILE") {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join("clu").join("sites.json"))
        .ok_or_else(|| Error::Config("no config directory available".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_bypass_the_lookup() {
        assert!(looks_like_remote_url("https://github.com/acme/web.git"));
        assert!(looks_like_remote_url("git@gitlab.com:acme/web.git"));
        assert!(!looks_like_remote_url("example-site"));
    }

    #[test]
    fn test_lookup_known_site() {
        let json = r#"{"example-site": "https://github.com/acme/example.git"}"#;
        assert_eq!(
            lookup(json, "example-site").unwrap(),
            "https://github.com/acme/example.git"
        );
    }

    #[test]
    fn test_lookup_unknown_site() {
        assert!(matches!(
            lookup("{}", "missing"),
            Err(Error::UnknownSite(site)) if site == "missing"
        ));
    }

    #[test]
    fn test_malformed_sites_file() {
        assert!(matches!(lookup("not json", "x"), Err(Error::Config(_))));
    }
}

//! Provider detection from remote URLs

use crate::error::{Error, Result};
use crate::types::{Provider, RepoRef};
use regex::Regex;
use std::env;
use std::sync::OnceLock;

/// GitLab instance hostname to match against. Configurable via
/// `GITLAB_HOST` to support self-hosted instances.
fn gitlab_host() -> String {
    env::var("GITLAB_HOST").unwrap_or_else(|_| "gitlab.com".to_string())
}

/// Decide which provider owns a remote URL.
///
/// Hostnames are matched as substrings in fixed priority order: Bitbucket
/// first, then the configured GitLab host, then GitHub. `None` means no
/// provider can be inferred and the caller must treat that as fatal.
pub fn detect_provider(url: &str) -> Option<Provider> {
    detect_for_gitlab_host(url, &gitlab_host())
}

fn detect_for_gitlab_host(url: &str, gitlab: &str) -> Option<Provider> {
    let hostname = extract_hostname(url)?;

    if hostname.contains("bitbucket") {
        return Some(Provider::Bitbucket);
    }
    if hostname.contains(gitlab) {
        return Some(Provider::GitLab);
    }
    if hostname.contains("github") {
        return Some(Provider::GitHub);
    }
    None
}

/// Parse a remote URL into a [`RepoRef`].
///
/// Accepts `https://host/owner/repo.git` and `git@host:owner/repo.git`
/// forms. GitLab nested groups keep the full group path as owner.
pub fn parse_repo_ref(url: &str) -> Result<RepoRef> {
    let gitlab = gitlab_host();
    let provider =
        detect_for_gitlab_host(url, &gitlab).ok_or_else(|| Error::NoProviderForUrl(url.to_string()))?;
    let hostname = extract_hostname(url);

    let path = repo_path_pattern()
        .captures(url)
        .and_then(|c| c.name("ssh").or_else(|| c.name("https")))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::Parse(format!("cannot parse remote URL: {url}")))?;

    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    if parts.len() < 2 {
        return Err(Error::Parse(format!("invalid repository path: {path}")));
    }

    let project = (*parts.last().expect("parts checked non-empty")).to_string();
    let owner = parts[..parts.len() - 1].join("/");

    // Keep the hostname only when it differs from the provider's SaaS host.
    let default_host = match provider {
        Provider::GitHub => "github.com",
        Provider::GitLab => gitlab.as_str(),
        Provider::Bitbucket => "bitbucket.org",
    };
    let host = hostname.filter(|h| h != default_host);

    Ok(RepoRef {
        provider,
        host,
        owner,
        project,
    })
}

fn repo_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // SSH: git@host:owner/repo.git  HTTPS: https://host/owner/repo.git
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:git@[^:]+:(?P<ssh>.+?)|https?://[^/]+/(?P<https>.+?))(?:\.git)?/?$")
            .expect("hardcoded pattern is valid")
    })
}

fn extract_hostname(url: &str) -> Option<String> {
    // SSH format
    if let Some(rest) = url.strip_prefix("git@") {
        return rest.split(':').next().map(ToString::to_string);
    }

    // HTTPS format
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(ToString::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_github_https() {
        assert_eq!(
            detect_provider("https://github.com/acme/web.git"),
            Some(Provider::GitHub)
        );
    }

    #[test]
    fn test_detect_github_ssh() {
        assert_eq!(
            detect_provider("git@github.com:acme/web.git"),
            Some(Provider::GitHub)
        );
    }

    #[test]
    fn test_detect_gitlab_https() {
        assert_eq!(
            detect_provider("https://gitlab.com/acme/web.git"),
            Some(Provider::GitLab)
        );
    }

    #[test]
    fn test_detect_bitbucket_https() {
        assert_eq!(
            detect_provider("https://bitbucket.org/acme/web.git"),
            Some(Provider::Bitbucket)
        );
    }

    #[test]
    fn test_detect_unknown_host() {
        assert_eq!(detect_provider("https://sourcehut.example/acme/web.git"), None);
    }

    #[test]
    fn test_detect_self_hosted_gitlab() {
        assert_eq!(
            detect_for_gitlab_host("https://git.example.com/acme/web.git", "git.example.com"),
            Some(Provider::GitLab)
        );
    }

    #[test]
    fn test_bitbucket_wins_over_gitlab_host() {
        // Fixed priority order: bitbucket is checked first.
        assert_eq!(
            detect_for_gitlab_host("https://bitbucket.example.com/acme/web.git", "example.com"),
            Some(Provider::Bitbucket)
        );
    }

    #[test]
    fn test_parse_github_repo() {
        let repo = parse_repo_ref("https://github.com/acme/web.git").unwrap();
        assert_eq!(repo.provider, Provider::GitHub);
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.project, "web");
        assert!(repo.host.is_none());
    }

    #[test]
    fn test_parse_ssh_repo() {
        let repo = parse_repo_ref("git@github.com:acme/web.git").unwrap();
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.project, "web");
    }

    #[test]
    fn test_parse_gitlab_nested_groups() {
        let repo = parse_repo_ref("https://gitlab.com/group/subgroup/web.git").unwrap();
        assert_eq!(repo.provider, Provider::GitLab);
        assert_eq!(repo.owner, "group/subgroup");
        assert_eq!(repo.project, "web");
    }

    #[test]
    fn test_parse_without_git_suffix() {
        let repo = parse_repo_ref("https://bitbucket.org/acme/web").unwrap();
        assert_eq!(repo.provider, Provider::Bitbucket);
        assert_eq!(repo.project, "web");
    }

    #[test]
    fn test_parse_unknown_host_is_fatal() {
        assert!(matches!(
            parse_repo_ref("https://example.net/acme/web.git"),
            Err(Error::NoProviderForUrl(_))
        ));
    }
}

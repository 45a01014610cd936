//! Remote operations

use tracing::{debug, instrument};

use gantry_core::error::GitError;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Get the URL for a remote
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(|s| s.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Get the HTTPS URL of a remote, normalizing ssh-style remotes.
    ///
    /// Returns `None` when the remote is missing or its URL cannot be
    /// expressed over HTTPS; links are then simply omitted downstream.
    #[instrument(skip(self), fields(name))]
    pub fn https_remote_url(&self, name: &str) -> Option<String> {
        let url = self.remote_url(name).ok().flatten()?;
        let https = normalize_remote_url(&url);
        debug!(raw = %url, https = ?https, "normalized remote url");
        https
    }
}

/// Normalize a git remote URL to its HTTPS form without the `.git`
/// suffix: `git@host:owner/repo.git` and `https://host/owner/repo.git`
/// both become `https://host/owner/repo`.
fn normalize_remote_url(url: &str) -> Option<String> {
    let url = url.strip_suffix(".git").unwrap_or(url);

    if let Some(rest) = url.strip_prefix("https://") {
        return Some(format!("https://{rest}"));
    }
    if let Some(rest) = url.strip_prefix("http://") {
        return Some(format!("https://{rest}"));
    }
    if let Some(rest) = url.strip_prefix("ssh://git@") {
        return Some(format!("https://{rest}"));
    }
    if let Some(rest) = url.strip_prefix("git@") {
        let (host, path) = rest.split_once(':')?;
        return Some(format!("https://{host}/{path}"));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Repository;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_ssh_remote() {
        assert_eq!(
            normalize_remote_url("git@github.com:example/gantry.git"),
            Some("https://github.com/example/gantry".to_string())
        );
    }

    #[test]
    fn test_normalize_https_remote() {
        assert_eq!(
            normalize_remote_url("https://github.com/example/gantry.git"),
            Some("https://github.com/example/gantry".to_string())
        );
    }

    #[test]
    fn test_normalize_ssh_protocol_remote() {
        assert_eq!(
            normalize_remote_url("ssh://git@github.com/example/gantry"),
            Some("https://github.com/example/gantry".to_string())
        );
    }

    #[test]
    fn test_local_path_remote_has_no_https_form() {
        assert_eq!(normalize_remote_url("/srv/repos/gantry.git"), None);
    }

    #[test]
    fn test_https_remote_url_from_repo() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        repo.remote("origin", "git@github.com:example/gantry.git")
            .unwrap();

        let git_repo = GitRepo::open(temp.path()).unwrap();
        assert_eq!(
            git_repo.https_remote_url("origin"),
            Some("https://github.com/example/gantry".to_string())
        );
        assert_eq!(git_repo.https_remote_url("upstream"), None);
    }
}

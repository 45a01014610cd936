//! Commit history operations

use git2::Sort;
use tracing::{debug, instrument};

use gantry_commits::RawCommit;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Get the raw commits since a tag, oldest first, or the whole
    /// history when no tag is given.
    ///
    /// The full message text is carried as-is; segmentation into
    /// header, body, and footer is the parser's job.
    #[instrument(skip(self), fields(since))]
    pub fn raw_commits_since(&self, since: Option<&str>) -> Result<Vec<RawCommit>> {
        let head = self.head_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE)?;
        revwalk.push(head.id())?;

        if let Some(tag_name) = since {
            let tag_ref = format!("refs/tags/{tag_name}");
            let reference = self.repo.find_reference(&tag_ref)?;
            let target = reference.peel_to_commit()?;
            revwalk.hide(target.id())?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            let text = commit.message().unwrap_or_default().to_string();
            commits.push(RawCommit::new(oid.to_string(), text));
        }

        debug!(count = commits.len(), "enumerated raw commits");
        Ok(commits)
    }
}

//! Tag operations

use semver::Version;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;

impl GitRepo {
    /// Get all release tags matching `<prefix><semver>`, ordered by
    /// version ascending. Tags that do not parse as a semantic version
    /// behind the prefix are ignored.
    #[instrument(skip(self), fields(prefix))]
    pub fn release_tags(&self, prefix: &str) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            let Some(rest) = name.strip_prefix(prefix) else {
                return true;
            };
            let Ok(version) = Version::parse(rest) else {
                return true;
            };

            // Resolve annotated tags to the commit they point at.
            let target = if let Ok(tag) = self.repo.find_tag(oid) {
                tag.target_id().to_string()
            } else {
                oid.to_string()
            };

            tags.push(TagInfo::new(&name, target, version));
            true
        })?;

        tags.sort_by(|a, b| a.version.cmp(&b.version));
        debug!(count = tags.len(), "listed release tags");
        Ok(tags)
    }

    /// Find the most recent release tag by semantic version
    pub fn find_latest_tag(&self, prefix: &str) -> Result<Option<TagInfo>> {
        let tags = self.release_tags(prefix)?;
        let latest = tags.into_iter().next_back();
        debug!(latest = ?latest.as_ref().map(|t| &t.name), "found latest tag");
        Ok(latest)
    }

    /// Find the earliest release tag by semantic version
    pub fn find_earliest_tag(&self, prefix: &str) -> Result<Option<TagInfo>> {
        let tags = self.release_tags(prefix)?;
        Ok(tags.into_iter().next())
    }
}

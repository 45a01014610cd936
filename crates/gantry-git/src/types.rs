//! Git types

/// Information about a release tag
#[derive(Debug, Clone)]
pub struct TagInfo {
    /// Tag name, prefix included (e.g. `v1.2.3`)
    pub name: String,
    /// Commit hash the tag points to
    pub target: String,
    /// Parsed semantic version behind the prefix
    pub version: semver::Version,
}

impl TagInfo {
    /// Create a new TagInfo
    pub fn new(name: impl Into<String>, target: impl Into<String>, version: semver::Version) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_info() {
        let tag = TagInfo::new("v1.2.3", "abc", semver::Version::new(1, 2, 3));
        assert_eq!(tag.name, "v1.2.3");
        assert_eq!(tag.version.minor, 2);
    }
}

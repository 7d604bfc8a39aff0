//! `owner/name` repository references.

use std::fmt;
use std::str::FromStr;

/// A GitHub repository reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositorySlug {
    /// The owning user or organization login.
    pub owner: String,
    /// The repository name.
    pub name: String,
}

impl RepositorySlug {
    /// Create a slug from its parts.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositorySlug {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_end_matches('/');
        let s = s
            .strip_prefix("https://github.com/")
            .unwrap_or(s)
            .trim_end_matches(".git");

        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if valid_part(owner) && valid_part(name) => {
                Ok(Self::new(owner, name))
            }
            _ => Err(format!("'{}' is not an owner/name repository", s)),
        }
    }
}

fn valid_part(part: &str) -> bool {
    !part.is_empty() && !part.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slug() {
        let slug: RepositorySlug = "rust-lang/rust".parse().unwrap();
        assert_eq!(slug.owner, "rust-lang");
        assert_eq!(slug.name, "rust");
        assert_eq!(slug.to_string(), "rust-lang/rust");
    }

    #[test]
    fn test_parse_github_url() {
        let slug: RepositorySlug = "https://github.com/octo/hello.git".parse().unwrap();
        assert_eq!(slug, RepositorySlug::new("octo", "hello"));
    }

    #[test]
    fn test_reject_malformed() {
        assert!("".parse::<RepositorySlug>().is_err());
        assert!("owner".parse::<RepositorySlug>().is_err());
        assert!("a/b/c".parse::<RepositorySlug>().is_err());
        assert!("/repo".parse::<RepositorySlug>().is_err());
        assert!("my org/repo".parse::<RepositorySlug>().is_err());
    }
}

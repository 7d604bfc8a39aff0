//! Command-line interface.

use clap::{Parser, Subcommand};

use crate::config::{RepositorySlug, Settings};

#[derive(Debug, Parser)]
#[command(name = "lazyhub")]
#[command(about = "Browse a GitHub repository's issues and mark the fixed ones")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Repository to browse, as owner/name
    pub repository: Option<RepositorySlug>,

    /// List pull requests as well as issues
    #[arg(long)]
    pub show_prs: bool,

    /// Validate the stored token before starting and abort if it is rejected
    #[arg(long)]
    pub strict_credential_check: bool,

    /// Skip the check for a newer LazyHub release
    #[arg(long)]
    pub no_update_check: bool,

    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Print the issues marked fixed as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage the GitHub token stored in the OS keyring
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum AuthAction {
    /// Store a token (read from stdin when omitted)
    Set {
        /// The token
        token: Option<String>,
    },
    /// Remove the stored token
    Delete,
    /// Show whether a token is stored
    Status,
}

impl Cli {
    /// Apply command-line overrides on top of file settings.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if self.show_prs {
            settings.show_pull_requests_by_default = true;
        }
        if self.strict_credential_check {
            settings.strict_credential_check = true;
        }
        if self.no_update_check {
            settings.check_for_updates = false;
        }
        if let Some(url) = &self.api_url {
            settings.api_base_url = url.clone();
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repository_and_flags() {
        let cli = Cli::try_parse_from(["lazyhub", "octo/hello", "--show-prs", "--json"]).unwrap();
        assert_eq!(cli.repository, Some(RepositorySlug::new("octo", "hello")));
        assert!(cli.show_prs);
        assert!(cli.json);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_reject_malformed_repository() {
        assert!(Cli::try_parse_from(["lazyhub", "not-a-slug"]).is_err());
    }

    #[test]
    fn test_auth_subcommand() {
        let cli = Cli::try_parse_from(["lazyhub", "auth", "set", "ghp_x"]).unwrap();
        match cli.command {
            Some(Commands::Auth {
                action: AuthAction::Set { token },
            }) => assert_eq!(token.as_deref(), Some("ghp_x")),
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::try_parse_from([
            "lazyhub",
            "o/r",
            "--strict-credential-check",
            "--no-update-check",
            "--api-url",
            "https://ghe.example.com/api/v3",
        ])
        .unwrap();

        let settings = cli.apply(Settings::default());
        assert!(settings.strict_credential_check);
        assert!(!settings.check_for_updates);
        assert!(!settings.show_pull_requests_by_default);
        assert_eq!(settings.api_base_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_no_flags_keep_file_settings() {
        let cli = Cli::try_parse_from(["lazyhub", "o/r"]).unwrap();
        let file = Settings {
            show_pull_requests_by_default: true,
            ..Default::default()
        };
        assert_eq!(cli.apply(file.clone()), file);
    }
}

//! Command-line interface definition.

use clap::{Parser, Subcommand};

use skillforge_client::http::DEFAULT_BASE_URL;
use skillforge_client::SkillLevel;

#[derive(Parser)]
#[command(
    name = "skillforge",
    version,
    about = "Generate, study, and manage AI-built learning roadmaps"
)]
pub struct Cli {
    /// Base URL of the backend API
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new account and store the session
    Signup { email: String, password: String },

    /// Log in and store the session
    Login { email: String, password: String },

    /// Forget the stored session
    Logout,

    /// Show the currently logged-in user
    Whoami,

    /// Generate a new learning roadmap
    Generate {
        /// Goal or topic to build a curriculum for
        goal: String,

        /// Expertise level: beginner, intermediate, or advanced
        #[arg(long, default_value_t = SkillLevel::Beginner)]
        level: SkillLevel,

        /// Save the roadmap to your account once generated
        #[arg(long)]
        save: bool,

        /// Hide the raw stream output while generating
        #[arg(long)]
        quiet: bool,
    },

    /// List saved roadmaps
    List,

    /// Show a saved roadmap
    Show {
        id: String,

        /// Run the interactive stage/quiz session instead of a plain dump
        #[arg(long)]
        quiz: bool,
    },

    /// Delete a saved roadmap
    Delete { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_args() {
        let cli = Cli::parse_from([
            "skillforge",
            "generate",
            "Learn Rust",
            "--level",
            "advanced",
            "--save",
        ]);
        match cli.command {
            Commands::Generate {
                goal,
                level,
                save,
                quiet,
            } => {
                assert_eq!(goal, "Learn Rust");
                assert_eq!(level, SkillLevel::Advanced);
                assert!(save);
                assert!(!quiet);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_default_api_url() {
        let cli = Cli::parse_from(["skillforge", "list"]);
        assert_eq!(cli.api_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_level_rejected() {
        let result = Cli::try_parse_from(["skillforge", "generate", "x", "--level", "expert"]);
        assert!(result.is_err());
    }
}

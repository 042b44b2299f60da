//! Command-line arguments.
//!
//! The publish flags keep the `--np-*` names the npm scripts already pass.
//! An empty value (`--np-tag=`) is accepted and behaves as if the flag were
//! absent.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "bundle-publish",
    version,
    about = "Clean, rebuild and publish a JavaScript bundle"
)]
pub struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Enable debug logging")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Remove lockfile, dependencies and build output, then reinstall and rebuild
    CleanBuild,

    /// Rebuild, regenerate docs, push them and hand off to the publisher
    Publish(PublishArgs),
}

/// Flags of the publish flow
#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct PublishArgs {
    #[arg(
        long = "np-new-version",
        value_name = "VERSION",
        help = "Version to publish; prompts when missing or empty"
    )]
    pub new_version: Option<String>,

    #[arg(
        long = "np-any-branch",
        value_name = "VALUE",
        help = "Any non-empty value lets the publisher run on any branch"
    )]
    pub any_branch: Option<String>,

    #[arg(
        long = "np-tag",
        value_name = "TAG",
        help = "Dist-tag forwarded to the publisher as --tag=<TAG>"
    )]
    pub tag: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl PublishArgs {
    /// The version given on the command line, if it is non-empty.
    pub fn requested_version(&self) -> Option<&str> {
        non_empty(&self.new_version)
    }

    /// Publisher flags, always two slots in a fixed order.
    ///
    /// A slot is an empty string when its flag is absent, so the publisher
    /// invocation keeps a stable shape: `["--any-branch", "--tag=beta"]` or
    /// `["", ""]`.
    pub fn publisher_flags(&self) -> Vec<String> {
        let any_branch = match non_empty(&self.any_branch) {
            Some(_) => "--any-branch".to_string(),
            None => String::new(),
        };
        let tag = match non_empty(&self.tag) {
            Some(tag) => format!("--tag={}", tag),
            None => String::new(),
        };
        vec![any_branch, tag]
    }
}

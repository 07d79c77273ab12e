//! CLI surface.
//!
//! In a workflow the step runs with no arguments and reads `INPUT_*` env
//! vars; the flags exist so the same binary can be driven by hand.

use std::ffi::OsString;

use clap::{ArgAction, Parser};
use time::OffsetDateTime;
use tracing::info;

use crate::config::{ActionInputs, InputOverrides};
use crate::github::MilestoneClient;
use crate::select::next_milestone;
use crate::{RC_TITLE_KEY, Result, output};

#[derive(Parser, Debug)]
#[command(
    name = "rc-milestone",
    version,
    about = "Select the next release candidate milestone from GitHub"
)]
pub struct Cli {
    /// API token (overrides INPUT_GITHUBAPITOKEN).
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Repository owner (overrides INPUT_REPOOWNER).
    #[arg(long, value_name = "OWNER")]
    pub owner: Option<String>,

    /// Repository name (overrides INPUT_REPO).
    #[arg(long, value_name = "REPO")]
    pub repo: Option<String>,

    /// Only match milestones due exactly on this date (YYYY-MM-DD).
    #[arg(long = "due-on", value_name = "DATE")]
    pub due_on: Option<String>,

    /// API base URL (for tests against a stub server).
    #[arg(long, hide = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Errors only.
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Debug output (repeat for more).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        if self.quiet { 0 } else { 1 + self.verbose }
    }
}

pub fn parse_from<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::parse_from(args)
}

/// Run one invocation (used by bin).
pub fn run(cli: Cli) -> Result<()> {
    let inputs = ActionInputs::load(&InputOverrides {
        token: cli.token,
        owner: cli.owner,
        repo: cli.repo,
        due_on: cli.due_on,
    })?;

    let client = match cli.api_base {
        Some(base) => MilestoneClient::with_base_url(inputs.token.clone(), base),
        None => MilestoneClient::new(inputs.token.clone()),
    };
    let milestones = client.list_open_milestones(&inputs.owner, &inputs.repo)?;
    info!(count = milestones.len(), "fetched open milestones");

    let selected = next_milestone(
        RC_TITLE_KEY,
        &milestones,
        inputs.due_on,
        OffsetDateTime::now_utc(),
    );
    match selected {
        Some(m) => info!(title = %m.title, number = m.number, "found release candidate milestone"),
        None => info!("no release candidate milestone found"),
    }

    output::emit(selected)?;
    Ok(())
}

pub mod campaigns;
pub mod factors;
pub mod grades;
pub mod login;
pub mod schema;
pub mod targets;
pub mod wizard;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::model::{EmployeeGroup, FactorType, ItemId};
use crate::notify::{LogNotifier, Notification, Notifier};
use crate::screens::Page;

#[derive(Parser)]
#[command(name = "appraise")]
#[command(
    author,
    version,
    about = "Evaluation campaign setup and HR maintenance screens for the performance portal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(short, long, global = true, default_value = "appraise.yaml")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage evaluation campaigns
    Campaigns(CampaignsArgs),

    /// Assign employees, evaluators and factors to a campaign
    Wizard(WizardArgs),

    /// Maintain the evaluation factor catalog
    Factors(FactorsArgs),

    /// Maintain the grading scale
    Grades(GradesArgs),

    /// Record per-employee targets
    Targets(TargetsArgs),

    /// Store a session token
    Login(LoginArgs),

    /// Clear the stored session token
    Logout,

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Parser, Clone)]
pub struct CampaignsArgs {
    #[command(subcommand)]
    pub action: CampaignAction,
}

#[derive(Subcommand, Clone)]
pub enum CampaignAction {
    /// List campaigns, optionally filtered by name
    List {
        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Create a campaign
    Create {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: String,

        /// Campaign year (defaults to the start date's year)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Update a campaign; omitted fields keep their stored values
    Update {
        id: ItemId,

        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        from: String,

        #[arg(long, default_value = "")]
        to: String,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a campaign
    Delete { id: ItemId },

    /// Show the selectable campaign years
    Years,
}

#[derive(Parser, Clone)]
pub struct WizardArgs {
    /// YAML script of wizard steps to apply
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Employee group to start with (overrides config)
    #[arg(long)]
    pub group: Option<EmployeeGroup>,

    /// Persist the selections after the script runs
    #[arg(long)]
    pub save: bool,

    /// Print the save payload as JSON
    #[arg(long)]
    pub payload: bool,

    /// Search the evaluator catalog by name, username, email or department
    #[arg(long)]
    pub find_evaluator: Option<String>,
}

#[derive(Parser, Clone)]
pub struct FactorsArgs {
    #[command(subcommand)]
    pub action: FactorAction,
}

#[derive(Parser, Clone)]
pub struct FactorFields {
    #[arg(long = "type", default_value = "qualitative")]
    pub kind: FactorType,

    #[arg(long, default_value = "officer")]
    pub group: EmployeeGroup,

    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "")]
    pub marks_level: String,

    #[arg(long, default_value = "")]
    pub total_marks: String,

    #[arg(long, default_value = "")]
    pub passing_marks: String,
}

#[derive(Parser, Clone)]
pub struct FactorPatch {
    #[arg(long = "type")]
    pub kind: Option<FactorType>,

    #[arg(long)]
    pub group: Option<EmployeeGroup>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub marks_level: Option<String>,

    #[arg(long)]
    pub total_marks: Option<String>,

    #[arg(long)]
    pub passing_marks: Option<String>,
}

#[derive(Subcommand, Clone)]
pub enum FactorAction {
    /// List factors
    List {
        #[arg(long = "type")]
        kind: Option<FactorType>,

        /// staff, officer, or all
        #[arg(long)]
        group: Option<String>,

        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Create a factor
    Create(FactorFields),

    /// Edit a factor; omitted fields keep their stored values
    Update {
        id: ItemId,

        #[command(flatten)]
        patch: FactorPatch,
    },

    /// Delete a factor
    Delete { id: ItemId },
}

#[derive(Parser, Clone)]
pub struct GradesArgs {
    #[command(subcommand)]
    pub action: GradeAction,
}

#[derive(Parser, Clone)]
pub struct GradeFields {
    #[arg(long, default_value = "")]
    pub expression: String,

    #[arg(long, default_value = "")]
    pub start: String,

    #[arg(long, default_value = "")]
    pub end: String,

    #[arg(long, default_value = "")]
    pub remarks: String,
}

#[derive(Subcommand, Clone)]
pub enum GradeAction {
    /// List grades sorted by label
    List,

    /// Add a grade band
    Create {
        grade: String,

        #[command(flatten)]
        fields: GradeFields,
    },

    /// Edit a grade band; omitted fields keep their stored values
    Update {
        grade: String,

        /// New label
        #[arg(long, default_value = "")]
        rename: String,

        #[command(flatten)]
        fields: GradeFields,
    },

    /// Delete a grade band by label
    Delete { grade: String },
}

#[derive(Parser, Clone)]
pub struct TargetsArgs {
    #[command(subcommand)]
    pub action: TargetAction,
}

#[derive(Subcommand, Clone)]
pub enum TargetAction {
    /// List recorded targets
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Suggest employees and campaigns matching a name fragment
    Suggest {
        query: String,

        #[arg(long)]
        group: Option<EmployeeGroup>,
    },

    /// Record a target
    Create {
        #[arg(long)]
        employee: Option<ItemId>,

        #[arg(long)]
        campaign: Option<ItemId>,

        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        achievement: String,

        #[arg(long, default_value = "")]
        total_marks: String,

        #[arg(long, default_value = "")]
        marks_obtained: String,
    },
}

#[derive(Parser, Clone)]
pub struct LoginArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long, env = "APPRAISE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Load and validate config, falling back to defaults when the file is absent
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = Config::load_or_default(path)?;
    config.validate()?;
    info!("Backend at {}", config.backend.base_url);
    Ok(config)
}

pub fn notifier() -> Arc<LogNotifier> {
    Arc::new(LogNotifier)
}

/// Report a failure as an error notice and turn it into the command's error
pub fn fail(notifier: &dyn Notifier, message: impl Into<String>) -> anyhow::Error {
    let message = message.into();
    notifier.notify(Notification::error(message.clone()));
    anyhow::anyhow!(message)
}

pub fn print_page_footer<T>(page: &Page<'_, T>) {
    if page.has_next() {
        println!("\nPage {} of {} (--page {} for more)", page.number, page.count, page.number + 1);
    } else {
        println!("\nPage {} of {}", page.number, page.count);
    }
}

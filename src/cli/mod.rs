//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

use crate::models::Answer;

pub mod args;
pub mod audit;
pub mod consumption;
pub mod context;
pub mod handlers;
pub mod hosting;
pub mod init;
pub mod product;
pub mod recommendation;
pub mod save;
pub mod status;

pub use args::OutputFormat;
pub use context::CommandContext;

/// auditop - technical audit questionnaires stored in Grist
#[derive(Parser, Debug)]
#[command(name = "auditop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "AUDITOP_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "AUDITOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "AUDITOP_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Grist API root, e.g. https://grist.example.org/api
    #[arg(long, global = true, env = "AUDITOP_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Grist document id
    #[arg(long, global = true, env = "AUDITOP_DOC_ID", hide_env = true)]
    pub doc_id: Option<String>,

    /// Grist API key (prefer the config file or AUDITOP_API_KEY)
    #[arg(
        long,
        global = true,
        env = "AUDITOP_API_KEY",
        hide = true,
        hide_env_values = true
    )]
    pub api_key: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize auditop configuration
    Init,

    /// Show configuration and connection status
    Status,

    /// Display version information
    Version,

    /// Browse and answer audit questionnaires
    #[command(subcommand)]
    Audit(AuditCommands),

    /// Products and their tools
    #[command(subcommand)]
    Product(ProductCommands),

    /// Recommendations issued to product teams
    #[command(subcommand)]
    Recommendation(RecommendationCommands),

    /// Infrastructure costs
    #[command(subcommand)]
    Consumption(ConsumptionCommands),

    /// Hosting account mappings
    #[command(subcommand)]
    Hosting(HostingCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   auditop completion bash > /etc/bash_completion.d/auditop
  zsh:    auditop completion zsh > \"${fpath[1]}/_auditop\"
  fish:   auditop completion fish > ~/.config/fish/completions/auditop.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Audit subcommands
#[derive(Subcommand, Debug)]
pub enum AuditCommands {
    /// Show an audit and its progress
    Get {
        /// Audit hash
        hash: String,
    },

    /// List the questionnaire with current and previous answers
    Questions {
        /// Audit hash
        hash: String,

        /// Only questions without an answer
        #[arg(long)]
        unanswered: bool,
    },

    /// Answer one question
    #[command(after_help = "\
Examples:
  auditop audit answer 3f2a 12 yes
  auditop audit answer 3f2a 12 no --percentage 50 --comment \"needs work\"
  auditop audit answer 3f2a 12 --comment \"\"   (clear the comment)")]
    Answer {
        /// Audit hash
        hash: String,

        /// Question id
        question: i64,

        /// yes, no, unknown or na; omit to only change comment/percentage
        #[arg(value_enum)]
        answer: Option<Answer>,

        /// Free-text details; an empty string clears the stored comment
        #[arg(long, short = 'c')]
        comment: Option<String>,

        /// Share of the requirement met (0-100), kept only for "no"
        #[arg(long, short = 'p', value_parser = clap::value_parser!(u8).range(0..=100))]
        percentage: Option<u8>,
    },

    /// Clear the answer and comment of one or more questions
    Reset {
        /// Audit hash
        hash: String,

        /// Question ids
        #[arg(required = true)]
        questions: Vec<i64>,
    },

    /// Apply answers from a YAML file
    #[command(after_help = "\
File format:
  - question: 12
    answer: no
    percentage: 50
    comment: needs work
  - question: 13
    reset: true")]
    Import {
        /// Audit hash
        hash: String,

        /// YAML file with a list of answers
        file: PathBuf,
    },
}

/// Product subcommands
#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// Show one product
    Get {
        /// Product id
        id: i64,
    },

    /// List all products
    List,

    /// List the tools catalogue
    Tools {
        /// Dedicated (non-shared) tools instead of shared ones
        #[arg(long)]
        dedicated: bool,
    },

    /// Replace a product's shared and/or dedicated tool lists
    SetTools {
        /// Product id
        id: i64,

        /// Shared tools, comma separated
        #[arg(long, value_delimiter = ',')]
        shared: Option<Vec<String>>,

        /// Dedicated tools, comma separated
        #[arg(long, value_delimiter = ',')]
        dedicated: Option<Vec<String>>,
    },
}

/// Recommendation subcommands
#[derive(Subcommand, Debug)]
pub enum RecommendationCommands {
    /// List a product's recommendations, highest priority first
    List {
        /// Product id
        product: i64,

        /// Only recommendations with this status
        #[arg(long, conflicts_with = "pending")]
        status: Option<String>,

        /// Only recommendations not yet done
        #[arg(long)]
        pending: bool,
    },

    /// Change a recommendation's status
    SetStatus {
        /// Recommendation id
        id: i64,

        /// New status
        status: String,
    },
}

/// Consumption subcommands
#[derive(Subcommand, Debug)]
pub enum ConsumptionCommands {
    /// List a product's infrastructure costs
    List {
        /// Product id
        product: i64,

        /// Only costs of the previous calendar month
        #[arg(long, conflicts_with = "month")]
        last_month: bool,

        /// Only costs of this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
    },
}

/// Hosting mapping subcommands
#[derive(Subcommand, Debug)]
pub enum HostingCommands {
    /// List all hosting mappings
    List,

    /// Resolve mapping ids to tool identifiers
    Get {
        /// Mapping ids
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

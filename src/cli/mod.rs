//! Command-line interface.

pub mod completions;
pub mod context;
pub mod crypt;
pub mod output;
pub mod record;
pub mod share;
pub mod user;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::domain::RecordKind;
use crate::core::share::Decision;
use context::Context;

/// Hexagon - encrypted records with secure sharing.
#[derive(Parser)]
#[command(
    name = "hexagon",
    about = "Encrypted credentials, notes and MFA seeds with secure sharing",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Vault file (overrides the config)
    #[arg(long, global = true, env = "HEXAGON_STORE")]
    pub store: Option<PathBuf>,

    /// Acting user (email address)
    #[arg(short, long, global = true, env = "HEXAGON_USER")]
    pub user: Option<String>,

    /// Password; prompted for when omitted
    #[arg(long, global = true, env = "HEXAGON_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Seal a value under a password
    Seal {
        /// Plaintext; read from stdin when omitted
        plaintext: Option<String>,
    },

    /// Open a sealed value
    Open {
        /// Sealed value (base64); read from stdin when omitted
        sealed: Option<String>,
    },

    /// Print the SHA-256 digest of a message
    Digest {
        /// Message; read from stdin when omitted
        message: Option<String>,
    },

    /// Generate a random secret
    Generate,

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage records
    Record {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Share records with other users
    Share {
        #[command(subcommand)]
        action: ShareAction,
    },

    /// Print a shell completion script
    Completions {
        /// bash, elvish, fish, powershell or zsh
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// User subcommands.
#[derive(Subcommand)]
pub enum UserAction {
    /// Register a user
    Add {
        /// Email address
        username: String,
    },

    /// Change a user's password
    Passwd {
        /// New password; prompted for when omitted
        #[arg(long, env = "HEXAGON_NEW_PASSWORD", hide_env_values = true)]
        new_password: Option<String>,
    },

    /// List registered users
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Record subcommands.
#[derive(Subcommand)]
pub enum RecordAction {
    /// Add a record
    Add {
        /// account, seed or note
        kind: RecordKind,
        /// Site URL or note title
        name: String,
        /// Field values in order; prompted for when omitted
        fields: Vec<String>,
    },

    /// List your records
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a record's fields
    Show {
        /// Record id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace a record's fields
    Edit {
        /// Record id
        id: String,
        /// Field values in order; prompted for when omitted
        fields: Vec<String>,
    },

    /// Drop your access to a record
    Rm {
        /// Record id
        id: String,
    },
}

/// Share subcommands.
#[derive(Subcommand)]
pub enum ShareAction {
    /// Share a record and print the link
    Create {
        /// Record id
        record: String,
        /// Receiver's email address
        receiver: String,
    },

    /// Accept a share link
    Accept {
        /// Share link
        link: String,
    },

    /// Decline a share link
    Decline {
        /// Share link
        link: String,
    },

    /// Cancel a pending share
    Cancel {
        /// Record id
        record: String,
        /// Share id
        share: String,
    },

    /// Remove an owner from a record
    Revoke {
        /// Record id
        record: String,
        /// Owner to remove
        owner: String,
    },

    /// List pending shares of a record
    Pending {
        /// Record id
        record: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Execute a command.
pub fn execute(command: Command, global: GlobalArgs) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Digest { message } => crypt::digest(message),
        Generate => crypt::generate(),
        Completions { shell } => completions::execute(shell, &mut std::io::stdout()),
        Seal { plaintext } => crypt::seal(&Context::new(global)?, plaintext),
        Open { sealed } => crypt::open(&Context::new(global)?, sealed),
        User { action } => {
            let ctx = Context::new(global)?;
            match action {
                UserAction::Add { username } => user::add(&ctx, &username),
                UserAction::Passwd { new_password } => user::passwd(&ctx, new_password),
                UserAction::List { json } => user::list(&ctx, json),
            }
        }
        Record { action } => {
            let ctx = Context::new(global)?;
            match action {
                RecordAction::Add { kind, name, fields } => record::add(&ctx, kind, &name, fields),
                RecordAction::List { json } => record::list(&ctx, json),
                RecordAction::Show { id, json } => record::show(&ctx, &id, json),
                RecordAction::Edit { id, fields } => record::edit(&ctx, &id, fields),
                RecordAction::Rm { id } => record::rm(&ctx, &id),
            }
        }
        Share { action } => {
            let ctx = Context::new(global)?;
            match action {
                ShareAction::Create { record, receiver } => share::create(&ctx, &record, &receiver),
                ShareAction::Accept { link } => share::finalize(&ctx, &link, Decision::Accept),
                ShareAction::Decline { link } => share::finalize(&ctx, &link, Decision::Decline),
                ShareAction::Cancel { record, share: id } => share::cancel(&ctx, &record, &id),
                ShareAction::Revoke { record, owner } => share::revoke(&ctx, &record, &owner),
                ShareAction::Pending { record, json } => share::pending(&ctx, &record, json),
            }
        }
    }
}

pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Issue signed certificates. Verify every signature. Query by recipient.
#[derive(Parser, Debug)]
#[command(name = "certchain", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Ledger home directory (default: .certchain)
    #[arg(long, global = true, env = "CERTCHAIN_HOME")]
    pub home: Option<String>,

    /// Verbose output (debug diagnostics on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the ledger home and the sequence counter
    Init,

    /// Manage recipients
    Recipient {
        #[command(subcommand)]
        action: RecipientAction,
    },

    /// Manage issuers
    Issuer {
        #[command(subcommand)]
        action: IssuerAction,
    },

    /// Verify a signed certificate and store it
    Issue {
        /// Certificate JSON exactly as signed, or @path to read it from a file
        cert: String,
        /// Signature bytes, base64-encoded
        #[arg(
            long,
            conflicts_with = "signature_file",
            required_unless_present = "signature_file"
        )]
        signature: Option<String>,
        /// File holding the raw signature bytes
        #[arg(long)]
        signature_file: Option<PathBuf>,
    },

    /// List the certificates issued to a recipient
    Certs {
        /// Query JSON: {"ID":..,"Name":..}, or @path
        query: String,
    },

    /// Show operation history
    Log {
        /// Filter by operator
        #[arg(long)]
        operator: Option<String>,
        /// Filter by action: init, add_recipient, add_issuer, issue_cert, reject_cert
        #[arg(long)]
        action: Option<String>,
        /// Filter by subject: certificate id, recipient id or issuer name
        #[arg(long)]
        subject: Option<String>,
        /// Filter entries since this date (ISO 8601)
        #[arg(long)]
        since: Option<String>,
        /// Show last N entries
        #[arg(long)]
        last: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecipientAction {
    /// Register a recipient: {"Rp":{"ID":..,"Name":..},"PubKeyPem":..}
    Add {
        /// Recipient JSON, or @path
        payload: String,
    },
    /// Show a registered recipient
    Show {
        /// Recipient id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum IssuerAction {
    /// Register an issuer: {"Issuer":..,"PubKeyPem":..}
    Add {
        /// Issuer JSON, or @path
        payload: String,
    },
    /// Show a registered issuer and its key
    Show {
        /// Issuer name
        name: String,
    },
}

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "invoice-desk")]
#[command(author, version, about = "Invoice Desk CLI - invoices, billing, payments and currency conversion")]
pub struct Cli {
    /// Path to config file (checked in order: local config.toml, ~/.config/invoice-desk/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session credential
    Login {
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Register a company account
    Register {
        /// Company name shown on invoices
        company_name: String,

        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Clear the stored session
    Logout,

    /// Show the cached user record
    Whoami,

    /// Manage invoices
    Invoices {
        #[command(subcommand)]
        command: InvoiceCommands,
    },

    /// Show the user profile or update settings
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Account balance and plan
    Billing {
        #[command(subcommand)]
        command: BillingCommands,
    },

    /// Payment orders
    Payments {
        #[command(subcommand)]
        command: PaymentCommands,
    },

    /// Convert an amount between currencies
    Convert {
        amount: f64,

        /// Source currency code
        #[arg(long)]
        from: String,

        /// Target currency code
        #[arg(long)]
        to: String,
    },

    /// Show configuration and session status
    Status,
}

#[derive(Subcommand)]
pub enum InvoiceCommands {
    /// List all invoices
    List,

    /// Show a single invoice
    Get { id: String },

    /// Create an invoice from a JSON file
    Create {
        /// Path to a JSON invoice document
        path: PathBuf,
    },

    /// Delete an invoice
    Delete { id: String },

    /// Set the status of an invoice (e.g. draft, sent, paid)
    Status { id: String, status: String },

    /// Email an invoice to its client
    Send {
        id: String,

        /// Override the recipient address
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Show invoice statistics
    Stats,

    /// Download the PDF rendering of an invoice
    Pdf {
        id: String,

        /// Directory to save into
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Fetch the profile from the server
    Show,

    /// Update settings from a JSON document
    Settings {
        /// Settings as a JSON string
        json: String,
    },
}

#[derive(Subcommand)]
pub enum BillingCommands {
    /// Add funds to the account balance
    AddFunds { amount: f64 },

    /// Upgrade to the premium tier
    Upgrade,
}

#[derive(Subcommand)]
pub enum PaymentCommands {
    /// Create a payment order
    CreateOrder {
        amount: f64,

        /// Payment type (e.g. add_funds, premium)
        #[arg(short = 't', long = "type")]
        payment_type: String,
    },

    /// Verify a completed payment
    Verify {
        #[arg(long)]
        order_id: String,

        #[arg(long)]
        payment_id: String,

        #[arg(long)]
        signature: String,

        #[arg(short = 't', long = "type")]
        payment_type: String,

        #[arg(long)]
        amount: f64,
    },
}

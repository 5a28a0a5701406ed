use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wishlink")]
#[command(about = "Create and share greeting wishes by code", version)]
pub(crate) struct Cli {
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub(crate) version: Option<bool>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Create a wish and print its share code
    Create {
        #[command(flatten)]
        form: WishArgs,
    },
    /// Replace a wish's form fields, keeping its id, code and creation time
    Update {
        id: String,
        #[command(flatten)]
        form: WishArgs,
    },
    /// Delete a wish by id
    Delete { id: String },
    /// Look up a wish by its share code
    View { code: String },
    /// List wishes you sent (default) or received
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        received: bool,
        /// Phone to list for; defaults to the logged-in account
        #[arg(long)]
        phone: Option<String>,
    },
    /// List the occasions the create form accepts
    Occasions,
    Register {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
    },
    Login {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Whoami,
    /// Change the password for an account
    Passwd {
        /// Defaults to the logged-in account
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
    },
    /// Run one delivery pass now, ignoring the morning send window
    Check,
    /// Run the always-on delivery loop (checks every minute)
    Scheduler,
    Version,
}

#[derive(Args)]
pub(crate) struct WishArgs {
    #[arg(long)]
    pub(crate) sender_name: String,
    #[arg(long)]
    pub(crate) sender_phone: String,
    #[arg(long)]
    pub(crate) recipient_name: String,
    #[arg(long)]
    pub(crate) recipient_phone: String,
    /// One of the known occasions; use `other` with --custom-occasion
    #[arg(long)]
    pub(crate) occasion: String,
    #[arg(long, default_value = "")]
    pub(crate) custom_occasion: String,
    #[arg(long)]
    pub(crate) message: String,
    /// Photo reference; repeat for up to five photos
    #[arg(long = "photo")]
    pub(crate) photos: Vec<String>,
    /// Occasion date, YYYY-MM-DD
    #[arg(long)]
    pub(crate) date: NaiveDate,
    #[arg(long)]
    pub(crate) gift_brand: Option<String>,
    #[arg(long)]
    pub(crate) gift_amount: Option<u32>,
    #[arg(long, default_value = "USD")]
    pub(crate) gift_currency: String,
    /// Redeem code printed on the gift card; generated when omitted
    #[arg(long)]
    pub(crate) gift_code: Option<String>,
    #[arg(long, default_value = "")]
    pub(crate) gift_message: String,
}

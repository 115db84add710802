use crate::domain::model::TimeSlot;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "slot-store")]
#[command(about = "Book a SlotStore time slot from the terminal")]
pub struct CliConfig {
    /// Path to a TOML store configuration
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the bookable time slots
    Slots,
    /// Resolve a navigation path to its page
    Route { path: String },
    /// Check a card number, and optionally its expiry and CVV
    CheckCard {
        number: String,
        #[arg(long)]
        expiry: Option<String>,
        #[arg(long)]
        cvv: Option<String>,
    },
    /// Fill in the booking form and pay
    Book(BookArgs),
}

#[derive(Debug, Clone, Args)]
pub struct BookArgs {
    /// Booking date, YYYY-MM-DD
    #[arg(long)]
    pub date: NaiveDate,

    /// Slot label ("16:00 - 16:30") or start time ("16:00")
    #[arg(long)]
    pub slot: TimeSlot,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long, default_value = "1")]
    pub party: String,

    #[arg(long)]
    pub card: String,

    /// MM/YY
    #[arg(long)]
    pub expiry: String,

    #[arg(long)]
    pub cvv: String,

    #[arg(long)]
    pub holder: String,

    /// Pretend today is this date
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

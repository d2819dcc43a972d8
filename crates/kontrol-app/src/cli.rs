use clap::{Parser, ValueEnum};
use kontrol_common::Section;
use kontrol_config::schema::ResponderKind;

/// KONTROL portfolio assistant widget in the terminal.
#[derive(Parser, Debug)]
#[command(name = "kontrol", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Section the widget is mounted in.
    #[arg(short = 's', long, value_enum)]
    pub section: Option<SectionArg>,

    /// Start with the panel expanded.
    #[arg(long)]
    pub open: bool,

    /// Responder override.
    #[arg(long, value_enum)]
    pub responder: Option<ResponderArg>,

    /// Backend endpoint override (http responder).
    #[arg(long)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SectionArg {
    Dashboard,
    Fiscal,
    Wallets,
    Exchanges,
}

impl From<SectionArg> for Section {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Dashboard => Section::Dashboard,
            SectionArg::Fiscal => Section::Fiscal,
            SectionArg::Wallets => Section::Wallets,
            SectionArg::Exchanges => Section::Exchanges,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ResponderArg {
    Http,
    Canned,
}

impl From<ResponderArg> for ResponderKind {
    fn from(arg: ResponderArg) -> Self {
        match arg {
            ResponderArg::Http => ResponderKind::Http,
            ResponderArg::Canned => ResponderKind::Canned,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

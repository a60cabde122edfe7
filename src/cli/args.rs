use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "waktu", version, author, about = "Malaysian prayer times from JAKIM e-Solat")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show today's prayer times and countdown to the next prayer
    Times {
        /// Zone code (defaults to the selected zone)
        #[arg(long)]
        zone: Option<String>,
        /// Bypass the monthly cache
        #[arg(long)]
        refresh: bool,
    },
    /// Show the next seven days (not cached)
    Week {
        /// Zone code (defaults to the selected zone)
        #[arg(long)]
        zone: Option<String>,
    },
    /// List zones, optionally filtered by code, district or state
    Zones {
        query: Option<String>,
    },
    /// Select the zone used by default
    Zone {
        /// Zone code, e.g. WLY01
        code: String,
    },
    /// Show or change display and notification preferences
    Prefs {
        #[arg(long)]
        imsak: Option<bool>,
        #[arg(long)]
        syuruk: Option<bool>,
        #[arg(long)]
        dhuha: Option<bool>,
        #[arg(long)]
        notifications: Option<bool>,
        #[arg(long)]
        early_notification: Option<bool>,
    },
    /// Show the qibla bearing for a zone
    Qibla {
        #[arg(long)]
        zone: Option<String>,
    },
    /// Remove every cached month for every zone
    ClearCache,
    /// Keep the current/next prayer on screen, updated every minute
    Watch {
        #[arg(long)]
        zone: Option<String>,
    },
}

use crate::core::filter::ViewKind;
use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for tripplanner
/// Plan trips: events, visits, bridges and a day timeline, stored in SQLite
#[derive(Parser)]
#[command(
    name = "tripplanner",
    version = env!("CARGO_PKG_VERSION"),
    about = "A travel itinerary planner: events, visits and a drag-and-drop day timeline on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check, migrate or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Report fields missing from the configuration file")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Database maintenance
    Db {
        #[arg(long = "migrate", help = "Apply pending schema migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Run SQLite integrity check")]
        check: bool,

        #[arg(long = "vacuum", help = "Compact the database file")]
        vacuum: bool,

        #[arg(long = "info", help = "Show row counts and applied migrations")]
        info: bool,
    },

    /// Add, edit or delete events (places you may visit)
    Event {
        #[command(subcommand)]
        action: EventCmd,
    },

    /// Add, edit, delete or renumber visits
    Visit {
        #[command(subcommand)]
        action: VisitCmd,
    },

    /// Add, edit or delete bridges (transit and breaks between visits)
    Bridge {
        #[command(subcommand)]
        action: BridgeCmd,
    },

    /// List events or visits as cards, with marker labels
    List {
        #[arg(long, value_enum, default_value = "events")]
        view: ViewKind,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the markers of the current selection and the bounds fitting them
    Map {
        #[arg(long, value_enum, default_value = "events")]
        view: ViewKind,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, value_name = "MARKER", help = "Show the detail card of a marker (A, 1, ...)")]
        select: Option<String>,
    },

    /// Show the day timeline
    Timeline {
        #[arg(long, help = "Day to show (YYYY-MM-DD or 'today', default today)")]
        date: Option<String>,

        #[arg(long, help = "Slot size in minutes: 60, 30, 15 or 10")]
        zoom: Option<String>,

        #[arg(
            long = "expand",
            value_name = "S-E",
            help = "Expand a collapsed range, e.g. 4-8 (repeatable)"
        )]
        expand: Vec<String>,

        #[arg(
            long = "toggle",
            value_name = "HOUR",
            help = "Toggle collapse at an hour (repeatable)"
        )]
        toggle: Vec<u32>,

        #[arg(long = "expand-all", help = "Show every hour")]
        expand_all: bool,

        #[arg(long = "ids", help = "Show drop ids next to slots and collapsed ranges")]
        ids: bool,
    },

    /// Drag a visit onto a timeline slot
    Move {
        #[arg(help = "Visit to move: visit-<id> or <id>")]
        item: String,

        #[arg(
            long,
            value_name = "HH:MM",
            conflicts_with = "over",
            help = "Target time on the board day"
        )]
        to: Option<String>,

        #[arg(
            long,
            value_name = "DROP_ID",
            help = "Drop target id: timeslot-<epochMillis> or collapsed-<s>-<e>"
        )]
        over: Option<String>,

        #[arg(long, help = "Board day (default: the visit's own day, else today)")]
        date: Option<String>,

        #[arg(long, help = "Slot size in minutes used to snap the target")]
        zoom: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export events or visits
    Export {
        #[arg(long, value_enum, default_value = "events")]
        view: ViewKind,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter by year/month/day or a custom range (YYYY-MM-DD:YYYY-MM-DD)"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Args, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, help = "Only items of this day (YYYY-MM-DD or 'today')")]
    pub date: Option<String>,

    #[arg(long, help = "Category: all, cosmetics, game, celebrity, character")]
    pub category: Option<String>,

    #[arg(long, help = "District (seongsu, hongdae, ...) or 'all'")]
    pub district: Option<String>,

    #[arg(long, help = "Only visits without a time (visits view)")]
    pub unscheduled: bool,
}

#[derive(Subcommand)]
pub enum EventCmd {
    /// Create an event
    Add(EventArgs),

    /// Update an event; omitted flags keep their value
    Edit {
        id: i64,

        #[command(flatten)]
        args: EventArgs,
    },

    /// Delete an event (its visits are kept)
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Args, Clone, Default)]
pub struct EventArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, help = "Category: cosmetics, game, celebrity, character")]
    pub category: Option<String>,

    #[arg(long, help = "District (seongsu, hongdae, ...)")]
    pub district: Option<String>,

    #[arg(long = "start", value_name = "YYYY-MM-DD")]
    pub start_date: Option<String>,

    #[arg(long = "end", value_name = "YYYY-MM-DD")]
    pub end_date: Option<String>,

    #[arg(long = "open", value_name = "HH:MM")]
    pub open_time: Option<String>,

    #[arg(long = "close", value_name = "HH:MM")]
    pub close_time: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long = "road-address")]
    pub road_address: Option<String>,

    #[arg(long = "jibun-address")]
    pub jibun_address: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,

    #[arg(long = "reservation", value_name = "BOOL")]
    pub need_reservation: Option<bool>,

    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    #[arg(long, help = "Fill coordinates from an already known place with the same address")]
    pub geocode: bool,

    #[arg(
        long = "pick-lat",
        requires = "pick_lng",
        allow_hyphen_values = true,
        help = "Pick a point on the map (with --pick-lng)"
    )]
    pub pick_lat: Option<f64>,

    #[arg(long = "pick-lng", requires = "pick_lat", allow_hyphen_values = true)]
    pub pick_lng: Option<f64>,
}

#[derive(Subcommand)]
pub enum VisitCmd {
    /// Plan a visit to an event
    Add(VisitArgs),

    /// Update a visit; omitted flags keep their value
    Edit {
        id: i64,

        #[command(flatten)]
        args: VisitArgs,

        #[arg(long, conflicts_with = "time", help = "Clear the visit time")]
        unschedule: bool,
    },

    /// Delete a visit
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Renumber the visits and bridges of a day in timeline order
    Renumber {
        #[arg(long, help = "Day to renumber (default today)")]
        date: Option<String>,
    },
}

#[derive(Args, Clone, Default)]
pub struct VisitArgs {
    #[arg(long = "event", value_name = "EVENT_ID")]
    pub event_id: Option<i64>,

    #[arg(long, value_name = "YYYY-MM-DD HH:MM")]
    pub time: Option<String>,

    #[arg(long)]
    pub order: Option<i32>,

    #[arg(long, value_name = "BOOL")]
    pub reserved: Option<bool>,

    #[arg(long = "reservation-time", value_name = "YYYY-MM-DD HH:MM")]
    pub reservation_time: Option<String>,

    #[arg(long, value_name = "BOOL")]
    pub important: Option<bool>,

    #[arg(long = "reservation-url")]
    pub reservation_url: Option<String>,

    #[arg(long = "reference-url")]
    pub reference_url: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum BridgeCmd {
    /// Add a bridge
    Add(BridgeArgs),

    /// Update a bridge; omitted flags keep their value
    Edit {
        id: i64,

        #[command(flatten)]
        args: BridgeArgs,
    },

    /// Delete a bridge
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Args, Clone, Default)]
pub struct BridgeArgs {
    #[arg(long = "event", value_name = "EVENT_ID")]
    pub event_id: Option<i64>,

    #[arg(long = "type", value_name = "TYPE", help = "transport, rest or generic")]
    pub bridge_type: Option<String>,

    #[arg(long, help = "Duration in minutes")]
    pub duration: Option<i32>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD HH:MM")]
    pub time: Option<String>,

    #[arg(long)]
    pub order: Option<i32>,

    #[arg(long, value_name = "BOOL")]
    pub reserved: Option<bool>,

    #[arg(long = "reservation-time", value_name = "YYYY-MM-DD HH:MM")]
    pub reservation_time: Option<String>,

    #[arg(long = "reservation-url")]
    pub reservation_url: Option<String>,

    #[arg(long = "reference-url")]
    pub reference_url: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use media_catalog::export::ExportKind;
use media_catalog::{MovieSort, SeriesSort};
use models::{MovieCategory, SeriesFormat, WatchStatus};

#[derive(Debug, Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Star Wars film and series catalog with fuzzy search and watch tracking")]
#[command(arg_required_else_help = true)]
pub struct RootArgs {
    #[arg(
        long,
        default_value = "data",
        value_name = "DIR",
        help = "Directory holding the catalog, watchlist and preferences files"
    )]
    pub data_dir: PathBuf,

    #[arg(
        long,
        value_name = "FILE",
        help = "Movies catalog JSON (default: <DIR>/movies.json)"
    )]
    pub movies_file: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Series catalog JSON (default: <DIR>/series.json)"
    )]
    pub series_file: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Watchlist JSON (default: <DIR>/watchlist.json)"
    )]
    pub watchlist_file: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "User preferences JSON (default: <DIR>/user-preferences.json)"
    )]
    pub preferences_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Fuzzy search titles, episodes, eras and synopses")]
    Search {
        #[arg(value_name = "QUERY")]
        query: String,
        #[arg(
            long,
            default_value_t = 10,
            value_name = "N",
            help = "Maximum number of results (0 for all)"
        )]
        limit: usize,
        #[arg(long, help = "Search series instead of movies")]
        series: bool,
        #[arg(
            long,
            value_name = "SCORE",
            help = "Drop matches scoring below this (default 0.32)"
        )]
        min_score: Option<f64>,
    },
    #[command(about = "Suggest titles for a possibly misspelled query")]
    Suggest {
        #[arg(value_name = "QUERY")]
        query: String,
        #[arg(long, default_value_t = 5, value_name = "N", help = "Maximum suggestions")]
        limit: usize,
        #[arg(long, help = "Suggest series titles instead of movies")]
        series: bool,
    },
    #[command(about = "List the catalog with filters and sorting")]
    List {
        #[command(subcommand)]
        command: ListCommand,
    },
    #[command(about = "Show every era present in the catalog")]
    Eras,
    #[command(about = "Track what you plan to watch and what you finished")]
    Watch {
        #[command(subcommand)]
        command: WatchCommand,
    },
    #[command(about = "Manage favorite titles")]
    Favorite {
        #[command(subcommand)]
        command: FavoriteCommand,
    },
    #[command(about = "Show achievement progress")]
    Achievements,
    #[command(about = "Write the catalog to a JSON file")]
    Export {
        #[arg(value_name = "movies|series")]
        kind: ExportKind,
        #[arg(long, value_name = "FILE", help = "Output JSON file path")]
        out: PathBuf,
    },
    #[command(about = "Show recent search queries")]
    Recent,
    #[command(about = "Build a themed viewing lineup")]
    Experience {
        #[command(subcommand)]
        command: ExperienceCommand,
    },
    #[command(about = "Show or change output settings")]
    Settings {
        #[arg(
            long,
            value_name = "BOOL",
            value_parser = BoolishValueParser::new(),
            help = "Colorize catalog lines"
        )]
        color: Option<bool>,
        #[arg(
            long,
            value_name = "BOOL",
            value_parser = BoolishValueParser::new(),
            help = "Prefix catalog lines with an emoji"
        )]
        emoji: Option<bool>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ExperienceCommand {
    #[command(about = "Films in release order")]
    Marathon {
        #[arg(
            long,
            default_value_t = 0,
            value_name = "N",
            help = "Number of films (0 for all)"
        )]
        limit: usize,
    },
    #[command(about = "Two films from the same era")]
    Double,
    #[command(about = "A weighted random pick of distinct films")]
    Random {
        #[arg(long, default_value_t = 3, value_name = "N", help = "Number of films")]
        count: usize,
        #[arg(long, value_name = "SEED", help = "Seed for a repeatable lineup")]
        seed: Option<u64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ListCommand {
    #[command(about = "List movies")]
    Movies {
        #[arg(
            long,
            default_value = "release-asc",
            value_name = "ORDER",
            help = "release-asc, release-desc, alphabetical or saga-order"
        )]
        sort: MovieSort,
        #[arg(
            long,
            value_name = "CATEGORY",
            help = "SAGA, ANTHOLOGY, ANIMATED_FEATURE, TV_FILM or LEGO_SPECIAL"
        )]
        category: Option<MovieCategory>,
        #[arg(long, value_name = "ERA", help = "Only movies set in this era")]
        era: Option<String>,
        #[arg(
            long,
            value_name = "TEXT",
            help = "Only movies whose title, era, synopsis or notes contain TEXT"
        )]
        contains: Option<String>,
        #[arg(
            long,
            conflicts_with_all = ["category", "sort"],
            help = "Group by category, oldest first within each group"
        )]
        grouped: bool,
    },
    #[command(about = "List series")]
    Series {
        #[arg(
            long,
            default_value = "start-asc",
            value_name = "ORDER",
            help = "start-asc, start-desc or alphabetical"
        )]
        sort: SeriesSort,
        #[arg(
            long,
            value_name = "FORMAT",
            help = "LIVE_ACTION, ANIMATED, MICRO_SERIES, LEGO, ANTHOLOGY or DOCUMENTARY"
        )]
        format: Option<SeriesFormat>,
        #[arg(long, value_name = "ERA", help = "Only series set in this era")]
        era: Option<String>,
        #[arg(
            long,
            value_name = "TEXT",
            help = "Only series whose title, era, synopsis or notes contain TEXT"
        )]
        contains: Option<String>,
        #[arg(
            long,
            conflicts_with_all = ["format", "sort"],
            help = "Group by format, earliest first within each group"
        )]
        grouped: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum WatchCommand {
    #[command(about = "Add a title to the watchlist or change its status")]
    Add {
        #[arg(value_name = "TITLE")]
        title: String,
        #[arg(long, help = "The title is a series")]
        series: bool,
        #[arg(
            long,
            default_value = "PLANNED",
            value_name = "STATUS",
            help = "PLANNED, IN_PROGRESS or COMPLETED"
        )]
        status: WatchStatus,
    },
    #[command(about = "Record a finished viewing")]
    Done {
        #[arg(value_name = "TITLE")]
        title: String,
        #[arg(long, help = "The title is a series")]
        series: bool,
        #[arg(long, value_name = "0..5", help = "Rating, keeps the previous one if omitted")]
        rating: Option<u8>,
        #[arg(long, default_value = "", value_name = "TEXT", help = "Notes for this viewing")]
        notes: String,
    },
    #[command(about = "Remove a title from the watchlist")]
    Remove {
        #[arg(value_name = "TITLE")]
        title: String,
    },
    #[command(about = "Show the watchlist")]
    List,
    #[command(about = "Show every recorded viewing")]
    History,
}

#[derive(Debug, Subcommand)]
pub enum FavoriteCommand {
    #[command(about = "Mark a title as favorite")]
    Add {
        #[arg(value_name = "TITLE")]
        title: String,
        #[arg(long, help = "The title is a series")]
        series: bool,
    },
    #[command(about = "Unmark a favorite title")]
    Remove {
        #[arg(value_name = "TITLE")]
        title: String,
        #[arg(long, help = "The title is a series")]
        series: bool,
    },
    #[command(about = "Show favorite titles")]
    List,
}

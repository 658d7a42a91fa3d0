use clap::{arg, Arg, ArgMatches};
use log::LevelFilter;

pub struct GlobalSettings {
    pub table: crate::tables::Settings,

    // Number of columns available to display tables
    pub width: usize,

    pub log_level: LevelFilter,
}

impl GlobalSettings {
    /// Return the command line switches to configure the global settings
    pub fn cli() -> impl IntoIterator<Item = Arg> {
        [
            arg!(-v --verbose ... "Show more details, repeat for even more")
                .global(true),
            arg!(--width [COLUMNS] "Maximum width of tables")
                .value_parser(clap::value_parser!(usize))
                .global(true),
        ]
    }

    /// Create the settings from the command line arguments
    pub fn new(args: &ArgMatches) -> Self {
        GlobalSettings {
            width: args
                .get_one::<usize>("width")
                .copied()
                .unwrap_or_else(|| console::Term::stdout().size().1 as usize),
            log_level: match args.get_count("verbose") {
                0 => LevelFilter::Warn,
                1 => LevelFilter::Info,
                2 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            },
            table: crate::tables::Settings {
                colsep: "│".to_string(),
            },
        }
    }
}

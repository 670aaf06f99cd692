// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use bookshelf_config::{Config, ConfigManager};
use bookshelf_core::AppError;
use bookshelf_library::{Library, LibraryError};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

/// Book field flags shared by `add`, `edit` and `import`
fn book_field_args(required: bool) -> Vec<Arg> {
    let text = |id: &'static str, long: &'static str, name: &'static str, help: &'static str| {
        Arg::new(id).long(long).value_name(name).help(help)
    };

    vec![
        text("title", "title", "TITLE", "Book title").short('t'),
        text("author", "author", "AUTHOR", "Author name")
            .short('a')
            .required(required),
        text("genre", "genre", "GENRE", "Genre").short('g').required(required),
        text("date", "date", "DD.MM.YYYY", "Publication date").required(required),
        text("pages", "pages", "N", "Number of pages"),
        text("rating", "rating", "0-5", "Rating from 0.0 to 5.0"),
        text("description", "description", "TEXT", "Free-form notes"),
    ]
}

fn index_arg() -> Arg {
    Arg::new("index")
        .required(true)
        .value_name("INDEX")
        .help("Position of the book as shown by 'list'")
        .value_parser(value_parser!(usize))
}

fn build_cli() -> Command {
    Command::new("bookshelf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Personal e-book catalog")
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("data-file")
                .short('d')
                .long("data-file")
                .value_name("PATH")
                .help("Library snapshot file, overrides the config")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("More log output (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(Command::new("init").about("Write a default config file"))
        .subcommand(
            Command::new("config")
                .about("Inspect or change config.toml")
                .subcommand_required(true)
                .subcommand(
                    Command::new("show")
                        .about("Print the effective settings, env overrides included"),
                )
                .subcommand(Command::new("path").about("Print the config file location"))
                .subcommand(Command::new("check").about("Report invalid values in the config file"))
                .subcommand(
                    Command::new("set")
                        .about("Change one setting and save")
                        .arg(
                            Arg::new("key")
                                .required(true)
                                .value_name("KEY")
                                .help("Setting to change")
                                .value_parser(Config::KEYS),
                        )
                        .arg(
                            Arg::new("value")
                                .required(true)
                                .value_name("VALUE")
                                .help("New value; booleans take true/false"),
                        ),
                )
                .subcommand(
                    Command::new("reset")
                        .about("Overwrite the config file with defaults")
                        .arg(
                            Arg::new("force")
                                .short('f')
                                .long("force")
                                .help("Skip confirmation prompt")
                                .action(ArgAction::SetTrue),
                        ),
                ),
        )
        .subcommand(Command::new("list").about("List all books in the library"))
        .subcommand(
            Command::new("add")
                .about("Add a new book to the library")
                .args(book_field_args(true))
                .mut_arg("title", |a| a.required(true))
                .arg(
                    Arg::new("file")
                        .short('f')
                        .long("file")
                        .value_name("FILE")
                        .help("E-book file to attach"),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Change fields of a book; omitted fields keep their values")
                .arg(index_arg())
                .args(book_field_args(false))
                .arg(
                    Arg::new("file")
                        .short('f')
                        .long("file")
                        .value_name("FILE")
                        .help("E-book file to attach, empty to detach"),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a book from the library")
                .arg(index_arg())
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .help("Skip confirmation prompt")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show detailed information about a book")
                .arg(index_arg()),
        )
        .subcommand(
            Command::new("search")
                .about("Search for books")
                .arg(
                    Arg::new("query")
                        .required(true)
                        .value_name("QUERY")
                        .help("Text to look for"),
                )
                .arg(
                    Arg::new("by")
                        .short('b')
                        .long("by")
                        .value_name("FIELD")
                        .help("Field to search")
                        .value_parser(["title", "author", "genre"])
                        .default_value("title"),
                ),
        )
        .subcommand(Command::new("genres").about("List the genres in use"))
        .subcommand(Command::new("stats").about("Show library statistics"))
        .subcommand(
            Command::new("open")
                .about("Open a book's file with the default application")
                .arg(index_arg()),
        )
        .subcommand(
            Command::new("export")
                .about("Export library data")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Output file path [default: library_export.<format>]")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_name("FORMAT")
                        .help("Export format")
                        .value_parser(["json", "csv"])
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Add a book from an e-book file; the title defaults to the file name")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .value_name("FILE")
                        .help("Path to the e-book file")
                        .value_parser(value_parser!(PathBuf)),
                )
                .args(book_field_args(false)),
        )
}

fn config_manager(matches: &ArgMatches) -> Result<ConfigManager> {
    match matches.get_one::<PathBuf>("config-dir") {
        Some(dir) => Ok(ConfigManager::with_directory(dir)),
        None => ConfigManager::new().context("Failed to locate config directory"),
    }
}

fn init_logging(verbosity: u8, config: &Config) {
    let default_level = match verbosity {
        0 => config.app.log_level.as_filter(),
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level.as_str().to_lowercase()),
    )
    .init();
}

fn run(matches: &ArgMatches) -> Result<()> {
    let manager = config_manager(matches);
    let loaded: Result<Config> = match &manager {
        Ok(manager) => manager.load_with_env_overrides().map_err(Into::into),
        Err(e) => Err(anyhow::anyhow!("{:#}", e)),
    };
    let config = loaded.as_ref().cloned().unwrap_or_default();

    init_logging(matches.get_count("verbose"), &config);
    if !config.app.color_output {
        console::set_colors_enabled(false);
    }
    if let Err(e) = &loaded {
        log::warn!("{:#}, using default settings", e);
    }

    match matches.subcommand() {
        Some(("init", _)) => return commands::init_config(&manager?),
        Some(("config", sub_matches)) => {
            return commands::config_command(&manager?, &config, sub_matches)
        }
        _ => {}
    }

    let mut library_config = config.library.clone();
    if let Some(path) = matches.get_one::<PathBuf>("data-file") {
        library_config.data_file = path.clone();
    }
    let mut library = Library::from_config(&library_config);

    match matches.subcommand() {
        Some(("list", _)) => commands::list_books(&library),
        Some(("add", sub_matches)) => commands::add_book(&mut library, sub_matches),
        Some(("edit", sub_matches)) => commands::edit_book(&mut library, sub_matches),
        Some(("remove", sub_matches)) => commands::remove_book(&mut library, sub_matches),
        Some(("show", sub_matches)) => commands::show_book(&library, sub_matches),
        Some(("search", sub_matches)) => commands::search_books(&library, sub_matches),
        Some(("genres", _)) => commands::list_genres(&library),
        Some(("stats", _)) => commands::show_stats(&library),
        Some(("open", sub_matches)) => commands::open_book(&library, sub_matches),
        Some(("export", sub_matches)) => commands::export_library(&library, sub_matches),
        Some(("import", sub_matches)) => commands::import_book(&mut library, sub_matches),
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            let cause = app_error(&e);
            if let Some(err) = cause {
                eprintln!("{}", style(err.user_message()).dim());
            }
            ExitCode::from(exit_status(cause))
        }
    }
}

/// Finds the catalog error behind a CLI failure, if there is one
fn app_error(error: &anyhow::Error) -> Option<&AppError> {
    error
        .downcast_ref::<LibraryError>()
        .and_then(LibraryError::as_app_error)
        .or_else(|| error.downcast_ref::<AppError>())
}

/// 2 for input the user can correct, 1 for everything else
fn exit_status(error: Option<&AppError>) -> u8 {
    match error {
        Some(err) if err.is_user_error() => 2,
        _ => 1,
    }
}

// FILE: crates/cli/src/commands.rs

use anyhow::{bail, Context, Result};
use bookshelf_config::{atomic_file, Config, ConfigManager};
use bookshelf_core::{AppError, Book, BookInput};
use bookshelf_library::{
    export_books, BookImporter, ExportFormat, ImportOptions, Library, SearchField,
};
use clap::ArgMatches;
use console::style;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write a default config file unless one exists
pub fn init_config(manager: &ConfigManager) -> Result<()> {
    let created = manager
        .initialize()
        .context("Failed to write default config")?;

    let path = manager.config_path();
    if created {
        println!(
            "{} Config written to {}",
            style("✓").green().bold(),
            path.display()
        );
    } else {
        println!("Config already exists at {}", path.display());
    }
    Ok(())
}

/// `config show|path|check|set|reset`
pub fn config_command(
    manager: &ConfigManager,
    config: &Config,
    matches: &ArgMatches,
) -> Result<()> {
    let path = manager.config_path();

    match matches.subcommand() {
        Some(("show", _)) => {
            print!("{}", config.to_toml().context("Failed to encode config")?);
        }
        Some(("path", _)) => println!("{}", path.display()),
        Some(("check", _)) => {
            let problems = manager
                .check()
                .with_context(|| format!("Failed to check {}", path.display()))?;
            if !problems.is_empty() {
                for problem in &problems {
                    println!("{} {}", style("✗").red().bold(), problem);
                }
                bail!("{} invalid value(s) in {}", problems.len(), path.display());
            }
            println!("{} {} is valid", style("✓").green().bold(), path.display());
        }
        Some(("set", sub_matches)) => {
            let key = sub_matches
                .get_one::<String>("key")
                .context("Missing key argument")?;
            let value = sub_matches
                .get_one::<String>("value")
                .context("Missing value argument")?;

            manager
                .update(|stored| stored.set(key, value))
                .with_context(|| format!("Failed to set {}", key))?;
            println!("{} {} = {}", style("✓").green().bold(), key, value);
        }
        Some(("reset", sub_matches)) => {
            let existed = path.exists();
            if existed
                && !sub_matches.get_flag("force")
                && !confirm(&format!("Replace {} with defaults?", path.display()))?
            {
                println!("Reset cancelled.");
                return Ok(());
            }

            manager.reset().context("Failed to reset config")?;
            println!("{} Config reset to defaults", style("✓").green().bold());
            if existed {
                println!(
                    "Previous file kept at {}",
                    atomic_file::backup_path(path).display()
                );
            }
        }
        _ => bail!("Unknown config action"),
    }

    Ok(())
}

/// List all books in the library
pub fn list_books(library: &Library) -> Result<()> {
    if library.is_empty() {
        println!("No books in library. Use 'add' or 'import' to catalog a book.");
        return Ok(());
    }

    println!("\n{} Books in Library", style(library.len()).bold().cyan());
    println!("{}", "=".repeat(80));

    for (index, book) in library.books().iter().enumerate() {
        print_book_summary(index, book);
    }

    Ok(())
}

/// Add a new book to the library
pub fn add_book(library: &mut Library, matches: &ArgMatches) -> Result<()> {
    let mut input = BookInput::default();
    apply_field_args(&mut input, matches);
    if let Some(file) = matches.get_one::<String>("file") {
        input.file_path = file.clone();
    }

    let book = input.into_book().map_err(AppError::invalid_book)?;
    if book.has_file() && !Path::new(&book.file_path).exists() {
        log::warn!("Attached file {} does not exist", book.file_path);
    }

    library
        .add(book.clone())
        .context("Failed to add book to library")?;

    println!("{} Book added successfully!", style("✓").green().bold());
    println!("  Index: {}", library.len() - 1);
    println!("  {}", book.display_label());

    Ok(())
}

/// Change fields of an existing book
pub fn edit_book(library: &mut Library, matches: &ArgMatches) -> Result<()> {
    let index = index_arg(matches)?;
    let current = book_at(library, index)?;

    let mut input = BookInput::from_book(current);
    apply_field_args(&mut input, matches);
    if let Some(file) = matches.get_one::<String>("file") {
        input.file_path = file.clone();
    }

    let book = input.into_book().map_err(AppError::invalid_book)?;
    if &book == current {
        println!("Nothing to change.");
        return Ok(());
    }

    let label = book.display_label();
    library.update(index, book).context("Failed to update book")?;

    println!("{} Book updated: {}", style("✓").green().bold(), label);

    Ok(())
}

/// Remove a book from the library
pub fn remove_book(library: &mut Library, matches: &ArgMatches) -> Result<()> {
    let index = index_arg(matches)?;
    let title = book_at(library, index)?.title.clone();

    if !matches.get_flag("force") && !confirm(&format!("Remove '{}' from the library?", title))? {
        println!("Removal cancelled.");
        return Ok(());
    }

    library.remove(index).context("Failed to remove book")?;

    println!("{} Book removed: {}", style("✓").green().bold(), title);

    Ok(())
}

/// Show detailed information about a book
pub fn show_book(library: &Library, matches: &ArgMatches) -> Result<()> {
    let index = index_arg(matches)?;
    let book = book_at(library, index)?;

    println!("\n{}", style("Book Information").bold().cyan());
    println!("{}", "=".repeat(80));
    println!("Index: {}", index);
    println!("Title: {}", style(&book.title).bold());
    println!("Author: {}", book.author);
    println!("Genre: {}", book.genre);
    println!("Published: {}", book.formatted_date());
    println!("Pages: {}", book.pages);
    println!("Rating: {}/5.0", book.rating_label());

    println!("\nFile:");
    if book.has_file() {
        let marker = if Path::new(&book.file_path).exists() {
            style("").green()
        } else {
            style(" (missing)").red()
        };
        println!("  {}{}", book.file_path, marker);
    } else {
        println!("  (none)");
    }

    if !book.description.is_empty() {
        println!("\nDescription:\n{}", book.description);
    }

    Ok(())
}

/// Search for books
pub fn search_books(library: &Library, matches: &ArgMatches) -> Result<()> {
    let query = matches
        .get_one::<String>("query")
        .ok_or_else(|| anyhow::anyhow!("Search query is required"))?;

    let field: SearchField = matches
        .get_one::<String>("by")
        .map(|s| s.parse::<SearchField>())
        .transpose()?
        .unwrap_or_default();

    let results = library.find(field, query);
    if results.is_empty() {
        println!("No books found with {} matching '{}'", field, query);
        return Ok(());
    }

    println!(
        "\n{} Search Results for {} '{}'",
        style(results.len()).bold().cyan(),
        field,
        query
    );
    println!("{}", "=".repeat(80));

    for (index, book) in results {
        print_book_summary(index, book);
    }

    Ok(())
}

/// List the genres in use
pub fn list_genres(library: &Library) -> Result<()> {
    let heading = if library.is_empty() {
        "Suggested Genres"
    } else {
        "Genres"
    };

    println!("\n{}", style(heading).bold().cyan());
    println!("{}", "=".repeat(80));
    for genre in library.distinct_genres() {
        println!("  {}", genre);
    }

    Ok(())
}

/// Show library statistics
pub fn show_stats(library: &Library) -> Result<()> {
    let stats = library.statistics();

    println!("\n{}", style("Library Statistics").bold().cyan());
    println!("{}", "=".repeat(80));
    println!("{}", stats);
    if !stats.is_empty() {
        println!("Average pages: {:.0}", stats.average_pages());
    }

    Ok(())
}

/// Open a book's file with the default application
pub fn open_book(library: &Library, matches: &ArgMatches) -> Result<()> {
    let index = index_arg(matches)?;
    let book = book_at(library, index)?;

    if !book.has_file() {
        return Err(AppError::NoFileAttached {
            title: book.title.clone(),
        }
        .into());
    }

    let path = PathBuf::from(&book.file_path);
    if !path.exists() {
        return Err(AppError::FileNotFound { path }.into());
    }

    open::that_detached(&path).map_err(|e| AppError::OpenFailed {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    println!("Opening {}", style(truncate(&book.title, 60)).bold());

    Ok(())
}

/// Export library data
pub fn export_library(library: &Library, matches: &ArgMatches) -> Result<()> {
    let format: ExportFormat = matches
        .get_one::<String>("format")
        .map(|s| s.parse::<ExportFormat>())
        .transpose()?
        .unwrap_or_default();

    let output = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(format!("library_export.{}", format.extension())));

    let count = export_books(library.books(), &output, format)
        .with_context(|| format!("Failed to export to {}", output.display()))?;

    println!(
        "{} Exported {} books to {}",
        style("✓").green().bold(),
        count,
        output.display()
    );

    Ok(())
}

/// Add a book from an e-book file
pub fn import_book(library: &mut Library, matches: &ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<PathBuf>("path")
        .ok_or_else(|| anyhow::anyhow!("File path is required"))?;

    let options = import_options(matches);
    let book = BookImporter::import_file(library, path, options)
        .with_context(|| format!("Failed to import {}", path.display()))?;

    println!("{} Book imported successfully!", style("✓").green().bold());
    println!("  Index: {}", library.len() - 1);
    println!("  Title: {}", book.title);
    println!("  File: {}", book.file_path);

    Ok(())
}

fn field_value(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

/// Copies the book field flags that were given onto `input`
fn apply_field_args(input: &mut BookInput, matches: &ArgMatches) {
    let fields = [
        ("title", &mut input.title),
        ("author", &mut input.author),
        ("genre", &mut input.genre),
        ("date", &mut input.publication_date),
        ("pages", &mut input.pages),
        ("rating", &mut input.rating),
        ("description", &mut input.description),
    ];
    for (id, slot) in fields {
        if let Some(value) = field_value(matches, id) {
            *slot = value;
        }
    }
}

fn import_options(matches: &ArgMatches) -> ImportOptions {
    ImportOptions {
        title: field_value(matches, "title"),
        author: field_value(matches, "author"),
        genre: field_value(matches, "genre"),
        publication_date: field_value(matches, "date"),
        pages: field_value(matches, "pages"),
        rating: field_value(matches, "rating"),
        description: field_value(matches, "description"),
    }
}

fn index_arg(matches: &ArgMatches) -> Result<usize> {
    matches
        .get_one::<usize>("index")
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Book index is required"))
}

fn book_at(library: &Library, index: usize) -> Result<&Book> {
    library.get(index).ok_or_else(|| {
        AppError::BookNotFound {
            index,
            len: library.len(),
        }
        .into()
    })
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} (y/N) ", prompt);
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .context("Failed to read input")?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn print_book_summary(index: usize, book: &Book) {
    println!(
        "\n{} {}",
        style(format!("[{}]", index)).dim(),
        style(truncate(&book.title, 60)).bold()
    );
    println!("  by {}", book.author);
    println!(
        "  {} | {} | {} pages | rated {}",
        book.genre,
        book.formatted_date(),
        book.pages,
        book.rating_label()
    );
    if book.has_file() {
        println!("  {}", style(truncate(&book.file_path, 76)).dim());
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

//! Main entry point for the punzip CLI application.
//!
//! This binary provides a command-line interface for listing and
//! extracting ZIP files, including password-protected archives.

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use punzip::{ArchiveEntry, Cli, LocalFileReader, ReadAt, ZipExtractor};

/// Application entry point.
///
/// Parses command-line arguments and dispatches to listing or
/// extraction.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let reader = Arc::new(LocalFileReader::new(Path::new(&cli.file))?);
    process_zip(reader, &cli)?;

    Ok(())
}

/// Process a ZIP archive based on CLI options.
///
/// - List mode (`-l` or `-v`): Display archive contents
/// - Extract mode: Extract everything into the target directory
fn process_zip<R: ReadAt>(reader: Arc<R>, cli: &Cli) -> Result<()> {
    let extractor = ZipExtractor::new(reader);

    // List mode: display archive contents and exit
    if cli.list || cli.verbose {
        return list_entries(&extractor, cli.verbose);
    }

    // Extract mode: everything goes under the target directory,
    // preserving the archive's relative structure
    let destination = cli
        .extract_dir
        .as_deref()
        .map_or_else(|| PathBuf::from("."), PathBuf::from);

    let manifest = extractor.extract_all(&destination, cli.password.as_deref())?;

    if !cli.is_quiet() {
        for entry in &manifest {
            println!("  extracting: {}", entry.file_name);
        }
    }

    if !cli.is_very_quiet() {
        let files = manifest.iter().filter(|e| !e.is_directory).count();
        let total: u64 = manifest.iter().map(|e| e.uncompressed_size).sum();
        eprintln!("{} files, {}", files, format_size(total));
    }

    Ok(())
}

/// List entries in the ZIP archive.
///
/// Supports two output formats:
/// - Simple format (`-l`): Just file names, one per line
/// - Verbose format (`-v`): Detailed table with size, compression ratio, and timestamps
fn list_entries<R: ReadAt>(extractor: &ZipExtractor<R>, verbose: bool) -> Result<()> {
    let entries = extractor.list_entries()?;

    if verbose {
        // Print table header for verbose output
        println!(
            "{:>10}  {:>10}  {:>5}  {:>10}  {:>5}  Name",
            "Length", "Size", "Cmpr", "Date", "Time"
        );
        println!("{}", "-".repeat(70));
    }

    // Track totals for summary line
    let mut total_uncompressed = 0u64;
    let mut total_compressed = 0u64;
    let mut file_count = 0usize;

    for entry in &entries {
        if verbose {
            print_verbose_entry(entry);

            // Accumulate totals (excluding directories)
            if !entry.is_directory {
                total_uncompressed += entry.uncompressed_size;
                total_compressed += entry.compressed_size;
                file_count += 1;
            }
        } else {
            // Simple format: just the file name
            println!("{}", entry.file_name);
        }
    }

    // Print summary line in verbose mode
    if verbose {
        println!("{}", "-".repeat(70));
        let total_ratio = if total_uncompressed > 0 {
            format!(
                "{:>4}%",
                100 - (total_compressed * 100 / total_uncompressed)
            )
        } else {
            "  0%".to_string()
        };
        println!(
            "{:>10}  {:>10}  {}  {:>21}  {} files",
            total_uncompressed, total_compressed, total_ratio, "", file_count
        );
    }

    Ok(())
}

/// Print one manifest entry as a verbose table row.
fn print_verbose_entry(entry: &ArchiveEntry) {
    // Parse DOS timestamp into human-readable format
    let (year, month, day) = entry.mod_date();
    let (hour, minute, _second) = entry.mod_time();

    // Calculate compression ratio as percentage saved
    let ratio = if entry.uncompressed_size > 0 {
        format!(
            "{:>4}%",
            100 - (entry.compressed_size * 100 / entry.uncompressed_size)
        )
    } else {
        "  0%".to_string()
    };

    println!(
        "{:>10}  {:>10}  {}  {:04}-{:02}-{:02}  {:02}:{:02}  {}",
        entry.uncompressed_size,
        entry.compressed_size,
        ratio,
        year,
        month,
        day,
        hour,
        minute,
        entry.file_name
    );
}

/// Format a byte size into a human-readable string.
///
/// Automatically selects the appropriate unit (bytes, KB, MB, GB)
/// based on the size magnitude.
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

//! gitfs - browse a git repository's refs and trees as a file system
//!
//! This is the command-line front end to [`gitfs::GitFileProvider`].

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use gitfs::{CommitNaming, EntryInfo, FileProvider, GitFileProvider, ProviderConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

enum Command {
    List,
    Stat,
    Cat,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    // Parse simple command line args.
    let mut root = PathBuf::from(".");
    let mut separator: Option<char> = None;
    let mut naming = CommitNaming::Message;
    let mut json = false;
    let mut verbose = false;
    let mut command: Option<Command> = None;
    let mut path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-r" | "--repo" => {
                i += 1;
                if i < args.len() {
                    root = PathBuf::from(&args[i]);
                }
            }
            "-s" | "--separator" => {
                i += 1;
                let value = args.get(i).map(String::as_str).unwrap_or_default();
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => separator = Some(c),
                    _ => {
                        eprintln!("--separator takes exactly one character");
                        return ExitCode::FAILURE;
                    }
                }
            }
            "--hash-names" => naming = CommitNaming::Hash,
            "--json" => json = true,
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            "--version" => {
                println!("gitfs v{}", env!("CARGO_PKG_VERSION"));
                return ExitCode::SUCCESS;
            }
            arg if command.is_none() && !arg.starts_with('-') => {
                command = match arg {
                    "ls" => Some(Command::List),
                    "stat" => Some(Command::Stat),
                    "cat" => Some(Command::Cat),
                    other => {
                        eprintln!("Unknown command: {}", other);
                        return ExitCode::FAILURE;
                    }
                };
            }
            arg if path.is_none() && !arg.starts_with('-') => path = Some(arg.to_string()),
            arg => {
                eprintln!("Unknown option: {}", arg);
                return ExitCode::FAILURE;
            }
        }
        i += 1;
    }

    init_tracing(verbose);

    let Some(command) = command else {
        print_help();
        return ExitCode::FAILURE;
    };

    let mut config = ProviderConfig::new(root).commit_naming(naming);
    if let Some(separator) = separator {
        config = config.separator(separator);
    }
    let provider = GitFileProvider::with_config(config);
    let path = path.unwrap_or_default();

    let result = match command {
        Command::List => list(&provider, &path, json),
        Command::Stat => stat(&provider, &path, json),
        Command::Cat => cat(&provider, &path),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "gitfs=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_help() {
    println!("gitfs - browse a git repository as a read-only file system");
    println!();
    println!("Usage: gitfs [OPTIONS] <ls|stat|cat> [PATH]");
    println!();
    println!("Options:");
    println!("  -r, --repo PATH        Repository root or .git directory (default: .)");
    println!("  -s, --separator CHAR   Path separator (default: the platform's)");
    println!("  --hash-names           Name commits by id instead of message in listings");
    println!("  --json                 Print entries as JSON");
    println!("  -v, --verbose          Enable debug logging");
    println!("  -h, --help             Show this help message");
    println!("  --version              Show version");
    println!();
    println!("Paths:");
    println!("  head/<path>                   Files at HEAD");
    println!("  branches[/*]                  All branches");
    println!("  branches/<name>/<path>        Files on a branch");
    println!("  tags/<name>/<path>            Files at a tag");
    println!("  commits/<id>/<path>           Files at a commit (ids may be abbreviated)");
    println!();
    println!("Examples:");
    println!("  gitfs ls branches");
    println!("  gitfs -r ~/src/project stat head/Cargo.toml");
    println!("  gitfs cat tags/v1.0/README.md");
}

fn list(provider: &GitFileProvider, path: &str, json: bool) -> Result<bool, Box<dyn std::error::Error>> {
    let contents = provider.list_directory(Some(path));

    if json {
        println!("{}", serde_json::to_string_pretty(&contents)?);
    } else if let Some(reason) = contents.reason() {
        eprintln!("{}", reason);
    } else {
        for entry in &contents {
            print_entry(entry);
        }
    }

    Ok(contents.exists())
}

fn stat(provider: &GitFileProvider, path: &str, json: bool) -> Result<bool, Box<dyn std::error::Error>> {
    let entry = provider.entry_info(Some(path));

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else if entry.exists {
        print_entry(&entry);
        if let Some(physical) = &entry.physical_path {
            println!("path\t{}", physical);
        }
    } else {
        eprintln!("{}", entry.name);
    }

    Ok(entry.exists)
}

fn cat(provider: &GitFileProvider, path: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let mut stream = provider.open_read(path)?;
    let mut stdout = std::io::stdout().lock();
    std::io::copy(&mut stream, &mut stdout)?;
    stdout.flush()?;
    Ok(true)
}

fn print_entry(entry: &EntryInfo) {
    let kind = if entry.is_directory { "dir" } else { "file" };
    let length = if entry.length < 0 {
        "-".to_string()
    } else {
        entry.length.to_string()
    };
    println!("{}\t{}\t{}", kind, length, entry.name.escape_debug());
}

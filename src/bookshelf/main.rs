use bookshelf::commands::{self, CmdResult};
use bookshelf::config::ShelfConfig;
use bookshelf::error::{LibraryError, Result};
use bookshelf::store::fs::JsonFileStore;
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod args;
mod render;
use args::{Cli, Commands};

/// Exit code for anything that is neither a domain nor a storage failure.
const EXIT_UNEXPECTED: i32 = 3;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(cli) {
        Ok(result) => {
            render::print_result(&result);
            if result.success {
                0
            } else {
                1
            }
        }
        Err(Failure::Library(e)) => {
            render::print_error(&e.to_string());
            if e.is_storage_failure() {
                e.kind().exit_code()
            } else {
                EXIT_UNEXPECTED
            }
        }
        Err(Failure::Setup(message)) => {
            render::print_error(&message);
            EXIT_UNEXPECTED
        }
    };

    std::process::exit(code);
}

enum Failure {
    Library(LibraryError),
    Setup(String),
}

impl From<LibraryError> for Failure {
    fn from(e: LibraryError) -> Self {
        Failure::Library(e)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("BOOKSHELF_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

struct AppDirs {
    config: PathBuf,
    data: PathBuf,
}

/// `BOOKSHELF_HOME` pins both directories to one place; otherwise the
/// platform locations are used.
fn app_dirs() -> std::result::Result<AppDirs, Failure> {
    if let Some(home) = std::env::var_os("BOOKSHELF_HOME") {
        let home = PathBuf::from(home);
        return Ok(AppDirs {
            config: home.clone(),
            data: home,
        });
    }

    let dirs = ProjectDirs::from("org", "bookshelf", "bookshelf")
        .ok_or_else(|| Failure::Setup("Could not determine a home directory".to_string()))?;
    Ok(AppDirs {
        config: dirs.config_dir().to_path_buf(),
        data: dirs.data_dir().to_path_buf(),
    })
}

fn run(cli: Cli) -> std::result::Result<CmdResult, Failure> {
    let dirs = app_dirs()?;
    let config = ShelfConfig::load(&dirs.config)?;

    let file = cli.file;
    let open_store = || -> Result<JsonFileStore> {
        let path = config.resolve_storage_file(file.clone(), &dirs.data);
        tracing::debug!("Using library file {}", path.display());
        JsonFileStore::open(path)
    };

    let result = match cli.command.unwrap_or(Commands::List) {
        Commands::Add {
            title,
            author,
            year,
            id,
        } => commands::add::run(&open_store()?, &title, &author, year, id.as_deref()),
        Commands::Delete { id } => commands::delete::run(&open_store()?, &id),
        Commands::List => commands::list::run(&open_store()?),
        Commands::Search { query, field } => {
            let field = field.unwrap_or_else(|| config.default_search_field.clone());
            commands::search::run(&open_store()?, &query, &field)
        }
        Commands::Status { id, status } => commands::status::run(&open_store()?, &id, &status),
        Commands::Config { key, value } => handle_config(config.clone(), &dirs, key, value),
    }?;

    Ok(result)
}

fn handle_config(
    mut config: ShelfConfig,
    dirs: &AppDirs,
    key: Option<String>,
    value: Option<String>,
) -> Result<CmdResult> {
    let storage_file = config
        .storage_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(default)".to_string());

    match (key.as_deref(), value) {
        (None, _) => Ok(CmdResult::success(format!(
            "storage-file = {}\nsearch-field = {}",
            storage_file, config.default_search_field
        ))),
        (Some("storage-file"), None) => {
            Ok(CmdResult::success(format!("storage-file = {}", storage_file)))
        }
        (Some("search-field"), None) => Ok(CmdResult::success(format!(
            "search-field = {}",
            config.default_search_field
        ))),
        (Some("storage-file"), Some(v)) => {
            config.set_storage_file(v);
            config.save(&dirs.config)?;
            Ok(CmdResult::success("Configuration saved"))
        }
        (Some("search-field"), Some(v)) => {
            if let Err(e) = config.set_default_search_field(&v) {
                return Ok(CmdResult::failure(e.to_string()));
            }
            config.save(&dirs.config)?;
            Ok(CmdResult::success("Configuration saved"))
        }
        (Some(other), _) => Ok(CmdResult::failure(format!(
            "Unknown config key: {}",
            other
        ))),
    }
}

use anyhow::{Context, Result};
use eligtrace::archive::FsArchive;
use eligtrace::cli::{self, CliArgs, Command};
use eligtrace::config::Config;
use eligtrace::context::{AppContext, StandardContext};
use eligtrace::model::{Company, IdentifierQuery};
use eligtrace::search;
use eligtrace::selection::Selection;
use simplelog::{
    ColorChoice, CombinedLogger, LevelFilter, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::env;
use std::fs::OpenOptions;
use strum::IntoEnumIterator;

fn init_logging(ctx: &dyn AppContext, config: &Config, verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        config.log_level_filter()
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if config.log_to_file
        && let Some(path) = ctx.get_log_file_path()
    {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {:?}", path))?;
        loggers.push(WriteLogger::new(level, simplelog::Config::default(), file));
    }

    CombinedLogger::init(loggers)?;
    Ok(())
}

fn print_companies(config: &Config) -> Result<()> {
    for company in Company::iter() {
        let selection = Selection::resolve(config, company.name(), None)?;
        if selection.folders.is_empty() {
            println!("{}  ({})", company, selection.base_path.display());
        } else {
            println!(
                "{}  ({})  folders: {}",
                company,
                selection.base_path.display(),
                selection.folders.join(", ")
            );
        }
    }
    Ok(())
}

fn run_identifier(
    config: &Config,
    folder: Option<&str>,
    company: &str,
    query: IdentifierQuery,
) -> Result<()> {
    let selection = Selection::resolve(config, company, folder)?;
    let report = search::search_identifier(&FsArchive, &selection, query)?;
    println!("{}", cli::format_report(&report));
    Ok(())
}

fn main() -> Result<()> {
    let raw: Vec<String> = env::args().collect();
    let binary_name = raw.first().map(String::as_str).unwrap_or("eligtrace");
    let args: CliArgs = cli::parse_args(raw.get(1..).unwrap_or(&[]))?;

    if args.command == Command::Help {
        cli::print_help(binary_name);
        return Ok(());
    }

    let ctx = StandardContext::new(args.root.clone());
    let mut config = Config::load_or_default(&ctx)?;
    if let Some(archive) = &args.archive {
        config.archive_root = archive.to_string_lossy().to_string();
    }
    init_logging(&ctx, &config, args.verbose)?;

    let folder = args.folder.as_deref();
    match args.command {
        Command::Help => cli::print_help(binary_name),
        Command::Init => {
            let path = Config::get_path_string(&ctx)?;
            if ctx.get_config_file_path()?.exists() {
                println!("Config already exists at {}", path);
            } else {
                Config::default().save(&ctx)?;
                println!("Wrote default config to {}", path);
            }
        }
        Command::Companies => print_companies(&config)?,
        Command::TaxId { company, value } => {
            run_identifier(&config, folder, &company, IdentifierQuery::tax_id(&value)?)?
        }
        Command::MemberId { company, value } => {
            run_identifier(&config, folder, &company, IdentifierQuery::member_id(&value)?)?
        }
        Command::MemberName { company, value } => run_identifier(
            &config,
            folder,
            &company,
            IdentifierQuery::member_name(&value)?,
        )?,
        Command::Range {
            company,
            start,
            end,
        } => {
            let selection = Selection::resolve(&config, &company, folder)?;
            let ids = search::search_tax_ids_in_range(&FsArchive, &selection, &start, &end)?;
            if ids.is_empty() {
                println!("No tax IDs found between {} and {}.", start, end);
            } else {
                for id in &ids {
                    println!("{id}");
                }
                log::info!("{} tax IDs", ids.len());
            }
        }
    }

    Ok(())
}

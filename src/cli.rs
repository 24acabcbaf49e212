// File: ./src/cli.rs
//! Command-line parsing, help text and report formatting.
use crate::model::Company;
use crate::search::IdentifierReport;
use crate::timeline;
use anyhow::{Result, anyhow, bail};
use std::path::PathBuf;

pub fn print_help(binary_name: &str) {
    println!(
        "Eligtrace v{} - Find members across archived 834 eligibility files",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] companies", binary_name);
    println!("    {} [OPTIONS] ssn <company> <tax-id>", binary_name);
    println!("    {} [OPTIONS] member-id <company> <id>", binary_name);
    println!("    {} [OPTIONS] member-name <company> <name...>", binary_name);
    println!(
        "    {} [OPTIONS] range <company> <DD-MM-YYYY> <DD-MM-YYYY>",
        binary_name
    );
    println!("    {} [OPTIONS] init", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -a, --archive <path>  Archive root to search (overrides archive_root).");
    println!("    -f, --folder <name>   Only search this folder of the company.");
    println!("    -v, --verbose         Log every file as it is classified.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("COMMANDS:");
    println!("    companies             List the companies and their folders.");
    println!("    ssn                   Files whose subscriber carries this 9-digit tax ID.");
    println!("    member-id             Files whose REF segment carries this member ID.");
    println!("    member-name           Files whose subscriber name is exactly this name.");
    println!("    range                 Tax IDs in files dated between two days (inclusive).");
    println!("    init                  Write a default config file if none exists.");
    println!();
    println!("COMPANIES:");
    println!("    {}", Company::available());
    println!();
    println!("EXAMPLES:");
    println!("    {} ssn SAVRX 123456789", binary_name);
    println!("    {} --folder J84 member-id SAVRX W1234567", binary_name);
    println!("    {} member-name TELADOC DOE JOHN", binary_name);
    println!("    {} range ANTHEM_ABC_MUSGROW 01-01-2024 31-01-2024", binary_name);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Companies,
    Init,
    TaxId { company: String, value: String },
    MemberId { company: String, value: String },
    MemberName { company: String, value: String },
    Range {
        company: String,
        start: String,
        end: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub archive: Option<PathBuf>,
    pub folder: Option<String>,
    pub verbose: bool,
    pub command: Command,
}

fn take_value(args: &[String], i: &mut usize, flag: &str) -> Result<String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| anyhow!("{} requires a value", flag))
}

/// Parses everything after the binary name. Options may appear anywhere.
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut root = None;
    let mut archive = None;
    let mut folder = None;
    let mut verbose = false;
    let mut positional: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" | "help" => {
                return Ok(CliArgs {
                    root,
                    archive,
                    folder,
                    verbose,
                    command: Command::Help,
                });
            }
            "-r" | "--root" => root = Some(PathBuf::from(take_value(args, &mut i, "--root")?)),
            "-a" | "--archive" => {
                archive = Some(PathBuf::from(take_value(args, &mut i, "--archive")?))
            }
            "-f" | "--folder" => folder = Some(take_value(args, &mut i, "--folder")?),
            "-v" | "--verbose" => verbose = true,
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    let command = match positional.as_slice() {
        [] => Command::Help,
        [cmd] if cmd == "companies" => Command::Companies,
        [cmd] if cmd == "init" => Command::Init,
        [cmd, company, value] if cmd == "ssn" => Command::TaxId {
            company: company.clone(),
            value: value.clone(),
        },
        [cmd, company, value] if cmd == "member-id" => Command::MemberId {
            company: company.clone(),
            value: value.clone(),
        },
        [cmd, company, name @ ..] if cmd == "member-name" && !name.is_empty() => {
            Command::MemberName {
                company: company.clone(),
                value: name.join(" "),
            }
        }
        [cmd, company, start, end] if cmd == "range" => Command::Range {
            company: company.clone(),
            start: start.clone(),
            end: end.clone(),
        },
        [cmd, ..] => bail!("Invalid arguments for '{}'. See --help.", cmd),
    };

    Ok(CliArgs {
        root,
        archive,
        folder,
        verbose,
        command,
    })
}

/// Plain-text rendering of an identifier report.
pub fn format_report(report: &IdentifierReport) -> String {
    let mut out = Vec::new();
    if !report.is_found() {
        out.push(format!("{} not found.", report.query));
    } else {
        out.push(format!("{} found in {} file(s):", report.query, report.present.len()));
        for record in &report.present {
            out.push(format!("  {}  {}", record.date_label(), record.filename));
        }
        if let (Some(from), Some(to)) = (report.from, report.to) {
            out.push(format!("From: {from}"));
            out.push(format!("To:   {to}"));
        }
    }

    out.push(String::new());
    out.push(format!("Absent from {} file(s):", report.absent.len()));
    for record in &report.absent {
        out.push(format!("  {}  {}", record.date_label(), record.filename));
    }

    out.push(String::new());
    out.push("Timeline:".to_string());
    for line in timeline::render(&report.timeline) {
        out.push(format!("  {line}"));
    }
    out.join("\n")
}

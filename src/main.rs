use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use lineage::access::SimpleAccess;
use lineage::config::{OutputFormat, Settings};
use lineage::error::{LineageError, Result};
use lineage::import::load_file;
use lineage::render::{Document, render_json_string, render_text};
use lineage::report::{ReportContext, find_report, registered_reports};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Line {
    Father,
    Mother,
}

impl Line {
    fn report_name(self) -> &'static str {
        match self {
            Line::Father => "father_lineage",
            Line::Mother => "mother_lineage",
        }
    }
}

/// Print the father or mother lineage of a person in a family tree.
#[derive(Parser, Debug)]
#[command(name = "lineage", version)]
struct Cli {
    /// Family tree in JSON
    #[arg(short, long, required_unless_present = "list_reports")]
    tree: Option<PathBuf>,
    /// Gramps id of the starting person, e.g. I0001
    #[arg(short, long, required_unless_present = "list_reports")]
    person: Option<String>,
    #[arg(short, long, value_enum, default_value = "father")]
    line: Line,
    /// Overrides the output format of the settings
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
    /// Settings file, defaults to lineage.{toml,json,yaml,...} when present
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// List the available reports and exit
    #[arg(long)]
    list_reports: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // keep stdout for the report itself
    let filter = EnvFilter::try_from_env("LINEAGE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(&cli, &settings) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "lineage report failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, settings: &Settings) -> Result<String> {
    if cli.list_reports {
        let mut out = String::new();
        for report in registered_reports() {
            out.push_str(&format!(
                "{:<16}{:<16}{:<8}{}\n",
                report.name, report.translated_name, report.status, report.description
            ));
        }
        return Ok(out);
    }

    let (Some(tree), Some(person_id)) = (&cli.tree, &cli.person) else {
        return Err(LineageError::InvalidArgument(String::from("--tree and --person are required")));
    };
    let database = load_file(tree)?;
    let person = database
        .person_by_id(person_id)
        .ok_or_else(|| LineageError::InvalidArgument(format!("no person with id {person_id}")))?;

    let report = find_report(cli.line.report_name())
        .ok_or_else(|| LineageError::InvalidArgument(format!("unknown report {}", cli.line.report_name())))?;
    let display = SimpleAccess::new(settings.display());
    let context = ReportContext::new(&database, &display).with_indent(&settings.indent_marker);
    let mut document = Document::new();
    (report.run)(&context, &mut document, Some(person.as_ref()))?;

    match cli.format.unwrap_or(settings.output) {
        OutputFormat::Text => Ok(render_text(&document)),
        OutputFormat::Json => Ok(render_json_string(&document)? + "\n"),
    }
}

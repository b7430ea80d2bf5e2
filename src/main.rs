// metagen: marker-driven print/serialize code generation for C++ headers

use std::path::PathBuf;

use clap::Parser;
use crossterm::style::Stylize;
use log::LevelFilter;

use metagen::config::{DEFAULT_ARTIFACT_SUFFIX, DEFAULT_OUTPUT_DIR, DEFAULT_REFLECTION_HEADER};
use metagen::run::{FileReport, Runner};
use metagen::ScanConfig;

#[derive(Debug, Parser)]
#[command(
    name = "metagen",
    version,
    about = "Generate print/serialize scaffolding for marked C++ members"
)]
struct Cli {
    /// Header files to scan
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory generated artifacts are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    out_dir: PathBuf,

    /// Suffix appended to each input's stem to name its artifact
    #[arg(long, default_value = DEFAULT_ARTIFACT_SUFFIX)]
    suffix: String,

    /// Header every input must include to enable reflection
    #[arg(long, default_value = DEFAULT_REFLECTION_HEADER)]
    header: String,

    /// Skip the master header that includes every artifact
    #[arg(long)]
    no_master: bool,

    /// Print every extracted record to stdout
    #[arg(long)]
    dump: bool,

    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn config(&self) -> ScanConfig {
        ScanConfig::default()
            .with_output_dir(&self.out_dir)
            .with_artifact_suffix(&self.suffix)
            .with_reflection_header(&self.header)
            .with_master(!self.no_master)
    }
}

fn report(report: &FileReport, dump: bool) {
    match &report.outcome {
        Ok(output) => {
            if dump {
                for record in &output.records {
                    println!("{}", record);
                }
            }
        }
        Err(err) => {
            let name = report
                .input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            eprintln!(
                "{} {} ({}): {}",
                "error:".red().bold(),
                name,
                report.input.display(),
                err
            );
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.level())
        .parse_default_env()
        .init();

    let runner = match Runner::new(cli.config()) {
        Ok(runner) => runner,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            std::process::exit(err.status());
        }
    };

    let summary = runner.run_with(&cli.files, |file| report(file, cli.dump));
    std::process::exit(summary.exit_status());
}

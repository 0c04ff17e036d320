use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use lowpay::constants::DEFAULT_PREVIEW_ROWS;
use lowpay::input::load_rows;
use lowpay::report::{preview, render_table, to_records, write_json, ResultRecord};
use lowpay::scorer::score_exhaustive;
use lowpay::search::{run_search, ConsoleProgress, NoProgress, ProgressObserver, SearchMode};
use lowpay::tickets::{normalize_rows, parse_ticket_digits};
use lowpay::types::Combination;

const USAGE: &str = "Usage: lowest-payout --input FILE [--parallel] [--threads N] [--output FILE.json] [--preview N] [--check D,D,D,D,D] [--quiet]";

struct Args {
    input: PathBuf,
    mode: SearchMode,
    threads: Option<usize>,
    output: Option<PathBuf>,
    preview_rows: usize,
    check: Option<String>,
    quiet: bool,
}

fn flag_value(args: &[String], i: usize) -> Result<&str> {
    args.get(i + 1)
        .map(String::as_str)
        .with_context(|| format!("{} requires a value\n{}", args[i], USAGE))
}

fn parse_args() -> Result<Args> {
    let args: Vec<String> = std::env::args().collect();
    let mut input: Option<PathBuf> = None;
    let mut mode = SearchMode::Sequential;
    let mut threads: Option<usize> = None;
    let mut output: Option<PathBuf> = None;
    let mut preview_rows = DEFAULT_PREVIEW_ROWS;
    let mut check: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" | "-i" => {
                input = Some(PathBuf::from(flag_value(&args, i)?));
                i += 1;
            }
            "--parallel" => mode = SearchMode::Parallel,
            "--threads" => {
                let v = flag_value(&args, i)?;
                threads = Some(
                    v.parse()
                        .with_context(|| format!("Invalid --threads value: {}", v))?,
                );
                mode = SearchMode::Parallel;
                i += 1;
            }
            "--output" | "-o" => {
                output = Some(PathBuf::from(flag_value(&args, i)?));
                i += 1;
            }
            "--preview" => {
                let v = flag_value(&args, i)?;
                preview_rows = v
                    .parse()
                    .with_context(|| format!("Invalid --preview value: {}", v))?;
                i += 1;
            }
            "--check" => {
                check = Some(flag_value(&args, i)?.to_string());
                i += 1;
            }
            "--quiet" | "-q" => quiet = true,
            "--help" | "-h" => {
                println!("{}", USAGE);
                println!();
                println!("Options:");
                println!("  --input FILE       Ticket rows (.json, .tsv or .txt)");
                println!("  --parallel         Score blocks of combinations on the rayon pool");
                println!("  --threads N        Rayon pool size (implies --parallel)");
                println!("  --output FILE      Also write the results as JSON");
                println!(
                    "  --preview N        Rows shown in the data preview (default: {})",
                    DEFAULT_PREVIEW_ROWS
                );
                println!("  --check D,D,D,D,D  Print the payout breakdown of one combination and exit");
                println!("  --quiet            No progress line");
                std::process::exit(0);
            }
            other => bail!("Unknown argument: {}\n{}", other, USAGE),
        }
        i += 1;
    }

    let input = input.with_context(|| format!("--input is required\n{}", USAGE))?;
    Ok(Args {
        input,
        mode,
        threads,
        output,
        preview_rows,
        check,
        quiet,
    })
}

fn main() -> Result<()> {
    lowpay::env_config::init_tracing("info");
    let args = parse_args()?;

    let rows = load_rows(&args.input)
        .with_context(|| format!("loading tickets from {}", args.input.display()))?;
    let normalized = normalize_rows(&rows);

    let p = preview(&rows, &normalized, args.preview_rows);
    println!("Data preview:");
    for row in &p.rows {
        println!("  {:<12} {}", row.ticket, row.category);
    }
    println!("Total tickets: {}", p.total_tickets);
    if p.dropped_missing > 0 {
        println!("Dropped (missing ticket or category): {}", p.dropped_missing);
    }
    if p.unrecognized > 0 {
        println!("Unrecognized category (never pays): {}", p.unrecognized);
    }
    for s in &p.skipped {
        eprintln!("  WARNING: row {} skipped ('{}'): {}", s.row, s.ticket, s.error);
    }
    println!();

    if let Some(ref combo_text) = args.check {
        let digits = parse_ticket_digits(combo_text)
            .with_context(|| format!("invalid --check combination '{}'", combo_text))?;
        let result = score_exhaustive(&Combination::new(digits), &normalized.tickets);
        print!("{}", render_table(&[ResultRecord::from(&result)]));
        return Ok(());
    }

    if args.mode == SearchMode::Parallel {
        lowpay::env_config::init_rayon_threads(args.threads);
    }

    let mut console = ConsoleProgress::new();
    let mut silent = NoProgress;
    let observer: &mut dyn ProgressObserver = if args.quiet {
        &mut silent
    } else {
        &mut console
    };
    let outcome = run_search(&normalized.tickets, args.mode, observer);

    let records = to_records(&outcome.results);
    println!("Top {} lowest payout combinations:", records.len());
    print!("{}", render_table(&records));

    if let Some(ref path) = args.output {
        write_json(path, &records)
            .with_context(|| format!("writing results to {}", path.display()))?;
        println!("\nResults written to {}", path.display());
    }

    Ok(())
}

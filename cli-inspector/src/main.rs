use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use mt940_parser::{Field, Statement};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cli_inspector",
    version,
    about = "Разбирает выписку MT940 и печатает поля каждой выписки.",
    long_about = None,
)]
struct Args {
    /// Входной файл (по умолчанию stdin)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Формат вывода
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Дополнительно разбирать подполя :86: и старый формат :25:
    #[arg(long)]
    details: bool,

    /// Подробность логов (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Поддерживаемые форматы вывода
#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let text = read_input(args.input.as_ref())?;
    let statements = mt940_parser::parse(&text).context("failed to parse MT940 input")?;
    info!(statements = statements.len(), "parsed mt940 input");

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match args.format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut handle, &statements)
                .context("failed to write JSON")?;
            writeln!(handle)?;
        }
        Format::Text => {
            for (idx, statement) in statements.iter().enumerate() {
                write_statement(&mut handle, idx, statement, args.details)?;
            }
        }
    }

    Ok(())
}

fn write_statement<W: Write>(
    out: &mut W,
    idx: usize,
    statement: &Statement,
    details: bool,
) -> Result<()> {
    writeln!(out, "== statement {idx} ({} fields)", statement.fields().len())?;

    for field in statement.fields() {
        let modifier = field.modifier().map(String::from).unwrap_or_default();
        write!(out, ":{}{}: {:<30} ", field.tag(), modifier, field.name())?;

        match field {
            Field::Job(r) | Field::Reference(r) => writeln!(out, "{}", r.reference)?,
            Field::AccountIdentification(acc) => {
                writeln!(out, "{}", acc.account())?;
                if details {
                    #[allow(deprecated)]
                    let legacy = acc.legacy_view();
                    match legacy {
                        Ok(legacy) => writeln!(out, "    legacy: {legacy:?}")?,
                        Err(e) => writeln!(out, "    legacy: {e}")?,
                    }
                }
            }
            Field::StatementNumber(n) => writeln!(
                out,
                "{}/{}",
                n.statement_number,
                n.sequence_number.as_deref().unwrap_or("-")
            )?,
            Field::OpeningBalance(b)
            | Field::ClosingBalance(b)
            | Field::ValutaBalance(b)
            | Field::FutureValutaBalance(b) => {
                let date = b.date.map(|d| d.to_string()).unwrap_or_default();
                writeln!(out, "{:<10} {} {:>15}", date, b.currency, b.signed_amount())?
            }
            Field::StatementLine(line) => writeln!(
                out,
                "{} {:<12} {:>15} {} {} {}",
                line.value_date,
                line.funds_code,
                line.amount,
                line.swift_code,
                line.reference,
                line.transaction_description.as_deref().unwrap_or("")
            )?,
            Field::InformationToAccountOwner(narrative) => {
                writeln!(out, "{}", narrative.lines().join(" | "))?;
                if details {
                    match narrative.details() {
                        Ok(d) => writeln!(out, "    details: {d:?}")?,
                        Err(e) => writeln!(out, "    details: {e}")?,
                    }
                }
            }
        }
    }

    Ok(())
}

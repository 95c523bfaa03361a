// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use std::env;
use tracing::info;

// Use library instead of local modules
use split_smart::{
    init_logging, load_settings, BillState, Currency, ParticipantSet, Settings, SplitSummary,
};

fn main() -> Result<()> {
    init_logging("warn");

    let args: Vec<String> = env::args().collect();
    let settings = load_settings()?;

    match args.get(1).map(String::as_str) {
        Some("calc") => run_calc(&args[2..], &settings)?,
        Some("help") | Some("--help") | Some("-h") => print_usage(),
        None | Some("ui") => run_ui_mode(&settings)?,
        Some(other) => {
            print_usage();
            bail!("Unknown command: {}", other);
        }
    }

    Ok(())
}

fn print_usage() {
    println!("SplitSmart {}", split_smart::VERSION);
    println!();
    println!("USAGE:");
    println!("  split-smart [ui]                      Interactive calculator");
    println!("  split-smart calc [OPTIONS]            One-shot calculation");
    println!();
    println!("CALC OPTIONS:");
    println!("  --bill <amount>        Total bill before tip");
    println!("  --tip <percent>        Tip percentage");
    println!("  --currency <code>      USD, EUR, GBP, JPY or CAD");
    println!("  --shares <a,b,...>     Share weight per person");
    println!("  --names <a,b,...>      Names per person (optional)");
    println!("  --people <n>           Even split among n people (instead of --shares)");
    println!("  --exempt <index>       0-based index of the person who pays nothing");
    println!("  --json                 Print the summary as JSON");
}

// ============================================================================
// ONE-SHOT CALCULATION
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct CalcArgs {
    bill: BillState,
    participants: ParticipantSet,
    exempt: Option<usize>,
    json: bool,
}

fn parse_calc_args(args: &[String], settings: &Settings) -> Result<CalcArgs> {
    let mut bill = BillState::new(settings.default_bill, settings.default_tip, settings.default_currency);
    let mut shares: Option<Vec<f64>> = None;
    let mut names: Vec<String> = Vec::new();
    let mut people: Option<usize> = None;
    let mut exempt = None;
    let mut json = false;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        if flag == "--json" {
            json = true;
            continue;
        }

        let value = iter
            .next()
            .with_context(|| format!("Missing value for {}", flag))?;

        match flag.as_str() {
            "--bill" => bill.total_bill = split_smart::input::coerce_bill(value),
            "--tip" => bill.tip_percentage = split_smart::input::coerce_tip(value),
            "--currency" => bill.currency = value.parse::<Currency>()?,
            "--shares" => {
                shares = Some(value.split(',').map(split_smart::input::coerce_share).collect());
            }
            "--names" => names = value.split(',').map(|n| n.trim().to_string()).collect(),
            "--people" => {
                people = Some(
                    value
                        .trim()
                        .parse::<usize>()
                        .with_context(|| format!("--people expects a whole number, got {}", value))?,
                );
            }
            "--exempt" => {
                exempt = Some(
                    value
                        .trim()
                        .parse::<usize>()
                        .with_context(|| format!("--exempt expects an index, got {}", value))?,
                );
            }
            other => bail!("Unknown option: {}", other),
        }
    }

    if let Some(count) = people {
        settings.check_people(count).context("--people")?;
    }

    let participants = match (shares, people) {
        (Some(shares), _) => ParticipantSet::from_shares(&shares, &names),
        (None, Some(count)) => {
            let base = ParticipantSet::with_defaults(count);
            ParticipantSet::from_shares(&base.shares(), &names)
        }
        (None, None) => {
            let base = ParticipantSet::with_defaults(settings.initial_people);
            ParticipantSet::from_shares(&base.shares(), &names)
        }
    };

    settings
        .check_people(participants.len())
        .context("--shares must list one share per person")?;

    if let Some(index) = exempt {
        if index >= participants.len() {
            bail!("--exempt {} is out of range for {} people", index, participants.len());
        }
    }

    Ok(CalcArgs {
        bill,
        participants,
        exempt,
        json,
    })
}

fn run_calc(args: &[String], settings: &Settings) -> Result<()> {
    let calc = parse_calc_args(args, settings)?;
    info!(people = calc.participants.len(), exempt = ?calc.exempt, "calculating split");

    let summary = SplitSummary::build(&calc.bill, &calc.participants, calc.exempt);

    if calc.json {
        println!("{}", serde_json::to_string_pretty(&summary).context("Failed to encode summary")?);
        return Ok(());
    }

    println!("🧾 SplitSmart - Split Summary");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for line in summary.render_text() {
        println!("{}", line);
    }

    if summary.lines.iter().any(|l| l.amount.is_undefined()) {
        eprintln!("\n⚠️  Shares of the paying participants add up to 0; amounts are undefined.");
    }

    Ok(())
}

// ============================================================================
// INTERACTIVE MODE
// ============================================================================

#[cfg(feature = "tui")]
fn run_ui_mode(settings: &Settings) -> Result<()> {
    let mut app = ui::App::new(settings);
    ui::run_ui(&mut app)?;

    println!("\n✅ SplitSmart closed");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_settings: &Settings) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use one-shot mode: split-smart calc --bill 100 --tip 15 --people 2");
    std::process::exit(1);
}

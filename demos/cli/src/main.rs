use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use log::info;
use savings_core::{CaseStatus, ReportConfig, SavingsReport};
use savings_report::{build_report, cases_from_str, parse_timestamp, CaseFilter};

#[derive(Parser, Debug)]
#[command(
    name = "savings-cli",
    about = "Build a cost-savings report from a JSON export of cases."
)]
struct Args {
    /// Path to the JSON array of case rows.
    #[arg(short, long)]
    input: PathBuf,

    /// JSON file with report limits and labels.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep cases created on or after this date (RFC 3339 or YYYY-MM-DD).
    #[arg(long)]
    from: Option<String>,

    /// Keep cases created on or before this date.
    #[arg(long)]
    to: Option<String>,

    /// Keep cases with this status.
    #[arg(long)]
    status: Option<String>,

    #[arg(long)]
    doctor_id: Option<String>,

    #[arg(long)]
    specialty: Option<String>,

    /// Print the whole report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read config {path:?}"))?;
            serde_json::from_str::<ReportConfig>(&raw)
                .with_context(|| format!("Invalid config {path:?}"))?
        }
        None => ReportConfig::default(),
    };

    let filter = build_filter(&args)?;

    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Could not read file {:?}", args.input))?;
    let cases = cases_from_str(&data)?;
    let total = cases.len();
    let cases = filter.apply(cases);
    info!("Kept {} of {total} cases after filtering", cases.len());

    let report = build_report(&cases, &config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn build_filter(args: &Args) -> anyhow::Result<CaseFilter> {
    let status = match args.status.as_deref() {
        Some(raw) => match CaseStatus::from_wire(raw) {
            CaseStatus::Unknown => bail!("Unknown status {raw:?}"),
            status => Some(status),
        },
        None => None,
    };

    Ok(CaseFilter {
        start_date: parse_bound(args.from.as_deref())?,
        end_date: parse_bound(args.to.as_deref())?,
        specialty: args.specialty.clone(),
        doctor_id: args.doctor_id.clone(),
        status,
    })
}

fn parse_bound(raw: Option<&str>) -> anyhow::Result<Option<chrono::DateTime<chrono::Utc>>> {
    match raw {
        Some(text) => parse_timestamp(text)
            .map(Some)
            .with_context(|| format!("Invalid date {text:?}")),
        None => Ok(None),
    }
}

fn print_summary(report: &SavingsReport) {
    if report.is_empty() {
        println!("No cases matched.");
        return;
    }

    let kpis = &report.kpis;
    println!(
        "Cases: {}\nTotal savings: {:.2}\nAverage savings: {:.1}%\nROI: {:.1}%",
        kpis.total_cases, kpis.total_savings, kpis.avg_savings_percentage, kpis.roi
    );
    println!("Months covered: {}", report.monthly_savings.len());
    println!(
        "Average days to intervention: {:.0}",
        report.avg_days_to_intervention
    );

    if let Some(top) = report.top_medications.first() {
        println!("Top medication: {} ({:.2})", top.name, top.savings);
    }
    if let Some(best) = report.yearly_trends.best_row() {
        println!("Best year: {} ({:.2})", best.year, best.total_savings);
    }
}

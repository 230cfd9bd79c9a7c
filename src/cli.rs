//! Non-interactive command runner behind the `kakeibo_cli` binary.

use std::{fs, io, io::Write, path::PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    core::{
        format::{format_amount, format_date, format_percentage},
        services::{
            Advice, ExportFormat, ExportService, StatisticsPeriod, SummaryService,
            TransactionService,
        },
        validate_transaction, LedgerManager,
    },
    domain::{Displayable, TransactionDraft, TransactionKind, TransactionPatch},
    errors::LedgerError,
    storage::JsonFileStore,
};

pub const USAGE: &str = "\
Usage: kakeibo_cli <command>

Commands:
  dashboard                         Current month totals and recent activity
  monthly                           Income, expense and balance per month
  categories <income|expense>       Per-category breakdown for all transactions
  statistics [6m|12m|3y|all]        Period summary with savings advice (default 6m)
  add <date> <income|expense> <amount> <category> [description...]
  export <json|csv>                 Print the ledger in the given format
  import <path>                     Replace the ledger with a JSON export
  validate                          Report invalid or dangling transactions";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Runs a single command using the default configuration location.
pub fn run_cli<I>(args: I, out: &mut dyn Write) -> Result<(), CliError>
where
    I: IntoIterator<Item = String>,
{
    let config = ConfigManager::from_default_location().load()?;
    run_with_config(&config, args, out)
}

pub fn run_with_config<I>(config: &Config, args: I, out: &mut dyn Write) -> Result<(), CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let command = args
        .next()
        .ok_or_else(|| CliError::Usage("missing command".into()))?;
    let rest: Vec<String> = args.collect();

    let store = JsonFileStore::new(config.resolve_data_file());
    let mut manager = LedgerManager::open(Box::new(store))?;
    let money = |amount: f64| format_amount(amount, &config.currency_symbol);

    match command.as_str() {
        "dashboard" => {
            let data = SummaryService::dashboard(manager.current(), manager.clock());
            writeln!(out, "Income:  {}", money(data.current_month_income))?;
            writeln!(out, "Expense: {}", money(data.current_month_expense))?;
            writeln!(out, "Balance: {}", money(data.current_month_balance))?;
            writeln!(out, "Recent:")?;
            for txn in &data.recent_transactions {
                let category = manager
                    .current()
                    .category_name(&txn.category)
                    .unwrap_or(crate::domain::category::UNKNOWN_CATEGORY_NAME);
                writeln!(
                    out,
                    "  {} {} {} {} {}",
                    format_date(txn.date, &config.date_format),
                    txn.kind,
                    money(txn.amount),
                    category,
                    txn.description
                )?;
            }
        }
        "monthly" => {
            for stats in SummaryService::monthly_stats(&manager.current().transactions) {
                writeln!(
                    out,
                    "{} income {} expense {} balance {}",
                    stats.month,
                    money(stats.income),
                    money(stats.expense),
                    money(stats.balance)
                )?;
            }
        }
        "categories" => {
            let kind = parse_kind(rest.first())?;
            let ledger = manager.current();
            for category in ledger.categories_of(kind) {
                writeln!(out, "# {}", category.display_label())?;
            }
            for stats in SummaryService::category_stats(&ledger.transactions, &ledger.categories, kind)
            {
                writeln!(
                    out,
                    "{} {} {}",
                    stats.category_name,
                    money(stats.amount),
                    format_percentage(stats.percentage)
                )?;
            }
        }
        "statistics" => {
            let period = parse_period(rest.first())?;
            let report = SummaryService::statistics(manager.current(), period, None, manager.clock());
            let summary = &report.summary;
            writeln!(out, "Income:  {}", money(summary.total_income))?;
            writeln!(out, "Expense: {}", money(summary.total_expense))?;
            writeln!(out, "Balance: {}", money(summary.balance))?;
            writeln!(out, "Savings rate: {}", format_percentage(summary.savings_rate))?;
            writeln!(out, "Daily expense: {}", money(report.daily_averages.expense))?;
            for hint in SummaryService::advice(&report) {
                writeln!(out, "Advice: {}", describe_advice(&hint))?;
            }
        }
        "add" => {
            let draft = parse_draft(&rest)?;
            let errors = validate_transaction(&TransactionPatch::from(&draft));
            if !errors.is_empty() {
                return Err(CliError::Usage(errors.join("; ")));
            }
            let ledger = manager.apply(|ledger| TransactionService::add(ledger, draft))?;
            if let Some(txn) = ledger.transactions.first() {
                writeln!(out, "Added transaction {}", txn.id)?;
            }
        }
        "export" => {
            let format: ExportFormat = rest
                .first()
                .ok_or_else(|| CliError::Usage("export needs a format".into()))?
                .parse()?;
            let text = match format {
                ExportFormat::Json => ExportService::export_json(manager.current())?,
                ExportFormat::Csv => ExportService::export_csv_with_labels(
                    manager.current(),
                    &config.csv_locale.labels(),
                ),
            };
            writeln!(out, "{text}")?;
        }
        "import" => {
            let path = rest
                .first()
                .map(PathBuf::from)
                .ok_or_else(|| CliError::Usage("import needs a file path".into()))?;
            let ledger = ExportService::import(&fs::read_to_string(&path)?)?;
            let count = ledger.transactions.len();
            manager.replace(ledger)?;
            writeln!(out, "Imported {count} transactions from {}", path.display())?;
        }
        "validate" => {
            let ledger = manager.current();
            let mut problems = 0usize;
            for txn in &ledger.transactions {
                let candidate = TransactionPatch {
                    date: Some(txn.date),
                    kind: Some(txn.kind),
                    amount: Some(txn.amount),
                    category: Some(txn.category.clone()),
                    description: Some(txn.description.clone()),
                };
                for message in validate_transaction(&candidate) {
                    problems += 1;
                    writeln!(out, "{}: {}", txn.display_label(), message)?;
                }
            }
            for txn in ledger.dangling_transactions() {
                problems += 1;
                writeln!(out, "{}: unknown category `{}`", txn.display_label(), txn.category)?;
            }
            writeln!(out, "{problems} problem(s) found")?;
        }
        other => return Err(CliError::Usage(format!("unknown command `{other}`"))),
    }
    Ok(())
}

fn parse_kind(value: Option<&String>) -> Result<TransactionKind, CliError> {
    value
        .and_then(|raw| TransactionKind::parse(raw))
        .ok_or_else(|| CliError::Usage("expected `income` or `expense`".into()))
}

fn parse_period(value: Option<&String>) -> Result<StatisticsPeriod, CliError> {
    match value.map(String::as_str) {
        None | Some("6m") => Ok(StatisticsPeriod::LastSixMonths),
        Some("12m") => Ok(StatisticsPeriod::LastTwelveMonths),
        Some("3y") => Ok(StatisticsPeriod::LastThreeYears),
        Some("all") => Ok(StatisticsPeriod::All),
        Some(other) => Err(CliError::Usage(format!("unknown period `{other}`"))),
    }
}

fn describe_advice(advice: &Advice) -> String {
    match advice {
        Advice::ExcellentSavings => "excellent savings rate, keep it up".into(),
        Advice::LowSavings => "savings rate is low, review your spending".into(),
        Advice::Overspending => "expenses exceed income".into(),
        Advice::DominantCategory {
            category_name,
            percentage,
        } => format!(
            "{category_name} takes {} of spending",
            format_percentage(*percentage)
        ),
    }
}

fn parse_draft(args: &[String]) -> Result<TransactionDraft, CliError> {
    if args.len() < 4 {
        return Err(CliError::Usage(
            "add needs <date> <income|expense> <amount> <category>".into(),
        ));
    }
    let date = NaiveDate::parse_from_str(&args[0], "%Y-%m-%d")
        .map_err(|_| CliError::Usage(format!("invalid date `{}`", args[0])))?;
    let kind = parse_kind(args.get(1))?;
    let amount: f64 = args[2]
        .parse()
        .map_err(|_| CliError::Usage(format!("invalid amount `{}`", args[2])))?;
    Ok(TransactionDraft::new(date, kind, amount, args[3].clone()).with_description(args[4..].join(" ")))
}

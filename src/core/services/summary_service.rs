//! Read-only statistics derived from ledger snapshots.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::services::query_service::TransactionFilters;
use crate::core::time::Clock;
use crate::domain::category::{FALLBACK_CATEGORY_COLOR, UNKNOWN_CATEGORY_NAME};
use crate::domain::{Category, DateWindow, Ledger, Transaction, TransactionKind};

const RECENT_TRANSACTION_LIMIT: usize = 5;
const EXCELLENT_SAVINGS_RATE: f64 = 20.0;
const LOW_SAVINGS_RATE: f64 = 10.0;
const DOMINANT_CATEGORY_SHARE: f64 = 40.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyStats {
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category_id: String,
    pub category_name: String,
    pub amount: f64,
    pub percentage: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub current_month_income: f64,
    pub current_month_expense: f64,
    pub current_month_balance: f64,
    pub recent_transactions: Vec<Transaction>,
    pub monthly_stats: Vec<MonthlyStats>,
    pub category_stats: Vec<CategoryStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    /// Share of income kept, in percent. Zero when there is no income.
    pub savings_rate: f64,
    pub transaction_count: usize,
}

/// Totals divided by the number of distinct transaction dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct DailyAverages {
    pub income: f64,
    pub expense: f64,
}

/// Reporting windows offered by the statistics view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatisticsPeriod {
    /// From the first day of the month six months back, through today.
    LastSixMonths,
    /// From the first day of the month twelve months back, through today.
    LastTwelveMonths,
    /// From 1 January three years back, through today.
    LastThreeYears,
    Custom { from: NaiveDate, to: NaiveDate },
    All,
}

impl StatisticsPeriod {
    /// Resolves the period to a date window relative to `today`. `All` is unbounded.
    pub fn window(&self, today: NaiveDate) -> Option<DateWindow> {
        match self {
            StatisticsPeriod::LastSixMonths => Some(DateWindow::new(months_back(today, 6), today)),
            StatisticsPeriod::LastTwelveMonths => {
                Some(DateWindow::new(months_back(today, 12), today))
            }
            StatisticsPeriod::LastThreeYears => {
                let start = NaiveDate::from_ymd_opt(today.year() - 3, 1, 1).unwrap_or(today);
                Some(DateWindow::new(start, today))
            }
            StatisticsPeriod::Custom { from, to } => Some(DateWindow::new(*from, *to)),
            StatisticsPeriod::All => None,
        }
    }
}

fn months_back(today: NaiveDate, months: u32) -> NaiveDate {
    let first = today.with_day(1).unwrap_or(today);
    first.checked_sub_months(Months::new(months)).unwrap_or(first)
}

/// Everything the statistics view shows for one period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    pub window: Option<DateWindow>,
    pub monthly_stats: Vec<MonthlyStats>,
    pub income_stats: Vec<CategoryStats>,
    pub expense_stats: Vec<CategoryStats>,
    pub summary: PeriodSummary,
    pub daily_averages: DailyAverages,
}

/// Hint shown next to the statistics of a period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Advice {
    /// Savings rate above 20%.
    ExcellentSavings,
    /// Savings rate of at least 0% but below 10%.
    LowSavings,
    /// Expenses exceed income.
    Overspending,
    /// The largest expense category takes more than 40% of spending.
    #[serde(rename_all = "camelCase")]
    DominantCategory {
        category_name: String,
        percentage: f64,
    },
}

pub struct SummaryService;

impl SummaryService {
    /// Income, expense and balance per `YYYY-MM`, ascending by month.
    pub fn monthly_stats(transactions: &[Transaction]) -> Vec<MonthlyStats> {
        let mut buckets: BTreeMap<String, (f64, f64)> = BTreeMap::new();
        for txn in transactions {
            let entry = buckets.entry(txn.month_key()).or_insert((0.0, 0.0));
            match txn.kind {
                TransactionKind::Income => entry.0 += txn.amount,
                TransactionKind::Expense => entry.1 += txn.amount,
            }
        }
        buckets
            .into_iter()
            .map(|(month, (income, expense))| MonthlyStats {
                month,
                income,
                expense,
                balance: income - expense,
            })
            .collect()
    }

    /// Per-category totals of `kind`, largest first.
    ///
    /// Dangling category ids resolve to `Unknown` with the neutral fallback color.
    pub fn category_stats(
        transactions: &[Transaction],
        categories: &[Category],
        kind: TransactionKind,
    ) -> Vec<CategoryStats> {
        let mut order: Vec<&str> = Vec::new();
        let mut totals: HashMap<&str, f64> = HashMap::new();
        let mut grand_total = 0.0;
        for txn in transactions.iter().filter(|txn| txn.kind == kind) {
            grand_total += txn.amount;
            let slot = totals.entry(txn.category.as_str()).or_insert_with(|| {
                order.push(txn.category.as_str());
                0.0
            });
            *slot += txn.amount;
        }

        let mut stats: Vec<CategoryStats> = order
            .into_iter()
            .map(|category_id| {
                let amount = totals.get(category_id).copied().unwrap_or_default();
                let category = categories.iter().find(|c| c.id == category_id);
                CategoryStats {
                    category_id: category_id.to_string(),
                    category_name: category
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| UNKNOWN_CATEGORY_NAME.to_string()),
                    amount,
                    percentage: if grand_total > 0.0 {
                        amount / grand_total * 100.0
                    } else {
                        0.0
                    },
                    color: category
                        .map(|c| c.color.clone())
                        .unwrap_or_else(|| FALLBACK_CATEGORY_COLOR.to_string()),
                }
            })
            .collect();
        stats.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        stats
    }

    /// Current-month snapshot, computed fresh on every call.
    pub fn dashboard(ledger: &Ledger, clock: &dyn Clock) -> DashboardData {
        let current_month = clock.current_month();
        let current: Vec<Transaction> = ledger
            .transactions
            .iter()
            .filter(|txn| txn.month_key() == current_month)
            .cloned()
            .collect();
        let income = sum_of(&current, TransactionKind::Income);
        let expense = sum_of(&current, TransactionKind::Expense);

        DashboardData {
            current_month_income: income,
            current_month_expense: expense,
            current_month_balance: income - expense,
            recent_transactions: Self::recent(&ledger.transactions, RECENT_TRANSACTION_LIMIT),
            monthly_stats: Self::monthly_stats(&ledger.transactions),
            category_stats: Self::category_stats(
                &current,
                &ledger.categories,
                TransactionKind::Expense,
            ),
        }
    }

    /// Up to `limit` transactions ordered by date descending; same-day entries keep sequence order.
    pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
        let mut sorted = transactions.to_vec();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted.truncate(limit);
        sorted
    }

    pub fn period_summary(transactions: &[Transaction]) -> PeriodSummary {
        let total_income = sum_of(transactions, TransactionKind::Income);
        let total_expense = sum_of(transactions, TransactionKind::Expense);
        let balance = total_income - total_expense;
        PeriodSummary {
            total_income,
            total_expense,
            balance,
            savings_rate: if total_income > 0.0 {
                balance / total_income * 100.0
            } else {
                0.0
            },
            transaction_count: transactions.len(),
        }
    }

    pub fn daily_averages(transactions: &[Transaction]) -> DailyAverages {
        let days: HashSet<NaiveDate> = transactions.iter().map(|txn| txn.date).collect();
        if days.is_empty() {
            return DailyAverages::default();
        }
        let count = days.len() as f64;
        DailyAverages {
            income: sum_of(transactions, TransactionKind::Income) / count,
            expense: sum_of(transactions, TransactionKind::Expense) / count,
        }
    }

    /// Statistics for `period`, optionally narrowed to one category id.
    pub fn statistics(
        ledger: &Ledger,
        period: StatisticsPeriod,
        category: Option<&str>,
        clock: &dyn Clock,
    ) -> StatisticsReport {
        let window = period.window(clock.today());
        let filters = TransactionFilters {
            date_from: window.map(|w| w.start),
            date_to: window.map(|w| w.end),
            category: category.map(str::to_string),
            ..TransactionFilters::default()
        };
        let selected: Vec<Transaction> = ledger
            .transactions
            .iter()
            .filter(|txn| filters.matches(txn))
            .cloned()
            .collect();

        StatisticsReport {
            window,
            monthly_stats: Self::monthly_stats(&selected),
            income_stats: Self::category_stats(
                &selected,
                &ledger.categories,
                TransactionKind::Income,
            ),
            expense_stats: Self::category_stats(
                &selected,
                &ledger.categories,
                TransactionKind::Expense,
            ),
            summary: Self::period_summary(&selected),
            daily_averages: Self::daily_averages(&selected),
        }
    }

    /// Rule-based hints for a report, in a fixed order: savings, balance, top category.
    pub fn advice(report: &StatisticsReport) -> Vec<Advice> {
        let summary = &report.summary;
        let mut hints = Vec::new();
        if summary.savings_rate > EXCELLENT_SAVINGS_RATE {
            hints.push(Advice::ExcellentSavings);
        }
        if (0.0..LOW_SAVINGS_RATE).contains(&summary.savings_rate) {
            hints.push(Advice::LowSavings);
        }
        if summary.balance < 0.0 {
            hints.push(Advice::Overspending);
        }
        if let Some(top) = report.expense_stats.first() {
            if top.percentage > DOMINANT_CATEGORY_SHARE {
                hints.push(Advice::DominantCategory {
                    category_name: top.category_name.clone(),
                    percentage: top.percentage,
                });
            }
        }
        hints
    }
}

fn sum_of(transactions: &[Transaction], kind: TransactionKind) -> f64 {
    transactions
        .iter()
        .filter(|txn| txn.kind == kind)
        .map(|txn| txn.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use chrono::{TimeZone, Utc};

    fn txn(id: &str, date: &str, kind: TransactionKind, amount: f64, category: &str) -> Transaction {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Transaction {
            id: id.into(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            kind,
            amount,
            category: category.into(),
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn clock_on(year: i32, month: u32, day: u32) -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap())
    }

    #[test]
    fn monthly_stats_bucket_by_month() {
        let txs = vec![
            txn("a", "2025-06-01", TransactionKind::Income, 1000.0, "income-salary"),
            txn("b", "2025-06-15", TransactionKind::Expense, 400.0, "expense-food"),
            txn("c", "2025-07-01", TransactionKind::Income, 500.0, "income-salary"),
        ];
        let stats = SummaryService::monthly_stats(&txs);
        assert_eq!(
            stats,
            vec![
                MonthlyStats {
                    month: "2025-06".into(),
                    income: 1000.0,
                    expense: 400.0,
                    balance: 600.0
                },
                MonthlyStats {
                    month: "2025-07".into(),
                    income: 500.0,
                    expense: 0.0,
                    balance: 500.0
                },
            ]
        );
    }

    #[test]
    fn monthly_stats_sorted_regardless_of_input_order() {
        let txs = vec![
            txn("a", "2025-03-01", TransactionKind::Expense, 10.0, "x"),
            txn("b", "2024-12-31", TransactionKind::Expense, 10.0, "x"),
        ];
        let months: Vec<String> = SummaryService::monthly_stats(&txs)
            .into_iter()
            .map(|s| s.month)
            .collect();
        assert_eq!(months, vec!["2024-12", "2025-03"]);
    }

    #[test]
    fn category_stats_resolve_names_and_fallbacks() {
        let categories = crate::domain::ledger::default_categories();
        let txs = vec![
            txn("a", "2025-06-01", TransactionKind::Expense, 300.0, "expense-food"),
            txn("b", "2025-06-02", TransactionKind::Expense, 100.0, "ghost"),
            txn("c", "2025-06-03", TransactionKind::Expense, 600.0, "expense-food"),
            txn("d", "2025-06-04", TransactionKind::Income, 5000.0, "income-salary"),
        ];
        let stats = SummaryService::category_stats(&txs, &categories, TransactionKind::Expense);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].category_id, "expense-food");
        assert_eq!(stats[0].category_name, "食費");
        assert_eq!(stats[0].amount, 900.0);
        assert!((stats[0].percentage - 90.0).abs() < 1e-9);
        assert_eq!(stats[1].category_name, UNKNOWN_CATEGORY_NAME);
        assert_eq!(stats[1].color, FALLBACK_CATEGORY_COLOR);
        let total: f64 = stats.iter().map(|s| s.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn category_stats_ties_keep_first_appearance() {
        let txs = vec![
            txn("a", "2025-06-01", TransactionKind::Expense, 100.0, "second"),
            txn("b", "2025-06-01", TransactionKind::Expense, 100.0, "first"),
        ];
        let stats = SummaryService::category_stats(&txs, &[], TransactionKind::Expense);
        let order: Vec<&str> = stats.iter().map(|s| s.category_id.as_str()).collect();
        assert_eq!(order, vec!["second", "first"]);
    }

    #[test]
    fn zero_total_yields_zero_percentages() {
        let txs = vec![
            txn("a", "2025-06-01", TransactionKind::Expense, 0.0, "expense-food"),
            txn("b", "2025-06-02", TransactionKind::Expense, 0.0, "expense-transport"),
        ];
        let stats = SummaryService::category_stats(&txs, &[], TransactionKind::Expense);
        assert_eq!(stats.len(), 2);
        assert!(stats.iter().all(|s| s.percentage == 0.0));
    }

    #[test]
    fn dashboard_uses_current_month_only() {
        let mut ledger = Ledger::with_default_categories(Utc::now());
        ledger.transactions = vec![
            txn("a", "2025-06-20", TransactionKind::Expense, 400.0, "expense-food"),
            txn("b", "2025-06-01", TransactionKind::Income, 1000.0, "income-salary"),
            txn("c", "2025-05-31", TransactionKind::Expense, 999.0, "expense-food"),
        ];
        let data = SummaryService::dashboard(&ledger, &clock_on(2025, 6, 24));

        assert_eq!(data.current_month_income, 1000.0);
        assert_eq!(data.current_month_expense, 400.0);
        assert_eq!(data.current_month_balance, 600.0);
        assert_eq!(data.monthly_stats.len(), 2);
        assert_eq!(data.category_stats.len(), 1);
        assert_eq!(data.category_stats[0].amount, 400.0);
        assert_eq!(data.recent_transactions[0].id, "a");
    }

    #[test]
    fn recent_takes_five_newest_by_date() {
        let txs: Vec<Transaction> = (1..=7)
            .map(|day| {
                txn(
                    &format!("t{day}"),
                    &format!("2025-06-0{day}"),
                    TransactionKind::Expense,
                    10.0,
                    "x",
                )
            })
            .collect();
        let recent = SummaryService::recent(&txs, 5);
        let ids: Vec<&str> = recent.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t7", "t6", "t5", "t4", "t3"]);
    }

    #[test]
    fn period_summary_and_daily_averages() {
        let txs = vec![
            txn("a", "2025-06-01", TransactionKind::Income, 1000.0, "s"),
            txn("b", "2025-06-01", TransactionKind::Expense, 200.0, "f"),
            txn("c", "2025-06-02", TransactionKind::Expense, 50.0, "f"),
        ];
        let summary = SummaryService::period_summary(&txs);
        assert_eq!(summary.balance, 750.0);
        assert!((summary.savings_rate - 75.0).abs() < 1e-9);
        assert_eq!(summary.transaction_count, 3);

        let averages = SummaryService::daily_averages(&txs);
        assert_eq!(averages.income, 500.0);
        assert_eq!(averages.expense, 125.0);
        assert_eq!(SummaryService::daily_averages(&[]), DailyAverages::default());
        assert_eq!(SummaryService::period_summary(&[]).savings_rate, 0.0);
    }

    #[test]
    fn statistics_periods_resolve_windows() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 17).unwrap();
        let six = StatisticsPeriod::LastSixMonths.window(today).unwrap();
        assert_eq!(six.start, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(six.end, today);
        let twelve = StatisticsPeriod::LastTwelveMonths.window(today).unwrap();
        assert_eq!(twelve.start, NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
        let three = StatisticsPeriod::LastThreeYears.window(today).unwrap();
        assert_eq!(three.start, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert!(StatisticsPeriod::All.window(today).is_none());
    }

    #[test]
    fn statistics_filters_by_period_and_category() {
        let mut ledger = Ledger::with_default_categories(Utc::now());
        ledger.transactions = vec![
            txn("a", "2025-08-01", TransactionKind::Expense, 400.0, "expense-food"),
            txn("b", "2025-07-10", TransactionKind::Expense, 100.0, "expense-transport"),
            txn("c", "2024-01-10", TransactionKind::Expense, 900.0, "expense-food"),
        ];
        let report = SummaryService::statistics(
            &ledger,
            StatisticsPeriod::LastSixMonths,
            Some("expense-food"),
            &clock_on(2025, 8, 17),
        );
        assert_eq!(report.summary.transaction_count, 1);
        assert_eq!(report.expense_stats.len(), 1);
        assert!(report.income_stats.is_empty());
        assert_eq!(report.monthly_stats[0].month, "2025-08");
    }

    fn report(savings_rate: f64, balance: f64, top_share: Option<f64>) -> StatisticsReport {
        StatisticsReport {
            window: None,
            monthly_stats: Vec::new(),
            income_stats: Vec::new(),
            expense_stats: top_share
                .map(|percentage| CategoryStats {
                    category_id: "expense-food".into(),
                    category_name: "食費".into(),
                    amount: 100.0,
                    percentage,
                    color: "#ef4444".into(),
                })
                .into_iter()
                .collect(),
            summary: PeriodSummary {
                total_income: 0.0,
                total_expense: 0.0,
                balance,
                savings_rate,
                transaction_count: 0,
            },
            daily_averages: DailyAverages::default(),
        }
    }

    #[test]
    fn advice_savings_thresholds_are_exclusive_at_twenty_and_ten() {
        assert_eq!(SummaryService::advice(&report(20.1, 1.0, None)), vec![Advice::ExcellentSavings]);
        assert!(SummaryService::advice(&report(20.0, 1.0, None)).is_empty());
        assert!(SummaryService::advice(&report(10.0, 1.0, None)).is_empty());
        assert_eq!(SummaryService::advice(&report(9.9, 1.0, None)), vec![Advice::LowSavings]);
        assert_eq!(SummaryService::advice(&report(0.0, 0.0, None)), vec![Advice::LowSavings]);
    }

    #[test]
    fn advice_flags_negative_balance_without_low_savings() {
        assert_eq!(
            SummaryService::advice(&report(-5.0, -50.0, None)),
            vec![Advice::Overspending]
        );
    }

    #[test]
    fn advice_dominant_category_above_forty_percent() {
        assert!(SummaryService::advice(&report(15.0, 10.0, Some(40.0))).is_empty());
        assert_eq!(
            SummaryService::advice(&report(15.0, 10.0, Some(40.5))),
            vec![Advice::DominantCategory {
                category_name: "食費".into(),
                percentage: 40.5
            }]
        );
    }

    #[test]
    fn advice_from_real_statistics() {
        let ledger = Ledger {
            transactions: vec![
                txn("a", "2025-06-01", TransactionKind::Income, 1000.0, "income-salary"),
                txn("b", "2025-06-10", TransactionKind::Expense, 700.0, "expense-food"),
                txn("c", "2025-06-11", TransactionKind::Expense, 500.0, "expense-transport"),
            ],
            ..Ledger::with_default_categories(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
        };
        let stats = SummaryService::statistics(&ledger, StatisticsPeriod::All, None, &clock_on(2025, 6, 30));
        let hints = SummaryService::advice(&stats);
        assert_eq!(hints[0], Advice::Overspending);
        assert!(matches!(&hints[1], Advice::DominantCategory { category_name, .. } if category_name == "食費"));
        assert_eq!(hints.len(), 2);
    }
}

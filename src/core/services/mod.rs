pub mod category_service;
pub mod export_service;
pub mod query_service;
pub mod summary_service;
pub mod transaction_service;

pub use category_service::CategoryService;
pub use export_service::{CsvLabels, CsvLocale, ExportFormat, ExportService};
pub use query_service::{KindFilter, QueryService, SortField, SortOrder, TransactionFilters};
pub use summary_service::{
    Advice, CategoryStats, DailyAverages, DashboardData, MonthlyStats, PeriodSummary, StatisticsPeriod,
    StatisticsReport, SummaryService,
};
pub use transaction_service::TransactionService;

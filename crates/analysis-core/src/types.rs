use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A derived ratio. `None` marks a value that could not be computed
/// (missing input, zero denominator, non-finite quotient).
pub type Ratio = Option<f64>;

/// Statement columns every table must carry, in canonical order.
pub const REQUIRED_STATEMENT_COLUMNS: [&str; 10] = [
    "date",
    "revenue",
    "cogs",
    "operating_income",
    "net_income",
    "current_assets",
    "current_liabilities",
    "total_assets",
    "total_liabilities",
    "shareholders_equity",
];

/// The only optional statement column.
pub const INVENTORY_COLUMN: &str = "inventory";

/// Column that carries headline polarity in a sentiment table.
pub const COMPOUND_COLUMN: &str = "compound";

pub const SENTIMENT_COLUMNS: [&str; 4] = ["date", "source", "headline", COMPOUND_COLUMN];

/// One reporting period of raw statement line items.
///
/// Numeric cells are optional: an empty or unparseable cell in the source
/// data is carried as `None` and turns every ratio that needs it undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub date: NaiveDate,
    pub revenue: Option<f64>,
    pub cogs: Option<f64>,
    pub operating_income: Option<f64>,
    pub net_income: Option<f64>,
    pub current_assets: Option<f64>,
    pub current_liabilities: Option<f64>,
    pub total_assets: Option<f64>,
    pub total_liabilities: Option<f64>,
    pub shareholders_equity: Option<f64>,
    #[serde(default)]
    pub inventory: Option<f64>,
}

impl StatementRow {
    /// Row with every line item missing, for builders and loaders to fill in.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            revenue: None,
            cogs: None,
            operating_income: None,
            net_income: None,
            current_assets: None,
            current_liabilities: None,
            total_assets: None,
            total_liabilities: None,
            shareholders_equity: None,
            inventory: None,
        }
    }

    /// Assign a numeric cell by its normalized column name.
    /// Returns `false` for columns that are not statement line items.
    pub fn set_field(&mut self, column: &str, value: Option<f64>) -> bool {
        let slot = match column {
            "revenue" => &mut self.revenue,
            "cogs" => &mut self.cogs,
            "operating_income" => &mut self.operating_income,
            "net_income" => &mut self.net_income,
            "current_assets" => &mut self.current_assets,
            "current_liabilities" => &mut self.current_liabilities,
            "total_assets" => &mut self.total_assets,
            "total_liabilities" => &mut self.total_liabilities,
            "shareholders_equity" => &mut self.shareholders_equity,
            INVENTORY_COLUMN => &mut self.inventory,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Ordered statement rows plus the header set they were read with.
///
/// Rows must be sorted ascending by `date`; the loader owns that guarantee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementTable {
    pub columns: Vec<String>,
    pub rows: Vec<StatementRow>,
}

impl StatementTable {
    pub fn new(columns: Vec<String>, rows: Vec<StatementRow>) -> Self {
        Self { columns, rows }
    }

    /// Build a table whose schema is every required column, plus `inventory`
    /// when at least one row reports it.
    pub fn from_rows(rows: Vec<StatementRow>) -> Self {
        let mut columns: Vec<String> = REQUIRED_STATEMENT_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .collect();
        if rows.iter().any(|r| r.inventory.is_some()) {
            columns.push(INVENTORY_COLUMN.to_string());
        }
        Self { columns, rows }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Required columns absent from this table, in canonical order.
    pub fn missing_columns(&self) -> Vec<String> {
        REQUIRED_STATEMENT_COLUMNS
            .iter()
            .filter(|c| !self.has_column(c))
            .map(|c| c.to_string())
            .collect()
    }

    pub fn is_sorted_by_date(&self) -> bool {
        self.rows.windows(2).all(|w| w[0].date <= w[1].date)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One computed period, derived 1:1 from a [`StatementRow`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioRow {
    pub date: NaiveDate,
    pub revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub gross_margin: Ratio,
    pub operating_margin: Ratio,
    pub net_margin: Ratio,
    pub current_ratio: Ratio,
    pub quick_ratio: Ratio,
    pub debt_to_equity: Ratio,
    pub asset_turnover: Ratio,
    pub inventory_turnover: Ratio,
    pub roe: Ratio,
    pub roa: Ratio,
}

/// Selector for a single ratio column of a [`RatioRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioKind {
    GrossMargin,
    OperatingMargin,
    NetMargin,
    CurrentRatio,
    QuickRatio,
    DebtToEquity,
    AssetTurnover,
    InventoryTurnover,
    Roe,
    Roa,
}

impl RatioKind {
    pub const ALL: [RatioKind; 10] = [
        RatioKind::GrossMargin,
        RatioKind::OperatingMargin,
        RatioKind::NetMargin,
        RatioKind::CurrentRatio,
        RatioKind::QuickRatio,
        RatioKind::DebtToEquity,
        RatioKind::AssetTurnover,
        RatioKind::InventoryTurnover,
        RatioKind::Roe,
        RatioKind::Roa,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            RatioKind::GrossMargin => "gross_margin",
            RatioKind::OperatingMargin => "operating_margin",
            RatioKind::NetMargin => "net_margin",
            RatioKind::CurrentRatio => "current_ratio",
            RatioKind::QuickRatio => "quick_ratio",
            RatioKind::DebtToEquity => "debt_to_equity",
            RatioKind::AssetTurnover => "asset_turnover",
            RatioKind::InventoryTurnover => "inventory_turnover",
            RatioKind::Roe => "roe",
            RatioKind::Roa => "roa",
        }
    }
}

impl RatioRow {
    pub fn get(&self, kind: RatioKind) -> Ratio {
        match kind {
            RatioKind::GrossMargin => self.gross_margin,
            RatioKind::OperatingMargin => self.operating_margin,
            RatioKind::NetMargin => self.net_margin,
            RatioKind::CurrentRatio => self.current_ratio,
            RatioKind::QuickRatio => self.quick_ratio,
            RatioKind::DebtToEquity => self.debt_to_equity,
            RatioKind::AssetTurnover => self.asset_turnover,
            RatioKind::InventoryTurnover => self.inventory_turnover,
            RatioKind::Roe => self.roe,
            RatioKind::Roa => self.roa,
        }
    }
}

/// One scored headline, as produced by an external sentiment scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRow {
    pub date: Option<NaiveDate>,
    pub source: String,
    pub headline: String,
    /// Compound polarity in [-1, 1].
    pub compound: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentTable {
    pub columns: Vec<String>,
    pub rows: Vec<SentimentRow>,
}

impl SentimentTable {
    pub fn new(columns: Vec<String>, rows: Vec<SentimentRow>) -> Self {
        Self { columns, rows }
    }

    /// Table with the full `{date, source, headline, compound}` schema.
    pub fn from_rows(rows: Vec<SentimentRow>) -> Self {
        Self {
            columns: SENTIMENT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    pub fn has_compound(&self) -> bool {
        self.columns.iter().any(|c| c == COMPOUND_COLUMN)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// An unscored headline handed to a [`crate::HeadlineScorer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub date: Option<NaiveDate>,
    pub source: String,
    pub headline: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day: u32, inventory: Option<f64>) -> StatementRow {
        let mut r = StatementRow::empty(NaiveDate::from_ymd_opt(2024, 3, day).unwrap());
        r.inventory = inventory;
        r
    }

    #[test]
    fn test_from_rows_declares_inventory_only_when_reported() {
        let without = StatementTable::from_rows(vec![row(1, None)]);
        assert!(!without.has_column(INVENTORY_COLUMN));
        assert!(without.missing_columns().is_empty());

        let with = StatementTable::from_rows(vec![row(1, None), row(2, Some(5.0))]);
        assert!(with.has_column(INVENTORY_COLUMN));
    }

    #[test]
    fn test_missing_columns_canonical_order() {
        let table = StatementTable::new(
            vec!["revenue".into(), "date".into(), "net_income".into()],
            vec![],
        );
        let missing = table.missing_columns();
        assert_eq!(missing.first().map(String::as_str), Some("cogs"));
        assert_eq!(missing.len(), 7);
        assert!(!missing.contains(&"date".to_string()));
    }

    #[test]
    fn test_set_field() {
        let mut r = row(1, None);
        assert!(r.set_field("cogs", Some(60.0)));
        assert!(r.set_field("inventory", Some(10.0)));
        assert!(!r.set_field("ticker", Some(1.0)));
        assert_eq!(r.cogs, Some(60.0));
        assert_eq!(r.inventory, Some(10.0));
    }

    #[test]
    fn test_sorted_check() {
        let sorted = StatementTable::from_rows(vec![row(1, None), row(2, None)]);
        assert!(sorted.is_sorted_by_date());
        let unsorted = StatementTable::from_rows(vec![row(2, None), row(1, None)]);
        assert!(!unsorted.is_sorted_by_date());
    }

    #[test]
    fn test_sentiment_table_compound_column() {
        assert!(SentimentTable::from_rows(vec![]).has_compound());
        let bare = SentimentTable::new(vec!["date".into(), "headline".into()], vec![]);
        assert!(!bare.has_compound());
    }
}

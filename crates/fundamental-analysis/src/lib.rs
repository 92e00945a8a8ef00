use analysis_core::stats::safe_div;
use analysis_core::{
    AnalysisError, Ratio, RatioCalculator, RatioRow, StatementRow, StatementTable, INVENTORY_COLUMN,
};


/// Turns a row-per-period statement table into a row-per-period ratio table.
///
/// Stateless: every call works only on its input and returns fresh rows.
pub struct FundamentalAnalysisEngine;

impl FundamentalAnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    fn calculate_gross_margin(&self, revenue: Option<f64>, cogs: Option<f64>) -> Ratio {
        let gross_profit = match (revenue, cogs) {
            (Some(r), Some(c)) => Some(r - c),
            _ => None,
        };
        safe_div(gross_profit, revenue)
    }

    fn calculate_operating_margin(&self, operating_income: Option<f64>, revenue: Option<f64>) -> Ratio {
        safe_div(operating_income, revenue)
    }

    fn calculate_net_margin(&self, net_income: Option<f64>, revenue: Option<f64>) -> Ratio {
        safe_div(net_income, revenue)
    }

    fn calculate_current_ratio(&self, assets: Option<f64>, liabilities: Option<f64>) -> Ratio {
        safe_div(assets, liabilities)
    }

    /// Inventory that is absent contributes nothing, so it counts as zero here.
    fn calculate_quick_ratio(
        &self,
        assets: Option<f64>,
        inventory: Option<f64>,
        liabilities: Option<f64>,
    ) -> Ratio {
        let quick_assets = assets.map(|a| a - inventory.unwrap_or(0.0));
        safe_div(quick_assets, liabilities)
    }

    fn calculate_debt_to_equity(&self, liabilities: Option<f64>, equity: Option<f64>) -> Ratio {
        safe_div(liabilities, equity)
    }

    fn calculate_asset_turnover(&self, revenue: Option<f64>, total_assets: Option<f64>) -> Ratio {
        safe_div(revenue, total_assets)
    }

    /// Unlike the quick ratio, absent inventory leaves turnover undefined.
    fn calculate_inventory_turnover(&self, cogs: Option<f64>, inventory: Option<f64>) -> Ratio {
        safe_div(cogs, inventory)
    }

    fn calculate_roe(&self, net_income: Option<f64>, equity: Option<f64>) -> Ratio {
        safe_div(net_income, equity)
    }

    fn calculate_roa(&self, net_income: Option<f64>, total_assets: Option<f64>) -> Ratio {
        safe_div(net_income, total_assets)
    }

    fn ratios_for(&self, row: &StatementRow, inventory_reported: bool) -> RatioRow {
        let inventory = if inventory_reported { row.inventory } else { None };

        RatioRow {
            date: row.date,
            revenue: row.revenue,
            net_income: row.net_income,
            gross_margin: self.calculate_gross_margin(row.revenue, row.cogs),
            operating_margin: self.calculate_operating_margin(row.operating_income, row.revenue),
            net_margin: self.calculate_net_margin(row.net_income, row.revenue),
            current_ratio: self.calculate_current_ratio(row.current_assets, row.current_liabilities),
            quick_ratio: self.calculate_quick_ratio(
                row.current_assets,
                inventory,
                row.current_liabilities,
            ),
            debt_to_equity: self
                .calculate_debt_to_equity(row.total_liabilities, row.shareholders_equity),
            asset_turnover: self.calculate_asset_turnover(row.revenue, row.total_assets),
            inventory_turnover: self.calculate_inventory_turnover(row.cogs, inventory),
            roe: self.calculate_roe(row.net_income, row.shareholders_equity),
            roa: self.calculate_roa(row.net_income, row.total_assets),
        }
    }

    /// Compute one [`RatioRow`] per statement row, in input order.
    ///
    /// Fails with [`AnalysisError::Schema`] when a required column is missing.
    /// An empty table is valid and yields an empty result. Rows are expected to
    /// be sorted ascending by date.
    pub fn compute_ratios(&self, statements: &StatementTable) -> Result<Vec<RatioRow>, AnalysisError> {
        let missing = statements.missing_columns();
        if !missing.is_empty() {
            tracing::warn!(?missing, "statement table is missing required columns");
            return Err(AnalysisError::Schema { missing });
        }
        debug_assert!(
            statements.is_sorted_by_date(),
            "statement rows must be sorted ascending by date"
        );

        let inventory_reported = statements.has_column(INVENTORY_COLUMN);
        let rows: Vec<RatioRow> = statements
            .rows
            .iter()
            .map(|row| self.ratios_for(row, inventory_reported))
            .collect();

        tracing::debug!(periods = rows.len(), inventory_reported, "computed ratio table");
        Ok(rows)
    }
}

impl RatioCalculator for FundamentalAnalysisEngine {
    fn compute(&self, statements: &StatementTable) -> Result<Vec<RatioRow>, AnalysisError> {
        self.compute_ratios(statements)
    }
}

impl Default for FundamentalAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper over [`FundamentalAnalysisEngine::compute_ratios`].
pub fn compute_ratios(statements: &StatementTable) -> Result<Vec<RatioRow>, AnalysisError> {
    FundamentalAnalysisEngine::new().compute_ratios(statements)
}

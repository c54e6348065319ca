//! Canonical financial statement records: income statement, balance sheet,
//! cash flow, plus the dividend history that shares their vendor shape.
//!
//! All three statements are keyed by **filing date** (the day the statement
//! became public), not by the accounting period it describes. The vendor's
//! period-end date is dropped during normalization.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::table::Table;

/// A normalized annual or quarterly income statement.
#[derive(Clone, Debug, Serialize)]
pub struct IncomeStatement {
    pub symbol: String,
    /// Calendar year the statement covers
    pub year: i32,
    pub revenue: f64,
    pub cost_of_revenue: f64,
    pub gross_profit: f64,
    pub gross_profit_ratio: f64,
    pub r_and_d_exp: f64,
    pub general_and_admin_exp: f64,
    pub selling_and_marketing_exp: f64,
    pub selling_general_and_admin_exp: f64,
    pub other_exp: f64,
    pub operating_exp: f64,
    pub cost_and_exp: f64,
    pub interest_income: f64,
    pub interest_expense: f64,
    pub depreciation_and_amortization: f64,
    pub ebitda: f64,
    pub ebitda_ratio: f64,
    pub operating_income: f64,
    pub operating_income_ratio: f64,
    pub total_other_income_exp_net: f64,
    pub income_before_tax: f64,
    pub income_before_tax_ratio: f64,
    pub income_tax_expense: f64,
    pub net_income: f64,
    pub net_income_ratio: f64,
    pub eps: f64,
    /// Filing date, not the period-end date
    pub date: NaiveDate,
}

impl IncomeStatement {
    /// Stored column order.
    pub const COLUMNS: [&'static str; 28] = [
        "symbol",
        "year",
        "revenue",
        "cost_of_revenue",
        "gross_profit",
        "gross_profit_ratio",
        "r_and_d_exp",
        "general_and_admin_exp",
        "selling_and_marketing_exp",
        "selling_general_and_admin_exp",
        "other_exp",
        "operating_exp",
        "cost_and_exp",
        "interest_income",
        "interest_expense",
        "depreciation_and_amortization",
        "ebitda",
        "ebitda_ratio",
        "operating_income",
        "operating_income_ratio",
        "total_other_income_exp_net",
        "income_before_tax",
        "income_before_tax_ratio",
        "income_tax_expense",
        "net_income",
        "net_income_ratio",
        "eps",
        "date",
    ];

    /// Convert a record set into its stored tabular shape.
    pub fn to_table(records: &[Self]) -> Table {
        let mut table = Table::new(Self::COLUMNS);
        for r in records {
            table.push_row(vec![
                r.symbol.clone().into(),
                r.year.into(),
                r.revenue.into(),
                r.cost_of_revenue.into(),
                r.gross_profit.into(),
                r.gross_profit_ratio.into(),
                r.r_and_d_exp.into(),
                r.general_and_admin_exp.into(),
                r.selling_and_marketing_exp.into(),
                r.selling_general_and_admin_exp.into(),
                r.other_exp.into(),
                r.operating_exp.into(),
                r.cost_and_exp.into(),
                r.interest_income.into(),
                r.interest_expense.into(),
                r.depreciation_and_amortization.into(),
                r.ebitda.into(),
                r.ebitda_ratio.into(),
                r.operating_income.into(),
                r.operating_income_ratio.into(),
                r.total_other_income_exp_net.into(),
                r.income_before_tax.into(),
                r.income_before_tax_ratio.into(),
                r.income_tax_expense.into(),
                r.net_income.into(),
                r.net_income_ratio.into(),
                r.eps.into(),
                r.date.into(),
            ]);
        }
        table
    }
}

/// A normalized annual or quarterly balance sheet.
///
/// The column names `minority_nterest` and
/// `deferred_tax_liabilities_non_urrent` match the stored schema,
/// misspellings included.
#[derive(Clone, Debug, Serialize)]
pub struct BalanceSheet {
    pub symbol: String,
    /// Calendar year the statement covers
    pub year: i32,
    pub cash_and_cash_equivalents: f64,
    pub short_term_investments: f64,
    pub cash_and_short_term_investments: f64,
    pub net_receivables: f64,
    pub inventory: f64,
    pub other_current_assets: f64,
    pub total_current_assets: f64,
    pub property_plant_equipment_net: f64,
    pub goodwill: f64,
    pub intangible_assets: f64,
    pub goodwill_and_intangible_assets: f64,
    pub long_term_investments: f64,
    pub tax_assets: f64,
    pub other_non_current_assets: f64,
    pub total_non_current_assets: f64,
    pub other_assets: f64,
    pub total_assets: f64,
    pub account_payables: f64,
    pub short_term_debt: f64,
    pub tax_payables: f64,
    pub deferred_revenue: f64,
    pub other_current_liabilities: f64,
    pub total_current_liabilities: f64,
    pub long_term_debt: f64,
    pub deferred_revenue_non_current: f64,
    pub deferred_tax_liabilities_non_urrent: f64,
    pub other_non_current_liabilities: f64,
    pub total_non_current_liabilities: f64,
    pub other_liabilities: f64,
    pub capital_lease_obligations: f64,
    pub total_liabilities: f64,
    pub preferred_stock: f64,
    pub common_stock: f64,
    pub retained_earnings: f64,
    pub accumulated_other_comprehensive_income_loss: f64,
    pub other_total_stockholders_equity: f64,
    pub total_stockholders_equity: f64,
    pub total_equity: f64,
    pub total_liabilities_and_stockholders_equity: f64,
    pub minority_nterest: f64,
    pub total_liabilities_and_total_equity: f64,
    pub total_investments: f64,
    pub total_debt: f64,
    pub net_debt: f64,
    /// Filing date, not the period-end date
    pub date: NaiveDate,
}

impl BalanceSheet {
    /// Stored column order.
    pub const COLUMNS: [&'static str; 47] = [
        "symbol",
        "year",
        "cash_and_cash_equivalents",
        "short_term_investments",
        "cash_and_short_term_investments",
        "net_receivables",
        "inventory",
        "other_current_assets",
        "total_current_assets",
        "property_plant_equipment_net",
        "goodwill",
        "intangible_assets",
        "goodwill_and_intangible_assets",
        "long_term_investments",
        "tax_assets",
        "other_non_current_assets",
        "total_non_current_assets",
        "other_assets",
        "total_assets",
        "account_payables",
        "short_term_debt",
        "tax_payables",
        "deferred_revenue",
        "other_current_liabilities",
        "total_current_liabilities",
        "long_term_debt",
        "deferred_revenue_non_current",
        "deferred_tax_liabilities_non_urrent",
        "other_non_current_liabilities",
        "total_non_current_liabilities",
        "other_liabilities",
        "capital_lease_obligations",
        "total_liabilities",
        "preferred_stock",
        "common_stock",
        "retained_earnings",
        "accumulated_other_comprehensive_income_loss",
        "other_total_stockholders_equity",
        "total_stockholders_equity",
        "total_equity",
        "total_liabilities_and_stockholders_equity",
        "minority_nterest",
        "total_liabilities_and_total_equity",
        "total_investments",
        "total_debt",
        "net_debt",
        "date",
    ];

    /// Convert a record set into its stored tabular shape.
    pub fn to_table(records: &[Self]) -> Table {
        let mut table = Table::new(Self::COLUMNS);
        for r in records {
            table.push_row(vec![
                r.symbol.clone().into(),
                r.year.into(),
                r.cash_and_cash_equivalents.into(),
                r.short_term_investments.into(),
                r.cash_and_short_term_investments.into(),
                r.net_receivables.into(),
                r.inventory.into(),
                r.other_current_assets.into(),
                r.total_current_assets.into(),
                r.property_plant_equipment_net.into(),
                r.goodwill.into(),
                r.intangible_assets.into(),
                r.goodwill_and_intangible_assets.into(),
                r.long_term_investments.into(),
                r.tax_assets.into(),
                r.other_non_current_assets.into(),
                r.total_non_current_assets.into(),
                r.other_assets.into(),
                r.total_assets.into(),
                r.account_payables.into(),
                r.short_term_debt.into(),
                r.tax_payables.into(),
                r.deferred_revenue.into(),
                r.other_current_liabilities.into(),
                r.total_current_liabilities.into(),
                r.long_term_debt.into(),
                r.deferred_revenue_non_current.into(),
                r.deferred_tax_liabilities_non_urrent.into(),
                r.other_non_current_liabilities.into(),
                r.total_non_current_liabilities.into(),
                r.other_liabilities.into(),
                r.capital_lease_obligations.into(),
                r.total_liabilities.into(),
                r.preferred_stock.into(),
                r.common_stock.into(),
                r.retained_earnings.into(),
                r.accumulated_other_comprehensive_income_loss.into(),
                r.other_total_stockholders_equity.into(),
                r.total_stockholders_equity.into(),
                r.total_equity.into(),
                r.total_liabilities_and_stockholders_equity.into(),
                r.minority_nterest.into(),
                r.total_liabilities_and_total_equity.into(),
                r.total_investments.into(),
                r.total_debt.into(),
                r.net_debt.into(),
                r.date.into(),
            ]);
        }
        table
    }
}

/// A normalized annual or quarterly cash flow statement.
#[derive(Clone, Debug, Serialize)]
pub struct CashFlow {
    pub symbol: String,
    /// Calendar year the statement covers
    pub year: i32,
    pub net_income: f64,
    pub depreciation_and_amortization: f64,
    pub deferred_income_tax: f64,
    pub stock_based_compensation: f64,
    pub change_in_working_capital: f64,
    pub accounts_receivables: f64,
    pub inventory: f64,
    pub accounts_payables: f64,
    pub other_working_capital: f64,
    pub other_non_cash_items: f64,
    pub net_cash_provided_by_operating_activities: f64,
    pub investments_in_property_plant_and_equipment: f64,
    pub acquisitions_net: f64,
    pub purchases_of_investments: f64,
    pub sales_maturities_of_investments: f64,
    pub other_investing_activites: f64,
    pub net_cash_used_for_investing_activites: f64,
    pub debt_repayment: f64,
    pub common_stock_issued: f64,
    pub common_stock_repurchased: f64,
    pub dividends_paid: f64,
    pub other_financing_activites: f64,
    pub net_cash_used_provided_by_financing_activities: f64,
    pub effect_of_forex_changes_on_cash: f64,
    pub net_change_in_cash: f64,
    pub cash_at_end_of_period: f64,
    pub cash_at_beginning_of_period: f64,
    pub operating_cash_flow: f64,
    pub capital_expenditure: f64,
    pub free_cash_flow: f64,
    /// Filing date, not the period-end date
    pub date: NaiveDate,
}

impl CashFlow {
    /// Stored column order.
    pub const COLUMNS: [&'static str; 33] = [
        "symbol",
        "year",
        "net_income",
        "depreciation_and_amortization",
        "deferred_income_tax",
        "stock_based_compensation",
        "change_in_working_capital",
        "accounts_receivables",
        "inventory",
        "accounts_payables",
        "other_working_capital",
        "other_non_cash_items",
        "net_cash_provided_by_operating_activities",
        "investments_in_property_plant_and_equipment",
        "acquisitions_net",
        "purchases_of_investments",
        "sales_maturities_of_investments",
        "other_investing_activites",
        "net_cash_used_for_investing_activites",
        "debt_repayment",
        "common_stock_issued",
        "common_stock_repurchased",
        "dividends_paid",
        "other_financing_activites",
        "net_cash_used_provided_by_financing_activities",
        "effect_of_forex_changes_on_cash",
        "net_change_in_cash",
        "cash_at_end_of_period",
        "cash_at_beginning_of_period",
        "operating_cash_flow",
        "capital_expenditure",
        "free_cash_flow",
        "date",
    ];

    /// Convert a record set into its stored tabular shape.
    pub fn to_table(records: &[Self]) -> Table {
        let mut table = Table::new(Self::COLUMNS);
        for r in records {
            table.push_row(vec![
                r.symbol.clone().into(),
                r.year.into(),
                r.net_income.into(),
                r.depreciation_and_amortization.into(),
                r.deferred_income_tax.into(),
                r.stock_based_compensation.into(),
                r.change_in_working_capital.into(),
                r.accounts_receivables.into(),
                r.inventory.into(),
                r.accounts_payables.into(),
                r.other_working_capital.into(),
                r.other_non_cash_items.into(),
                r.net_cash_provided_by_operating_activities.into(),
                r.investments_in_property_plant_and_equipment.into(),
                r.acquisitions_net.into(),
                r.purchases_of_investments.into(),
                r.sales_maturities_of_investments.into(),
                r.other_investing_activites.into(),
                r.net_cash_used_for_investing_activites.into(),
                r.debt_repayment.into(),
                r.common_stock_issued.into(),
                r.common_stock_repurchased.into(),
                r.dividends_paid.into(),
                r.other_financing_activites.into(),
                r.net_cash_used_provided_by_financing_activities.into(),
                r.effect_of_forex_changes_on_cash.into(),
                r.net_change_in_cash.into(),
                r.cash_at_end_of_period.into(),
                r.cash_at_beginning_of_period.into(),
                r.operating_cash_flow.into(),
                r.capital_expenditure.into(),
                r.free_cash_flow.into(),
                r.date.into(),
            ]);
        }
        table
    }
}

/// A normalized dividend payment, keyed by declaration date.
#[derive(Clone, Debug, Serialize)]
pub struct Dividend {
    /// Cash amount per share
    pub dividend: Decimal,
    /// Declaration date; the vendor occasionally omits it
    pub date: Option<NaiveDate>,
    /// Upper-cased symbol
    pub ticker: String,
}

impl Dividend {
    /// Stored column order.
    pub const COLUMNS: [&'static str; 3] = ["dividend", "date", "ticker"];

    /// Convert a record set into its stored tabular shape.
    pub fn to_table(records: &[Self]) -> Table {
        let mut table = Table::new(Self::COLUMNS);
        for r in records {
            table.push_row(vec![
                r.dividend.into(),
                r.date.into(),
                r.ticker.clone().into(),
            ]);
        }
        table
    }
}

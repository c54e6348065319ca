//! Raw Financial Modeling Prep response shapes and the transformation rules
//! that turn them into canonical records.
//!
//! The vendor speaks camelCase; the serde rename attributes on these structs
//! are the wire-name mapping, and each rule's field assignments are the
//! canonical-name mapping. Fields the canonical types drop are simply not
//! captured here.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::PROVIDER_ID;
use crate::errors::{FetchError, FetchResult};
use crate::models::{
    AggKind, BalanceSheet, CashFlow, Dividend, IncomeStatement, IndexConstituent, MarketCapPoint,
    MarketCapSnapshot, PriceBar, RealtimeQuote,
};

/// Earliest filing/observation year kept by the year-filtered rules.
const MIN_YEAR: i32 = 2000;

fn parse_date(s: &str) -> FetchResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| FetchError::Decode {
        provider: PROVIDER_ID,
        message: format!("invalid date {s:?}: {e}"),
    })
}

fn parse_year(s: &str) -> FetchResult<i32> {
    s.parse::<i32>().map_err(|e| FetchError::Decode {
        provider: PROVIDER_ID,
        message: format!("invalid calendar year {s:?}: {e}"),
    })
}

// ============================================================================
// Price history
// ============================================================================

/// Envelope of `historical-price-full`: results are wrapped in `historical`.
#[derive(Debug, Deserialize)]
pub(super) struct HistoricalPriceResponse {
    #[serde(default)]
    pub(super) historical: Vec<RawPriceBar>,
    // Note: the top-level `symbol` field is not captured; the adapter
    // already knows which symbol it asked for
}

/// A daily bar as the vendor returns it.
///
/// `adjClose`, `unadjustedVolume`, `label` and `changeOverTime` are dropped.
#[derive(Debug, Deserialize)]
pub struct RawPriceBar {
    pub date: String,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    #[serde(default)]
    pub volume: Option<Decimal>,
    #[serde(default)]
    pub change: Decimal,
    #[serde(rename = "changePercent", default)]
    pub change_percent: Decimal,
    #[serde(default)]
    pub vwap: Decimal,
}

/// Normalize daily bars: parse dates, rename `changePercent` to
/// `percent_change`, round the derived fields to 4 decimals, and attach the
/// upper-cased symbol. Forex and index bars lose their volume. No year
/// filter is applied to price history.
pub fn normalize_price_bars(
    raw: Vec<RawPriceBar>,
    ticker: &str,
    kind: AggKind,
) -> FetchResult<Vec<PriceBar>> {
    let symbol = ticker.to_uppercase();
    raw.into_iter()
        .map(|r| {
            let volume = match kind {
                AggKind::Equity => r.volume,
                AggKind::Forex | AggKind::Index => None,
            };
            Ok(PriceBar {
                date: parse_date(&r.date)?,
                open: r.open,
                high: r.high,
                low: r.low,
                close: r.close,
                volume,
                change: r.change.round_dp(4),
                percent_change: r.change_percent.round_dp(4),
                vwap: r.vwap.round_dp(4),
                ticker: symbol.clone(),
            })
        })
        .collect()
}

// ============================================================================
// Dividends
// ============================================================================

/// Envelope of `historical-price-full/stock_dividend`.
#[derive(Debug, Deserialize)]
pub(super) struct DividendHistoryResponse {
    #[serde(default)]
    pub(super) historical: Vec<RawDividend>,
}

/// A dividend record as the vendor returns it.
///
/// `label`, `adjDividend`, `recordDate` and `paymentDate` are dropped.
#[derive(Debug, Deserialize)]
pub struct RawDividend {
    /// Ex-dividend date; consulted for the year filter, then discarded
    pub date: String,
    #[serde(default)]
    pub dividend: Decimal,
    #[serde(rename = "declarationDate", default)]
    pub declaration_date: Option<String>,
}

/// Normalize dividend history: filter on the ex-date year, then key each
/// record by its declaration date and attach the upper-cased symbol.
pub fn normalize_dividends(raw: Vec<RawDividend>, ticker: &str) -> FetchResult<Vec<Dividend>> {
    let symbol = ticker.to_uppercase();
    let mut out = Vec::with_capacity(raw.len());
    for r in raw {
        let ex_date = parse_date(&r.date)?;
        if ex_date.year() < MIN_YEAR {
            continue;
        }
        let date = match r.declaration_date.as_deref() {
            None | Some("") => None,
            Some(s) => Some(parse_date(s)?),
        };
        out.push(Dividend {
            dividend: r.dividend,
            date,
            ticker: symbol.clone(),
        });
    }
    Ok(out)
}

// ============================================================================
// Quotes and market capitalization
// ============================================================================

/// A `quote-short` record; passed through unchanged.
#[derive(Debug, Deserialize)]
pub struct RawQuoteShort {
    pub symbol: String,
    pub price: Decimal,
    #[serde(default)]
    pub volume: Option<Decimal>,
}

/// Normalize short quotes (a straight passthrough).
pub fn normalize_quotes(raw: Vec<RawQuoteShort>) -> Vec<RealtimeQuote> {
    raw.into_iter()
        .map(|r| RealtimeQuote {
            symbol: r.symbol,
            price: r.price,
            volume: r.volume,
        })
        .collect()
}

/// A market capitalization record, shared by the current and historical
/// endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMarketCap {
    pub symbol: String,
    pub date: String,
    #[serde(default)]
    pub market_cap: f64,
}

/// Normalize the current market capitalization: the vendor's `date` is
/// dropped, `marketCap` becomes `market_cap`.
pub fn normalize_market_cap_snapshots(raw: Vec<RawMarketCap>) -> Vec<MarketCapSnapshot> {
    raw.into_iter()
        .map(|r| MarketCapSnapshot {
            symbol: r.symbol,
            market_cap: r.market_cap,
        })
        .collect()
}

/// Normalize historical market capitalization records.
pub fn normalize_market_cap_points(raw: Vec<RawMarketCap>) -> FetchResult<Vec<MarketCapPoint>> {
    raw.into_iter()
        .map(|r| {
            Ok(MarketCapPoint {
                symbol: r.symbol,
                date: parse_date(&r.date)?,
                market_cap: r.market_cap,
            })
        })
        .collect()
}

// ============================================================================
// Index constituents
// ============================================================================

/// A constituent record as the vendor returns it. `cik` is dropped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConstituent {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub sub_sector: String,
    #[serde(default)]
    pub head_quarter: String,
    #[serde(default)]
    pub date_first_added: Option<String>,
    #[serde(default)]
    pub founded: Option<String>,
}

/// Normalize an index constituent list: `subSector` becomes `sub_sector`,
/// `headQuarter` becomes `hq`, `dateFirstAdded` becomes `date_added`.
pub fn normalize_constituents(raw: Vec<RawConstituent>) -> Vec<IndexConstituent> {
    raw.into_iter()
        .map(|r| IndexConstituent {
            symbol: r.symbol,
            name: r.name,
            sector: r.sector,
            sub_sector: r.sub_sector,
            hq: r.head_quarter,
            date_added: r.date_first_added,
            founded: r.founded,
        })
        .collect()
}

// ============================================================================
// Financial statements
// ============================================================================

/// An income statement as the vendor returns it.
///
/// `date` (period end), `reportedCurrency`, `cik`, `acceptedDate`, `period`,
/// `epsdiluted`, `weightedAverageShsOut`, `weightedAverageShsOutDil`,
/// `link` and `finalLink` are dropped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIncomeStatement {
    pub symbol: String,
    pub filling_date: String,
    pub calendar_year: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub cost_of_revenue: f64,
    #[serde(default)]
    pub gross_profit: f64,
    #[serde(default)]
    pub gross_profit_ratio: f64,
    #[serde(default)]
    pub research_and_development_expenses: f64,
    #[serde(default)]
    pub general_and_administrative_expenses: f64,
    #[serde(default)]
    pub selling_and_marketing_expenses: f64,
    #[serde(default)]
    pub selling_general_and_administrative_expenses: f64,
    #[serde(default)]
    pub other_expenses: f64,
    #[serde(default)]
    pub operating_expenses: f64,
    #[serde(default)]
    pub cost_and_expenses: f64,
    #[serde(default)]
    pub interest_income: f64,
    #[serde(default)]
    pub interest_expense: f64,
    #[serde(default)]
    pub depreciation_and_amortization: f64,
    #[serde(default)]
    pub ebitda: f64,
    /// Vendor key is the all-lowercase `ebitdaratio`
    #[serde(default)]
    pub ebitdaratio: f64,
    #[serde(default)]
    pub operating_income: f64,
    #[serde(default)]
    pub operating_income_ratio: f64,
    #[serde(default)]
    pub total_other_income_expenses_net: f64,
    #[serde(default)]
    pub income_before_tax: f64,
    #[serde(default)]
    pub income_before_tax_ratio: f64,
    #[serde(default)]
    pub income_tax_expense: f64,
    #[serde(default)]
    pub net_income: f64,
    #[serde(default)]
    pub net_income_ratio: f64,
    #[serde(default)]
    pub eps: f64,
}

/// Normalize income statements: the long vendor expense names shorten to the
/// canonical `*_exp` columns, the record is keyed by its parsed filing date,
/// and filings before 2000 are dropped.
pub fn normalize_income_statements(
    raw: Vec<RawIncomeStatement>,
) -> FetchResult<Vec<IncomeStatement>> {
    let mut out = Vec::with_capacity(raw.len());
    for r in raw {
        let date = parse_date(&r.filling_date)?;
        if date.year() < MIN_YEAR {
            continue;
        }
        out.push(IncomeStatement {
            symbol: r.symbol,
            year: parse_year(&r.calendar_year)?,
            revenue: r.revenue,
            cost_of_revenue: r.cost_of_revenue,
            gross_profit: r.gross_profit,
            gross_profit_ratio: r.gross_profit_ratio,
            r_and_d_exp: r.research_and_development_expenses,
            general_and_admin_exp: r.general_and_administrative_expenses,
            selling_and_marketing_exp: r.selling_and_marketing_expenses,
            selling_general_and_admin_exp: r.selling_general_and_administrative_expenses,
            other_exp: r.other_expenses,
            operating_exp: r.operating_expenses,
            cost_and_exp: r.cost_and_expenses,
            interest_income: r.interest_income,
            interest_expense: r.interest_expense,
            depreciation_and_amortization: r.depreciation_and_amortization,
            ebitda: r.ebitda,
            ebitda_ratio: r.ebitdaratio,
            operating_income: r.operating_income,
            operating_income_ratio: r.operating_income_ratio,
            total_other_income_exp_net: r.total_other_income_expenses_net,
            income_before_tax: r.income_before_tax,
            income_before_tax_ratio: r.income_before_tax_ratio,
            income_tax_expense: r.income_tax_expense,
            net_income: r.net_income,
            net_income_ratio: r.net_income_ratio,
            eps: r.eps,
            date,
        });
    }
    Ok(out)
}

/// A balance sheet as the vendor returns it.
///
/// `date` (period end), `reportedCurrency`, `cik`, `acceptedDate`, `period`,
/// `link` and `finalLink` are dropped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBalanceSheet {
    pub symbol: String,
    pub filling_date: String,
    pub calendar_year: String,
    #[serde(default)]
    pub cash_and_cash_equivalents: f64,
    #[serde(default)]
    pub short_term_investments: f64,
    #[serde(default)]
    pub cash_and_short_term_investments: f64,
    #[serde(default)]
    pub net_receivables: f64,
    #[serde(default)]
    pub inventory: f64,
    #[serde(default)]
    pub other_current_assets: f64,
    #[serde(default)]
    pub total_current_assets: f64,
    #[serde(default)]
    pub property_plant_equipment_net: f64,
    #[serde(default)]
    pub goodwill: f64,
    #[serde(default)]
    pub intangible_assets: f64,
    #[serde(default)]
    pub goodwill_and_intangible_assets: f64,
    #[serde(default)]
    pub long_term_investments: f64,
    #[serde(default)]
    pub tax_assets: f64,
    #[serde(default)]
    pub other_non_current_assets: f64,
    #[serde(default)]
    pub total_non_current_assets: f64,
    #[serde(default)]
    pub other_assets: f64,
    #[serde(default)]
    pub total_assets: f64,
    #[serde(default)]
    pub account_payables: f64,
    #[serde(default)]
    pub short_term_debt: f64,
    #[serde(default)]
    pub tax_payables: f64,
    #[serde(default)]
    pub deferred_revenue: f64,
    #[serde(default)]
    pub other_current_liabilities: f64,
    #[serde(default)]
    pub total_current_liabilities: f64,
    #[serde(default)]
    pub long_term_debt: f64,
    #[serde(default)]
    pub deferred_revenue_non_current: f64,
    #[serde(default)]
    pub deferred_tax_liabilities_non_current: f64,
    #[serde(default)]
    pub other_non_current_liabilities: f64,
    #[serde(default)]
    pub total_non_current_liabilities: f64,
    #[serde(default)]
    pub other_liabilities: f64,
    #[serde(default)]
    pub capital_lease_obligations: f64,
    #[serde(default)]
    pub total_liabilities: f64,
    #[serde(default)]
    pub preferred_stock: f64,
    #[serde(default)]
    pub common_stock: f64,
    #[serde(default)]
    pub retained_earnings: f64,
    #[serde(default)]
    pub accumulated_other_comprehensive_income_loss: f64,
    /// Vendor key is `othertotalStockholdersEquity`
    #[serde(default)]
    pub othertotal_stockholders_equity: f64,
    #[serde(default)]
    pub total_stockholders_equity: f64,
    #[serde(default)]
    pub total_equity: f64,
    #[serde(default)]
    pub total_liabilities_and_stockholders_equity: f64,
    #[serde(default)]
    pub minority_interest: f64,
    #[serde(default)]
    pub total_liabilities_and_total_equity: f64,
    #[serde(default)]
    pub total_investments: f64,
    #[serde(default)]
    pub total_debt: f64,
    #[serde(default)]
    pub net_debt: f64,
}

/// Normalize balance sheets. Two canonical targets are historically
/// misspelled (`minority_nterest`, `deferred_tax_liabilities_non_urrent`);
/// see [`BalanceSheet`].
pub fn normalize_balance_sheets(raw: Vec<RawBalanceSheet>) -> FetchResult<Vec<BalanceSheet>> {
    let mut out = Vec::with_capacity(raw.len());
    for r in raw {
        let date = parse_date(&r.filling_date)?;
        if date.year() < MIN_YEAR {
            continue;
        }
        out.push(BalanceSheet {
            symbol: r.symbol,
            year: parse_year(&r.calendar_year)?,
            cash_and_cash_equivalents: r.cash_and_cash_equivalents,
            short_term_investments: r.short_term_investments,
            cash_and_short_term_investments: r.cash_and_short_term_investments,
            net_receivables: r.net_receivables,
            inventory: r.inventory,
            other_current_assets: r.other_current_assets,
            total_current_assets: r.total_current_assets,
            property_plant_equipment_net: r.property_plant_equipment_net,
            goodwill: r.goodwill,
            intangible_assets: r.intangible_assets,
            goodwill_and_intangible_assets: r.goodwill_and_intangible_assets,
            long_term_investments: r.long_term_investments,
            tax_assets: r.tax_assets,
            other_non_current_assets: r.other_non_current_assets,
            total_non_current_assets: r.total_non_current_assets,
            other_assets: r.other_assets,
            total_assets: r.total_assets,
            account_payables: r.account_payables,
            short_term_debt: r.short_term_debt,
            tax_payables: r.tax_payables,
            deferred_revenue: r.deferred_revenue,
            other_current_liabilities: r.other_current_liabilities,
            total_current_liabilities: r.total_current_liabilities,
            long_term_debt: r.long_term_debt,
            deferred_revenue_non_current: r.deferred_revenue_non_current,
            deferred_tax_liabilities_non_urrent: r.deferred_tax_liabilities_non_current,
            other_non_current_liabilities: r.other_non_current_liabilities,
            total_non_current_liabilities: r.total_non_current_liabilities,
            other_liabilities: r.other_liabilities,
            capital_lease_obligations: r.capital_lease_obligations,
            total_liabilities: r.total_liabilities,
            preferred_stock: r.preferred_stock,
            common_stock: r.common_stock,
            retained_earnings: r.retained_earnings,
            accumulated_other_comprehensive_income_loss: r
                .accumulated_other_comprehensive_income_loss,
            other_total_stockholders_equity: r.othertotal_stockholders_equity,
            total_stockholders_equity: r.total_stockholders_equity,
            total_equity: r.total_equity,
            total_liabilities_and_stockholders_equity: r.total_liabilities_and_stockholders_equity,
            minority_nterest: r.minority_interest,
            total_liabilities_and_total_equity: r.total_liabilities_and_total_equity,
            total_investments: r.total_investments,
            total_debt: r.total_debt,
            net_debt: r.net_debt,
            date,
        });
    }
    Ok(out)
}

/// A cash flow statement as the vendor returns it.
///
/// `date` (period end), `reportedCurrency`, `cik`, `acceptedDate`, `period`,
/// `link` and `finalLink` are dropped. The `*Activites` spellings are the
/// vendor's own.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCashFlow {
    pub symbol: String,
    pub filling_date: String,
    pub calendar_year: String,
    #[serde(default)]
    pub net_income: f64,
    #[serde(default)]
    pub depreciation_and_amortization: f64,
    #[serde(default)]
    pub deferred_income_tax: f64,
    #[serde(default)]
    pub stock_based_compensation: f64,
    #[serde(default)]
    pub change_in_working_capital: f64,
    #[serde(default)]
    pub accounts_receivables: f64,
    #[serde(default)]
    pub inventory: f64,
    #[serde(default)]
    pub accounts_payables: f64,
    #[serde(default)]
    pub other_working_capital: f64,
    #[serde(default)]
    pub other_non_cash_items: f64,
    #[serde(default)]
    pub net_cash_provided_by_operating_activities: f64,
    #[serde(default)]
    pub investments_in_property_plant_and_equipment: f64,
    #[serde(default)]
    pub acquisitions_net: f64,
    #[serde(default)]
    pub purchases_of_investments: f64,
    #[serde(default)]
    pub sales_maturities_of_investments: f64,
    #[serde(default)]
    pub other_investing_activites: f64,
    #[serde(default)]
    pub net_cash_used_for_investing_activites: f64,
    #[serde(default)]
    pub debt_repayment: f64,
    #[serde(default)]
    pub common_stock_issued: f64,
    #[serde(default)]
    pub common_stock_repurchased: f64,
    #[serde(default)]
    pub dividends_paid: f64,
    #[serde(default)]
    pub other_financing_activites: f64,
    #[serde(default)]
    pub net_cash_used_provided_by_financing_activities: f64,
    #[serde(default)]
    pub effect_of_forex_changes_on_cash: f64,
    #[serde(default)]
    pub net_change_in_cash: f64,
    #[serde(default)]
    pub cash_at_end_of_period: f64,
    #[serde(default)]
    pub cash_at_beginning_of_period: f64,
    #[serde(default)]
    pub operating_cash_flow: f64,
    #[serde(default)]
    pub capital_expenditure: f64,
    #[serde(default)]
    pub free_cash_flow: f64,
}

/// Normalize cash flow statements.
pub fn normalize_cash_flows(raw: Vec<RawCashFlow>) -> FetchResult<Vec<CashFlow>> {
    let mut out = Vec::with_capacity(raw.len());
    for r in raw {
        let date = parse_date(&r.filling_date)?;
        if date.year() < MIN_YEAR {
            continue;
        }
        out.push(CashFlow {
            symbol: r.symbol,
            year: parse_year(&r.calendar_year)?,
            net_income: r.net_income,
            depreciation_and_amortization: r.depreciation_and_amortization,
            deferred_income_tax: r.deferred_income_tax,
            stock_based_compensation: r.stock_based_compensation,
            change_in_working_capital: r.change_in_working_capital,
            accounts_receivables: r.accounts_receivables,
            inventory: r.inventory,
            accounts_payables: r.accounts_payables,
            other_working_capital: r.other_working_capital,
            other_non_cash_items: r.other_non_cash_items,
            net_cash_provided_by_operating_activities: r.net_cash_provided_by_operating_activities,
            investments_in_property_plant_and_equipment: r
                .investments_in_property_plant_and_equipment,
            acquisitions_net: r.acquisitions_net,
            purchases_of_investments: r.purchases_of_investments,
            sales_maturities_of_investments: r.sales_maturities_of_investments,
            other_investing_activites: r.other_investing_activites,
            net_cash_used_for_investing_activites: r.net_cash_used_for_investing_activites,
            debt_repayment: r.debt_repayment,
            common_stock_issued: r.common_stock_issued,
            common_stock_repurchased: r.common_stock_repurchased,
            dividends_paid: r.dividends_paid,
            other_financing_activites: r.other_financing_activites,
            net_cash_used_provided_by_financing_activities: r
                .net_cash_used_provided_by_financing_activities,
            effect_of_forex_changes_on_cash: r.effect_of_forex_changes_on_cash,
            net_change_in_cash: r.net_change_in_cash,
            cash_at_end_of_period: r.cash_at_end_of_period,
            cash_at_beginning_of_period: r.cash_at_beginning_of_period,
            operating_cash_flow: r.operating_cash_flow,
            capital_expenditure: r.capital_expenditure,
            free_cash_flow: r.free_cash_flow,
            date,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn price_bar(vwap: Decimal) -> RawPriceBar {
        RawPriceBar {
            date: "2024-02-01".to_string(),
            open: dec!(100.0),
            high: dec!(102.5),
            low: dec!(99.5),
            close: dec!(101.25),
            volume: Some(dec!(1000000)),
            change: dec!(1.2512345),
            change_percent: dec!(1.2499999),
            vwap,
        }
    }

    #[test]
    fn test_price_bar_rounds_to_four_decimals() {
        let bars = normalize_price_bars(vec![price_bar(dec!(101.23456))], "aapl", AggKind::Equity)
            .unwrap();
        assert_eq!(bars[0].vwap, dec!(101.2346));
        assert_eq!(bars[0].change, dec!(1.2512));
        assert_eq!(bars[0].percent_change, dec!(1.2500));
        assert_eq!(bars[0].ticker, "AAPL");
    }

    #[test]
    fn test_forex_bars_lose_volume() {
        let bars =
            normalize_price_bars(vec![price_bar(dec!(1.0))], "EURUSD", AggKind::Forex).unwrap();
        assert_eq!(bars[0].volume, None);

        let bars =
            normalize_price_bars(vec![price_bar(dec!(1.0))], "^GSPC", AggKind::Index).unwrap();
        assert_eq!(bars[0].volume, None);
    }

    #[test]
    fn test_price_bar_wire_shape() {
        let json = r#"{
            "date": "2024-02-01",
            "open": 183.99,
            "high": 186.95,
            "low": 183.82,
            "close": 186.86,
            "adjClose": 186.1,
            "volume": 64885408,
            "unadjustedVolume": 64885408,
            "change": 2.87,
            "changePercent": 1.56,
            "vwap": 185.405,
            "label": "February 01, 24",
            "changeOverTime": 0.0156
        }"#;

        let raw: RawPriceBar = serde_json::from_str(json).unwrap();
        assert_eq!(raw.change_percent, dec!(1.56));
        assert_eq!(raw.volume, Some(dec!(64885408)));
    }

    #[test]
    fn test_dividends_keyed_by_declaration_date() {
        let raw = vec![RawDividend {
            date: "2024-02-09".to_string(),
            dividend: dec!(0.24),
            declaration_date: Some("2024-02-01".to_string()),
        }];

        let dividends = normalize_dividends(raw, "aapl").unwrap();
        assert_eq!(dividends[0].ticker, "AAPL");
        assert_eq!(
            dividends[0].date,
            Some(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
        );
    }

    #[test]
    fn test_dividends_filter_on_ex_date_year() {
        let raw = vec![
            RawDividend {
                date: "1999-05-21".to_string(),
                dividend: dec!(0.02),
                declaration_date: Some("1999-04-20".to_string()),
            },
            RawDividend {
                date: "2001-08-10".to_string(),
                dividend: dec!(0.04),
                declaration_date: None,
            },
        ];

        let dividends = normalize_dividends(raw, "XOM").unwrap();
        assert_eq!(dividends.len(), 1);
        assert_eq!(dividends[0].dividend, dec!(0.04));
        assert_eq!(dividends[0].date, None);
    }

    #[test]
    fn test_constituent_renames() {
        let json = r#"{
            "symbol": "MMM",
            "name": "3M",
            "sector": "Industrials",
            "subSector": "Industrial Conglomerates",
            "headQuarter": "Saint Paul, Minnesota",
            "dateFirstAdded": "1976-08-09",
            "cik": "0000066740",
            "founded": "1902"
        }"#;

        let raw: RawConstituent = serde_json::from_str(json).unwrap();
        let constituents = normalize_constituents(vec![raw]);
        assert_eq!(constituents[0].sub_sector, "Industrial Conglomerates");
        assert_eq!(constituents[0].hq, "Saint Paul, Minnesota");
        assert_eq!(constituents[0].date_added.as_deref(), Some("1976-08-09"));
    }

    #[test]
    fn test_market_cap_snapshot_drops_date() {
        let raw = vec![RawMarketCap {
            symbol: "AAPL".to_string(),
            date: "2024-02-01".to_string(),
            market_cap: 2_870_000_000_000.0,
        }];

        let snapshots = normalize_market_cap_snapshots(raw);
        assert_eq!(snapshots[0].market_cap, 2_870_000_000_000.0);
    }

    fn income_statement_json(filling_date: &str) -> String {
        format!(
            r#"{{
                "date": "2023-09-30",
                "symbol": "AAPL",
                "reportedCurrency": "USD",
                "cik": "0000320193",
                "fillingDate": "{filling_date}",
                "acceptedDate": "2023-11-02 18:08:27",
                "calendarYear": "2023",
                "period": "FY",
                "revenue": 383285000000.0,
                "costOfRevenue": 214137000000.0,
                "grossProfit": 169148000000.0,
                "grossProfitRatio": 0.4413,
                "researchAndDevelopmentExpenses": 29915000000.0,
                "generalAndAdministrativeExpenses": 0.0,
                "sellingAndMarketingExpenses": 0.0,
                "sellingGeneralAndAdministrativeExpenses": 24932000000.0,
                "otherExpenses": 0.0,
                "operatingExpenses": 54847000000.0,
                "costAndExpenses": 268984000000.0,
                "interestIncome": 3750000000.0,
                "interestExpense": 3933000000.0,
                "depreciationAndAmortization": 11519000000.0,
                "ebitda": 125820000000.0,
                "ebitdaratio": 0.3282,
                "operatingIncome": 114301000000.0,
                "operatingIncomeRatio": 0.2982,
                "totalOtherIncomeExpensesNet": -565000000.0,
                "incomeBeforeTax": 113736000000.0,
                "incomeBeforeTaxRatio": 0.2967,
                "incomeTaxExpense": 16741000000.0,
                "netIncome": 96995000000.0,
                "netIncomeRatio": 0.2531,
                "eps": 6.16,
                "epsdiluted": 6.13,
                "weightedAverageShsOut": 15744231000,
                "weightedAverageShsOutDil": 15812547000,
                "link": "https://www.sec.gov/...",
                "finalLink": "https://www.sec.gov/..."
            }}"#
        )
    }

    #[test]
    fn test_income_statement_keyed_by_filing_date() {
        let raw: RawIncomeStatement =
            serde_json::from_str(&income_statement_json("2023-11-03")).unwrap();
        let statements = normalize_income_statements(vec![raw]).unwrap();

        // keyed by fillingDate, not the 2023-09-30 period end
        assert_eq!(
            statements[0].date,
            NaiveDate::from_ymd_opt(2023, 11, 3).unwrap()
        );
        assert_eq!(statements[0].year, 2023);
        assert_eq!(statements[0].r_and_d_exp, 29915000000.0);
        assert_eq!(statements[0].ebitda_ratio, 0.3282);
    }

    #[test]
    fn test_income_statement_filters_on_filing_year() {
        let raw: RawIncomeStatement =
            serde_json::from_str(&income_statement_json("1999-12-22")).unwrap();
        let statements = normalize_income_statements(vec![raw]).unwrap();
        assert!(statements.is_empty());
    }

    #[test]
    fn test_income_statement_bad_year_is_a_decode_error() {
        let mut raw: RawIncomeStatement =
            serde_json::from_str(&income_statement_json("2023-11-03")).unwrap();
        raw.calendar_year = "FY23".to_string();
        assert!(matches!(
            normalize_income_statements(vec![raw]),
            Err(FetchError::Decode { .. })
        ));
    }

    #[test]
    fn test_balance_sheet_misspelled_targets() {
        let json = r#"{
            "date": "2023-09-30",
            "symbol": "AAPL",
            "fillingDate": "2023-11-03",
            "calendarYear": "2023",
            "minorityInterest": 12000000.0,
            "deferredTaxLiabilitiesNonCurrent": 34000000.0,
            "othertotalStockholdersEquity": 56000000.0
        }"#;

        let raw: RawBalanceSheet = serde_json::from_str(json).unwrap();
        let sheets = normalize_balance_sheets(vec![raw]).unwrap();
        assert_eq!(sheets[0].minority_nterest, 12000000.0);
        assert_eq!(sheets[0].deferred_tax_liabilities_non_urrent, 34000000.0);
        assert_eq!(sheets[0].other_total_stockholders_equity, 56000000.0);
    }

    #[test]
    fn test_cash_flow_vendor_spellings() {
        let json = r#"{
            "date": "2023-09-30",
            "symbol": "AAPL",
            "fillingDate": "2023-11-03",
            "calendarYear": "2023",
            "otherInvestingActivites": -1337000000.0,
            "netCashUsedForInvestingActivites": 3705000000.0,
            "freeCashFlow": 99584000000.0
        }"#;

        let raw: RawCashFlow = serde_json::from_str(json).unwrap();
        let flows = normalize_cash_flows(vec![raw]).unwrap();
        assert_eq!(flows[0].other_investing_activites, -1337000000.0);
        assert_eq!(flows[0].net_cash_used_for_investing_activites, 3705000000.0);
        assert_eq!(flows[0].free_cash_flow, 99584000000.0);
    }
}

//! Canonical index membership record.

use serde::Serialize;

use super::table::Table;

/// One company in an index constituent list (S&P 500, Dow Jones, Nasdaq).
///
/// The vendor's CIK identifier is dropped during normalization. The
/// `date_added` field stays a vendor string: it is nullable at the vendor
/// and is not one of the columns the store coerces to a date.
#[derive(Clone, Debug, Serialize)]
pub struct IndexConstituent {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub sub_sector: String,
    /// Headquarters location
    pub hq: String,
    pub date_added: Option<String>,
    pub founded: Option<String>,
}

impl IndexConstituent {
    /// Stored column order.
    pub const COLUMNS: [&'static str; 7] = [
        "symbol",
        "name",
        "sector",
        "sub_sector",
        "hq",
        "date_added",
        "founded",
    ];

    /// Convert a record set into its stored tabular shape.
    pub fn to_table(records: &[Self]) -> Table {
        let mut table = Table::new(Self::COLUMNS);
        for r in records {
            table.push_row(vec![
                r.symbol.clone().into(),
                r.name.clone().into(),
                r.sector.clone().into(),
                r.sub_sector.clone().into(),
                r.hq.clone().into(),
                r.date_added.clone().into(),
                r.founded.clone().into(),
            ]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constituent_table_shape() {
        let records = vec![IndexConstituent {
            symbol: "MMM".to_string(),
            name: "3M".to_string(),
            sector: "Industrials".to_string(),
            sub_sector: "Industrial Conglomerates".to_string(),
            hq: "Saint Paul, Minnesota".to_string(),
            date_added: Some("1976-08-09".to_string()),
            founded: Some("1902".to_string()),
        }];

        let table = IndexConstituent::to_table(&records);
        assert_eq!(table.columns(), &IndexConstituent::COLUMNS);
        assert!(table.column_index("cik").is_none());
    }
}

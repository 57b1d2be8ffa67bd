/// One record from the bank's tabular export, exactly as read from the file.
/// Exists only for the duration of an import.
#[derive(Debug, Clone)]
pub struct RawStatementRow {
    /// Bank-native 8-digit date, `YYYYMMDD`.
    pub date: String,
    /// Signed amount; direction is still encoded in the sign here.
    pub amount: f64,
    pub description: String,
    pub start_balance: Option<f64>,
    pub end_balance: Option<f64>,
    /// Bank-specific columns, read but dropped at the canonical reshape.
    pub currency: String,
    pub value_date: String,
    pub iban: String,
}

/// A normalized row ready for insert: parsed, reconciled and categorized,
/// but not yet assigned an `id` by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedRow {
    /// ISO 8601 calendar date.
    pub date: String,
    pub start_balance: Option<f64>,
    pub end_balance: Option<f64>,
    /// Always non-negative; direction lives in `incoming`.
    pub amount: f64,
    pub name: String,
    /// Remittance text; the reconciler may null this out.
    pub description: Option<String>,
    pub location: String,
    pub incoming: bool,
    pub category: String,
}

/// The persisted unit. Never updated in place; removed only by the
/// duplicate eliminator.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: i64,
    pub date: String,
    pub start_balance: Option<f64>,
    pub end_balance: Option<f64>,
    pub amount: f64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub incoming: bool,
    pub category: String,
}

/// Cost-of-ownership comparison between two expense ratios.
///
/// Each year both trajectories compound at the same gross return, net of
/// their own fee:
///
///   value_t = value_{t-1} * (1 + annual_return - expense_ratio)
///
/// A comparative illustration only: no variance, no taxes, no timing effects.

use crate::analytics::round_cents;

/// Gross annual return assumed when the caller does not supply one
pub const DEFAULT_ANNUAL_RETURN: f64 = 0.08;

/// Expense comparison inputs. Ratios are decimals: 0.0003 = 3 bps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpenseParams {
    pub principal: f64,
    pub years: u32,
    pub expense_ratio_a: f64,
    pub expense_ratio_b: f64,
    pub annual_return: f64,
}

impl ExpenseParams {
    pub fn new(principal: f64, years: u32, expense_ratio_a: f64, expense_ratio_b: f64) -> Self {
        Self {
            principal,
            years,
            expense_ratio_a,
            expense_ratio_b,
            annual_return: DEFAULT_ANNUAL_RETURN,
        }
    }

    pub fn with_annual_return(mut self, annual_return: f64) -> Self {
        self.annual_return = annual_return;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseProjectionRow {
    pub year: u32,
    pub value_a: f64,
    pub value_b: f64,
    pub savings: f64,
}

/// One row per year 1..=years. Compounding runs on unrounded values;
/// only the reported figures are rounded to cents.
pub fn project_expenses(params: &ExpenseParams) -> Vec<ExpenseProjectionRow> {
    let growth_a = 1.0 + params.annual_return - params.expense_ratio_a;
    let growth_b = 1.0 + params.annual_return - params.expense_ratio_b;

    let mut value_a = params.principal;
    let mut value_b = params.principal;

    (1..=params.years)
        .map(|year| {
            value_a *= growth_a;
            value_b *= growth_b;
            ExpenseProjectionRow {
                year,
                value_a: round_cents(value_a),
                value_b: round_cents(value_b),
                savings: round_cents((value_a - value_b).abs()),
            }
        })
        .collect()
}

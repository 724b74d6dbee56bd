use serde::{Deserialize, Serialize};

/// Monthly financial snapshot captured during onboarding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub existing_loans: f64,
    pub savings: f64,
    pub current_investments: f64,
}

impl FinancialProfile {
    pub fn monthly_surplus(&self) -> f64 {
        self.monthly_income - self.monthly_expenses
    }

    pub fn net_worth(&self) -> f64 {
        self.savings + self.current_investments - self.existing_loans
    }

    /// Share of income left after expenses, as a whole percentage (0 with no income).
    pub fn savings_rate_percent(&self) -> i64 {
        if self.monthly_income <= 0.0 {
            return 0;
        }
        (self.monthly_surplus() / self.monthly_income * 100.0).round() as i64
    }
}

/// Onboarding form field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    MonthlyIncome,
    MonthlyExpenses,
    ExistingLoans,
    Savings,
    CurrentInvestments,
}

impl ProfileField {
    pub const ALL: [ProfileField; 5] = [
        ProfileField::MonthlyIncome,
        ProfileField::MonthlyExpenses,
        ProfileField::ExistingLoans,
        ProfileField::Savings,
        ProfileField::CurrentInvestments,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::MonthlyIncome => "Monthly Income",
            ProfileField::MonthlyExpenses => "Monthly Expenses",
            ProfileField::ExistingLoans => "Existing Loans",
            ProfileField::Savings => "Savings",
            ProfileField::CurrentInvestments => "Current Investments",
        }
    }
}

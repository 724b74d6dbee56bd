//! Builds a validated financial profile from onboarding form input.

use smartspend_domain::{FinancialProfile, ProfileField};

use crate::CoreError;

pub struct ProfileService;

impl ProfileService {
    /// Parses the five onboarding answers in [`ProfileField::ALL`] order.
    pub fn from_fields(
        display_name: Option<&str>,
        answers: &[&str],
    ) -> Result<FinancialProfile, CoreError> {
        if answers.len() != ProfileField::ALL.len() {
            return Err(CoreError::Validation(format!(
                "expected {} values ({}), got {}",
                ProfileField::ALL.len(),
                field_labels(),
                answers.len()
            )));
        }
        let mut values = [0.0_f64; 5];
        for ((slot, field), raw) in values.iter_mut().zip(ProfileField::ALL).zip(answers) {
            *slot = parse_amount(field, raw)?;
        }
        let [monthly_income, monthly_expenses, existing_loans, savings, current_investments] =
            values;
        Ok(FinancialProfile {
            display_name: display_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            monthly_income,
            monthly_expenses,
            existing_loans,
            savings,
            current_investments,
        })
    }
}

fn parse_amount(field: ProfileField, raw: &str) -> Result<f64, CoreError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '$' | ','))
        .collect();
    if cleaned.is_empty() {
        return Err(CoreError::Validation(format!(
            "{} is required",
            field.label()
        )));
    }
    let value: f64 = cleaned.parse().map_err(|_| {
        CoreError::Validation(format!("{} must be a number, got `{}`", field.label(), raw))
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{} cannot be negative",
            field.label()
        )));
    }
    Ok(value)
}

fn field_labels() -> String {
    ProfileField::ALL
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

//! Calculator input structures and growth model selection

use serde::{Deserialize, Serialize};

use super::validator::{check_values, ValidationErrors};

/// Upper bound for monetary inputs (start amount, income, monthly savings)
pub const MAX_AMOUNT: f64 = 999_999_999.0;

/// Upper bound for percentage inputs
pub const MAX_PERCENT: f64 = 100.0;

/// Rule governing how the balance changes from one year to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthModel {
    /// Monthly contribution followed by monthly interest accrual (interest calculator)
    CompoundContribution,
    /// Yearly growth by a percentage, saving a share of each year's value (church tax calculator)
    AnnualCompounding,
}

impl GrowthModel {
    /// Short name used on the command line and in batch files
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthModel::CompoundContribution => "interest",
            GrowthModel::AnnualCompounding => "income",
        }
    }

    /// Parse a model name; accepts the short name or the variant name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "interest" | "compound" | "compoundcontribution" => Some(GrowthModel::CompoundContribution),
            "income" | "annual" | "annualcompounding" => Some(GrowthModel::AnnualCompounding),
            _ => None,
        }
    }
}

/// Identifies one of the three calculator inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Start amount, or annual income
    Principal,
    /// Interest rate, or salary increase (percent)
    Rate,
    /// Monthly savings amount, or savings percent
    Contribution,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Principal, Field::Rate, Field::Contribution];

    /// Human readable name of the field for the given calculator
    pub fn label(&self, model: GrowthModel) -> &'static str {
        match (model, self) {
            (GrowthModel::CompoundContribution, Field::Principal) => "Start Amount",
            (GrowthModel::CompoundContribution, Field::Rate) => "Interest Rate",
            (GrowthModel::CompoundContribution, Field::Contribution) => "Monthly Savings",
            (GrowthModel::AnnualCompounding, Field::Principal) => "Annual Income",
            (GrowthModel::AnnualCompounding, Field::Rate) => "Salary Increase",
            (GrowthModel::AnnualCompounding, Field::Contribution) => "Savings Percent",
        }
    }

    /// Closed range `(min, max)` the field must lie in
    pub fn bounds(&self, model: GrowthModel) -> (f64, f64) {
        match (model, self) {
            (_, Field::Principal) => (0.0, MAX_AMOUNT),
            (_, Field::Rate) => (0.0, MAX_PERCENT),
            (GrowthModel::CompoundContribution, Field::Contribution) => (0.0, MAX_AMOUNT),
            (GrowthModel::AnnualCompounding, Field::Contribution) => (0.0, MAX_PERCENT),
        }
    }

    /// Whether the field is expressed as a percentage
    pub fn is_percent(&self, model: GrowthModel) -> bool {
        self.bounds(model).1 == MAX_PERCENT
    }
}

/// Inputs exactly as entered, before parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInputs {
    pub model: GrowthModel,
    pub principal: String,
    pub rate: String,
    pub contribution: String,
}

impl RawInputs {
    pub fn new(
        model: GrowthModel,
        principal: impl Into<String>,
        rate: impl Into<String>,
        contribution: impl Into<String>,
    ) -> Self {
        Self {
            model,
            principal: principal.into(),
            rate: rate.into(),
            contribution: contribution.into(),
        }
    }

    /// Interest calculator inputs: start amount, annual interest %, monthly savings
    pub fn interest(
        start_amount: impl Into<String>,
        interest_rate: impl Into<String>,
        monthly_savings: impl Into<String>,
    ) -> Self {
        Self::new(GrowthModel::CompoundContribution, start_amount, interest_rate, monthly_savings)
    }

    /// Church tax calculator inputs: annual income, salary increase %, savings %
    pub fn income(
        annual_income: impl Into<String>,
        salary_increase: impl Into<String>,
        savings_percent: impl Into<String>,
    ) -> Self {
        Self::new(GrowthModel::AnnualCompounding, annual_income, salary_increase, savings_percent)
    }

    /// Raw text of a single field
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Principal => &self.principal,
            Field::Rate => &self.rate,
            Field::Contribution => &self.contribution,
        }
    }
}

/// Inputs that passed validation. Only obtainable through the validator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidatedInputs {
    model: GrowthModel,
    principal: f64,
    rate: f64,
    contribution: f64,
}

impl ValidatedInputs {
    /// Validate already-numeric inputs
    pub fn new(
        model: GrowthModel,
        principal: f64,
        rate: f64,
        contribution: f64,
    ) -> Result<Self, ValidationErrors> {
        check_values(model, Some(principal), Some(rate), Some(contribution))
    }

    pub(crate) fn from_checked(model: GrowthModel, principal: f64, rate: f64, contribution: f64) -> Self {
        Self { model, principal, rate, contribution }
    }

    pub fn model(&self) -> GrowthModel {
        self.model
    }

    /// Start amount or annual income
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Annual rate in percent
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Monthly savings amount (compound contribution) or savings percent (annual compounding)
    pub fn contribution(&self) -> f64 {
        self.contribution
    }

    /// Value of a single field
    pub fn field(&self, field: Field) -> f64 {
        match field {
            Field::Principal => self.principal,
            Field::Rate => self.rate,
            Field::Contribution => self.contribution,
        }
    }
}

//! Reference data types for payroll computation.
//!
//! This module contains the strongly-typed reference data consumed by the
//! engine: the component catalog, tax tables, contribution schemes,
//! currencies with their exchange rates, and the company policy that ties
//! them together. Everything here is deserializable from the YAML
//! configuration files read by [`super::ConfigLoader`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An ISO 4217 currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// The ISO code (e.g., "XAF").
    pub code: String,
    /// The human-readable name.
    pub name: String,
}

/// A dated conversion rate between two currencies.
///
/// Multiple rows may exist per pair; the engine selects the most recent
/// row on or before the period end. Rows are unique per
/// (base, quote, date), enforced at configuration load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// The source currency code.
    pub base: String,
    /// The target currency code.
    pub quote: String,
    /// The date the rate became effective.
    pub date: NaiveDate,
    /// Units of `quote` per unit of `base`.
    pub rate: Decimal,
}

/// The kind of a payroll component.
///
/// Earnings add to gross pay, deductions subtract from net pay, and
/// employer charges are recorded without touching the employee's net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Adds to gross pay.
    Earning,
    /// Subtracts from net pay.
    Deduction,
    /// Employer-side charge, excluded from net pay.
    Employer,
}

/// A catalog entry for a payroll line kind.
///
/// Components are immutable during a run; every payslip item references
/// one by code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollComponent {
    /// Unique catalog code (e.g., "BASIC", "ALW_TRANSPORT").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Whether the component is an earning, deduction or employer charge.
    pub kind: ComponentKind,
    /// Whether earning amounts on this component enter the taxable gross.
    #[serde(default = "default_true")]
    pub taxable: bool,
    /// Whether earning amounts on this component enter the contribution
    /// base.
    #[serde(default = "default_true")]
    pub contributory: bool,
    /// For deductions: whether the amount reduces the tax base. Post-tax
    /// deductions only reduce net pay.
    #[serde(default)]
    pub pre_tax: bool,
    /// Optional fixed percentage for components computed as a fraction
    /// of another base.
    #[serde(default)]
    pub percentage: Option<Decimal>,
    /// Display sequence on the payslip.
    #[serde(default = "default_sequence")]
    pub sequence: u32,
}

fn default_true() -> bool {
    true
}

fn default_sequence() -> u32 {
    100
}

/// One slab of a progressive tax table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive lower bound of the slab.
    pub lower: Decimal,
    /// Exclusive upper bound of the slab; `None` means unbounded.
    #[serde(default)]
    pub upper: Option<Decimal>,
    /// Marginal rate applied within the slab, as a fraction.
    pub rate: Decimal,
}

/// A progressive tax table with a validity window.
///
/// Brackets are kept sorted by `lower` and must partition taxable income
/// contiguously; [`PayrollConfig::new`] rejects tables that overlap or
/// leave gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxTable {
    /// ISO country code the table applies to.
    pub country: String,
    /// First day the table is in force.
    pub valid_from: NaiveDate,
    /// Last day the table is in force, `None` while current.
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
    /// The ordered slabs.
    pub brackets: Vec<TaxBracket>,
}

impl TaxTable {
    /// Returns true if the table is in force on the given date.
    pub fn valid_on(&self, date: NaiveDate) -> bool {
        self.valid_from <= date && self.valid_to.is_none_or(|end| end >= date)
    }
}

/// A statutory contribution scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionScheme {
    /// Unique scheme code (e.g., "PENSION").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Employee-side rate, as a fraction.
    pub ee_rate: Decimal,
    /// Employer-side rate, as a fraction.
    pub er_rate: Decimal,
    /// First day the scheme is in force.
    pub valid_from: NaiveDate,
    /// Last day the scheme is in force, `None` while current.
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
    /// Ceiling on the contribution base, when the scheme caps it.
    #[serde(default)]
    pub cap: Option<Decimal>,
    /// Whether contributory allowances count toward the base. When
    /// false the scheme contributes on the basic pay line alone.
    #[serde(default = "default_true")]
    pub include_taxable_allowances: bool,
}

impl ContributionScheme {
    /// Returns true if the scheme is in force on the given date.
    pub fn valid_on(&self, date: NaiveDate) -> bool {
        self.valid_from <= date && self.valid_to.is_none_or(|end| end >= date)
    }
}

/// How the fraction of a period an employee was active is counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProrationMethod {
    /// Every calendar day counts.
    #[default]
    Calendar,
    /// Only Monday through Friday count.
    Working,
}

/// What the currency converter does when no exchange rate row exists
/// for a pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingRatePolicy {
    /// Convert 1:1 and carry on. Lossy but never blocks a run.
    #[default]
    FallbackIdentity,
    /// Abort the computation with an error.
    Fail,
}

/// Company-level payroll knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyPolicy {
    /// Display name of the policy.
    pub name: String,
    /// ISO country code; selects the applicable tax tables.
    pub country: String,
    /// Settlement currency code every payslip is expressed in.
    pub currency: String,
    /// How proration fractions are counted.
    #[serde(default)]
    pub proration_method: ProrationMethod,
    /// What to do when a needed exchange rate is missing.
    #[serde(default)]
    pub missing_rate_policy: MissingRatePolicy,
    /// Day-of-month for payroll cutoff (1-28), advisory.
    #[serde(default)]
    pub cutoff_day: Option<u32>,
    /// Target pay date day-of-month (1-28), advisory.
    #[serde(default)]
    pub pay_day: Option<u32>,
}

/// The complete reference data set consumed by the engine.
///
/// This struct aggregates the policy, the component catalog, currencies
/// and exchange rates, tax tables and contribution schemes, validated
/// and pre-sorted so computation code can rely on its invariants.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    policy: CompanyPolicy,
    currencies: Vec<Currency>,
    /// Sorted by date ascending.
    exchange_rates: Vec<ExchangeRate>,
    /// Sorted by (sequence, code).
    components: Vec<PayrollComponent>,
    tax_tables: Vec<TaxTable>,
    contribution_schemes: Vec<ContributionScheme>,
}

impl PayrollConfig {
    /// Builds a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if:
    /// - the policy's settlement currency is not in the currency list
    /// - two components share a code
    /// - two exchange rate rows share (base, quote, date)
    /// - a tax table's brackets overlap or leave a gap when sorted by
    ///   `lower`
    pub fn new(
        policy: CompanyPolicy,
        currencies: Vec<Currency>,
        mut exchange_rates: Vec<ExchangeRate>,
        mut components: Vec<PayrollComponent>,
        mut tax_tables: Vec<TaxTable>,
        contribution_schemes: Vec<ContributionScheme>,
    ) -> EngineResult<Self> {
        if !currencies.iter().any(|c| c.code == policy.currency) {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "settlement currency '{}' is not a configured currency",
                    policy.currency
                ),
            });
        }

        let mut codes: Vec<&str> = components.iter().map(|c| c.code.as_str()).collect();
        codes.sort_unstable();
        if let Some(dup) = codes.windows(2).find(|w| w[0] == w[1]) {
            return Err(EngineError::InvalidConfig {
                message: format!("duplicate component code '{}'", dup[0]),
            });
        }

        exchange_rates.sort_by(|a, b| a.date.cmp(&b.date));
        let mut pairs: Vec<(&str, &str, NaiveDate)> = exchange_rates
            .iter()
            .map(|r| (r.base.as_str(), r.quote.as_str(), r.date))
            .collect();
        pairs.sort_unstable();
        if let Some(dup) = pairs.windows(2).find(|w| w[0] == w[1]) {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "duplicate exchange rate for {}->{} on {}",
                    dup[0].0, dup[0].1, dup[0].2
                ),
            });
        }

        components.sort_by(|a, b| a.sequence.cmp(&b.sequence).then(a.code.cmp(&b.code)));

        for table in &mut tax_tables {
            table
                .brackets
                .sort_by(|a, b| a.lower.cmp(&b.lower));
            for pair in table.brackets.windows(2) {
                if pair[0].upper != Some(pair[1].lower) {
                    return Err(EngineError::InvalidConfig {
                        message: format!(
                            "tax table for {} valid from {}: brackets must be contiguous",
                            table.country, table.valid_from
                        ),
                    });
                }
            }
        }

        Ok(Self {
            policy,
            currencies,
            exchange_rates,
            components,
            tax_tables,
            contribution_schemes,
        })
    }

    /// Returns the company policy.
    pub fn policy(&self) -> &CompanyPolicy {
        &self.policy
    }

    /// Returns the settlement currency code.
    pub fn settlement_currency(&self) -> &str {
        &self.policy.currency
    }

    /// Returns the configured currencies.
    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    /// Returns the component catalog, ordered by display sequence.
    pub fn components(&self) -> &[PayrollComponent] {
        &self.components
    }

    /// Looks up a component by code.
    pub fn component(&self, code: &str) -> EngineResult<&PayrollComponent> {
        self.components
            .iter()
            .find(|c| c.code == code)
            .ok_or_else(|| EngineError::ComponentNotFound {
                code: code.to_string(),
            })
    }

    /// Resolves the component used for the basic pay line.
    ///
    /// Prefers the component coded "BASIC"; otherwise falls back to the
    /// first earning-kind component in display order. With no earning
    /// component configured at all the run cannot be computed.
    pub fn basic_component(&self) -> EngineResult<&PayrollComponent> {
        if let Some(basic) = self.components.iter().find(|c| c.code == "BASIC") {
            return Ok(basic);
        }
        self.components
            .iter()
            .find(|c| c.kind == ComponentKind::Earning)
            .ok_or(EngineError::NoEarningComponent)
    }

    /// Returns the most recent exchange rate for (base, quote) on or
    /// before the given date.
    pub fn exchange_rate(&self, base: &str, quote: &str, on: NaiveDate) -> Option<Decimal> {
        // Rows are sorted by date ascending, so the last match wins.
        self.exchange_rates
            .iter()
            .rfind(|r| r.base == base && r.quote == quote && r.date <= on)
            .map(|r| r.rate)
    }

    /// Returns the tax table in force for the policy's country on the
    /// given date, preferring the most recent `valid_from`.
    pub fn active_tax_table(&self, on: NaiveDate) -> Option<&TaxTable> {
        self.tax_tables
            .iter()
            .filter(|t| t.country == self.policy.country && t.valid_on(on))
            .max_by_key(|t| t.valid_from)
    }

    /// Returns the contribution schemes in force on the given date.
    pub fn active_schemes(&self, on: NaiveDate) -> Vec<&ContributionScheme> {
        self.contribution_schemes
            .iter()
            .filter(|s| s.valid_on(on))
            .collect()
    }
}

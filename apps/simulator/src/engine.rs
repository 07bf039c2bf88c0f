use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::session::InputError;

/// The six user-entered figures, all in 万円.
///
/// Values are taken as entered. Negative or out-of-range numbers are not
/// rejected; [`SliderRange`] only describes the UI bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    pub capital: f64,
    pub loan: f64,
    pub property_price: f64,
    pub reform_cost: f64,
    /// Monthly.
    pub rent_income: f64,
    /// Monthly.
    pub expenses: f64,
}

impl Default for SimulationInput {
    fn default() -> Self {
        Self {
            capital: 100.0,
            loan: 900.0,
            property_price: 1000.0,
            reform_cost: 50.0,
            rent_income: 10.0,
            expenses: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutput {
    pub equity: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub is_solvent: bool,
    /// Percentage of liabilities over assets. `0` when there are no assets.
    pub debt_ratio: f64,
    /// Annual.
    pub cash_flow: f64,
}

/// Reform cost is not capitalised, so it comes straight out of equity.
pub fn simulate(input: &SimulationInput) -> SimulationOutput {
    let equity = input.capital - input.reform_cost;
    let total_assets = input.property_price;
    let total_liabilities = input.loan;
    let is_solvent = equity > 0.0 && total_assets > total_liabilities;
    let debt_ratio = if total_assets > 0.0 {
        total_liabilities / total_assets * 100.0
    } else {
        0.0
    };
    let cash_flow = (input.rent_income - input.expenses) * 12.0;

    SimulationOutput {
        equity,
        total_assets,
        total_liabilities,
        is_solvent,
        debt_ratio,
        cash_flow,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// One of the six inputs, with its display metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    Capital,
    Loan,
    PropertyPrice,
    ReformCost,
    RentIncome,
    Expenses,
}

impl InputField {
    /// Form order.
    pub const ALL: [InputField; 6] = [
        InputField::Capital,
        InputField::Loan,
        InputField::PropertyPrice,
        InputField::ReformCost,
        InputField::RentIncome,
        InputField::Expenses,
    ];

    /// camelCase key, shared with the JSON shape of [`SimulationInput`].
    pub fn key(self) -> &'static str {
        match self {
            InputField::Capital => "capital",
            InputField::Loan => "loan",
            InputField::PropertyPrice => "propertyPrice",
            InputField::ReformCost => "reformCost",
            InputField::RentIncome => "rentIncome",
            InputField::Expenses => "expenses",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InputField::Capital => "資本金",
            InputField::Loan => "社長貸付",
            InputField::PropertyPrice => "不動産取得価格",
            InputField::ReformCost => "リフォーム費用",
            InputField::RentIncome => "月間家賃収入",
            InputField::Expenses => "月間経費",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            InputField::Capital => "会社の自己資金です。",
            InputField::Loan => "社長からの借入金で、負債として計上されます。",
            InputField::PropertyPrice => "購入した不動産の価格で、資産となります。",
            InputField::ReformCost => "資産計上されにくい支出で、自己資本を減少させます。",
            InputField::RentIncome => "月々の家賃収入の合計です。",
            InputField::Expenses => "管理費、固定資産税、修繕費などの合計です。",
        }
    }

    pub fn range(self) -> SliderRange {
        let (min, max, step) = match self {
            InputField::Capital => (0.0, 1000.0, 10.0),
            InputField::Loan => (0.0, 5000.0, 100.0),
            InputField::PropertyPrice => (0.0, 10000.0, 100.0),
            InputField::ReformCost => (0.0, 500.0, 10.0),
            InputField::RentIncome => (0.0, 100.0, 1.0),
            InputField::Expenses => (0.0, 50.0, 1.0),
        };
        SliderRange { min, max, step }
    }

    pub fn get(self, input: &SimulationInput) -> f64 {
        match self {
            InputField::Capital => input.capital,
            InputField::Loan => input.loan,
            InputField::PropertyPrice => input.property_price,
            InputField::ReformCost => input.reform_cost,
            InputField::RentIncome => input.rent_income,
            InputField::Expenses => input.expenses,
        }
    }

    pub fn set(self, input: &mut SimulationInput, value: f64) {
        let slot = match self {
            InputField::Capital => &mut input.capital,
            InputField::Loan => &mut input.loan,
            InputField::PropertyPrice => &mut input.property_price,
            InputField::ReformCost => &mut input.reform_cost,
            InputField::RentIncome => &mut input.rent_income,
            InputField::Expenses => &mut input.expenses,
        };
        *slot = value;
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Accepts the camelCase key or its snake_case spelling.
impl FromStr for InputField {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "").to_ascii_lowercase();
        InputField::ALL
            .into_iter()
            .find(|field| field.key().to_ascii_lowercase() == wanted)
            .ok_or_else(|| InputError::UnknownField(s.trim().to_string()))
    }
}

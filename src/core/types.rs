use serde::Serialize;

/// Scenario inputs for one projection. Every rate is a fraction (0.05 for 5%);
/// percentages are normalized before an `Assumptions` is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumptions {
    pub home_value: f64,
    pub mortgage_rate: f64,
    pub maintenance_rate: f64,
    pub property_tax_rate: f64,
    pub home_growth_rate: f64,
    pub monthly_rent: f64,
    pub rent_growth_rate: f64,
    pub investment_return_rate: f64,
    pub loan_term_years: u32,
    pub down_payment_fraction: f64,
    pub years: u32,
}

/// Year-indexed output of the projection engine. All four series have
/// `years + 1` entries and share the same index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub down_payment: f64,
    pub monthly_payment: f64,
    pub net_worth_owning: Vec<f64>,
    pub net_worth_renting: Vec<f64>,
    pub owning_costs: Vec<f64>,
    pub renting_costs: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRow {
    pub year: u32,
    pub net_worth_owning: f64,
    pub net_worth_renting: f64,
    pub owning_cost: f64,
    pub renting_cost: f64,
}

impl Projection {
    /// Number of simulated years, excluding year 0.
    pub fn horizon(&self) -> u32 {
        self.net_worth_owning.len().saturating_sub(1) as u32
    }

    pub fn rows(&self) -> impl Iterator<Item = YearRow> + '_ {
        self.net_worth_owning
            .iter()
            .zip(&self.net_worth_renting)
            .zip(self.owning_costs.iter().zip(&self.renting_costs))
            .enumerate()
            .map(|(year, ((&owning, &renting), (&owning_cost, &renting_cost)))| YearRow {
                year: year as u32,
                net_worth_owning: owning,
                net_worth_renting: renting,
                owning_cost,
                renting_cost,
            })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Leader {
    Owning,
    Renting,
    Even,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub final_net_worth_owning: f64,
    pub final_net_worth_renting: f64,
    pub leader: Leader,
    pub final_advantage: f64,
    pub first_year_owning_ahead: Option<u32>,
    pub total_owning_cost: f64,
    pub total_renting_cost: f64,
}

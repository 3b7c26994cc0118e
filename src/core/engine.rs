use super::types::{Assumptions, Leader, Projection, ProjectionSummary};

const MONTHS_PER_YEAR: u32 = 12;
const EVEN_TOLERANCE: f64 = 0.01;

/// Level monthly payment that retires `principal` over `term_years` at
/// `annual_rate`. A zero rate degenerates to a straight-line payoff, and a
/// zero-length term has nothing to spread the principal over, so the whole
/// principal falls due at once.
pub fn monthly_payment(principal: f64, annual_rate: f64, term_years: u32) -> f64 {
    if term_years == 0 {
        return principal;
    }

    let total_months = f64::from(term_years) * f64::from(MONTHS_PER_YEAR);
    if annual_rate == 0.0 {
        return principal / total_months;
    }

    let monthly_rate = annual_rate / MONTHS_PER_YEAR as f64;
    monthly_rate * principal / (1.0 - (1.0 + monthly_rate).powf(-total_months))
}

/// Projects owning against renting-and-investing for `inputs.years` years.
///
/// The owner pays the mortgage plus maintenance and property tax on the
/// current home value; the renter invests whatever the owner would have spent
/// beyond rent (negative in years when rent is the dearer option). Both paths
/// start from the same capital, the down payment.
///
/// The balance is stepped once a year, which leaves a residual when the term
/// ends. That residual is paid off in the final term year as part of the
/// owning cost, so the renter's savings include it too.
pub fn project(inputs: &Assumptions) -> Projection {
    let years = inputs.years as usize;
    let down_payment = inputs.home_value * inputs.down_payment_fraction;
    let principal = inputs.home_value - down_payment;
    let payment = monthly_payment(principal, inputs.mortgage_rate, inputs.loan_term_years);

    let mut net_worth_owning = Vec::with_capacity(years + 1);
    let mut net_worth_renting = Vec::with_capacity(years + 1);
    let mut owning_costs = Vec::with_capacity(years + 1);
    let mut renting_costs = Vec::with_capacity(years + 1);
    net_worth_owning.push(down_payment);
    net_worth_renting.push(down_payment);
    owning_costs.push(0.0);
    renting_costs.push(0.0);

    let mut home_value = inputs.home_value;
    let mut outstanding = principal;
    let mut fund = down_payment;

    for year in 1..=inputs.years {
        let mut mortgage_paid = if year <= inputs.loan_term_years {
            payment * MONTHS_PER_YEAR as f64
        } else {
            0.0
        };
        outstanding -= mortgage_paid - outstanding * inputs.mortgage_rate;
        if year == inputs.loan_term_years {
            mortgage_paid += outstanding;
            outstanding = 0.0;
        }

        let owning_cost = mortgage_paid + carrying_cost(inputs, home_value);
        owning_costs.push(owning_cost);
        home_value *= 1.0 + inputs.home_growth_rate;
        net_worth_owning.push(home_value - outstanding);

        let rent = annual_rent(inputs, year);
        renting_costs.push(rent);
        fund += owning_cost - rent;
        fund *= 1.0 + inputs.investment_return_rate;
        net_worth_renting.push(fund);
    }

    Projection {
        down_payment,
        monthly_payment: payment,
        net_worth_owning,
        net_worth_renting,
        owning_costs,
        renting_costs,
    }
}

pub fn summarize(projection: &Projection) -> ProjectionSummary {
    let final_net_worth_owning = projection.net_worth_owning.last().copied().unwrap_or(0.0);
    let final_net_worth_renting = projection.net_worth_renting.last().copied().unwrap_or(0.0);
    let difference = final_net_worth_owning - final_net_worth_renting;
    let leader = if difference.abs() < EVEN_TOLERANCE {
        Leader::Even
    } else if difference > 0.0 {
        Leader::Owning
    } else {
        Leader::Renting
    };

    let first_year_owning_ahead = projection
        .rows()
        .skip(1)
        .find(|row| row.net_worth_owning >= row.net_worth_renting)
        .map(|row| row.year);

    ProjectionSummary {
        final_net_worth_owning,
        final_net_worth_renting,
        leader,
        final_advantage: difference.abs(),
        first_year_owning_ahead,
        total_owning_cost: projection.owning_costs.iter().sum(),
        total_renting_cost: projection.renting_costs.iter().sum(),
    }
}

fn carrying_cost(inputs: &Assumptions, home_value: f64) -> f64 {
    home_value * (inputs.maintenance_rate + inputs.property_tax_rate)
}

fn annual_rent(inputs: &Assumptions, year: u32) -> f64 {
    let growth = (1.0 + inputs.rent_growth_rate).powi(year as i32 - 1);
    inputs.monthly_rent * MONTHS_PER_YEAR as f64 * growth
}

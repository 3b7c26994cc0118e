use std::fmt::Write;

use crate::core::{Leader, Projection, ProjectionSummary};

const RULE_WIDTH: usize = 72;

/// Fixed-width year table followed by a short verdict, for terminal output.
pub fn render_table(projection: &Projection, summary: &ProjectionSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Down payment:     {:>14.2}", projection.down_payment);
    let _ = writeln!(out, "Monthly payment:  {:>14.2}", projection.monthly_payment);
    out.push('\n');
    let _ = writeln!(
        out,
        "{:>4} {:>16} {:>16} {:>16} {:>16}",
        "Year", "NW Owning", "NW Renting", "Owning Cost", "Rent Cost"
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    for row in projection.rows() {
        let _ = writeln!(
            out,
            "{:>4} {:>16.2} {:>16.2} {:>16.2} {:>16.2}",
            row.year, row.net_worth_owning, row.net_worth_renting, row.owning_cost, row.renting_cost
        );
    }

    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    let _ = writeln!(
        out,
        "{:>4} {:>16} {:>16} {:>16.2} {:>16.2}",
        "Sum", "", "", summary.total_owning_cost, summary.total_renting_cost
    );
    out.push('\n');
    out.push_str(&verdict(projection.horizon(), summary));
    out.push('\n');
    if let Some(year) = summary.first_year_owning_ahead {
        let _ = writeln!(out, "Owning first matches or beats renting in year {year}.");
    }
    out
}

fn verdict(horizon: u32, summary: &ProjectionSummary) -> String {
    match summary.leader {
        Leader::Owning => format!(
            "After {horizon} years owning is ahead by {:.2}.",
            summary.final_advantage
        ),
        Leader::Renting => format!(
            "After {horizon} years renting and investing is ahead by {:.2}.",
            summary.final_advantage
        ),
        Leader::Even => format!("After {horizon} years both paths end even."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::summarize;

    fn two_year_projection() -> Projection {
        Projection {
            down_payment: 0.0,
            monthly_payment: 100.0,
            net_worth_owning: vec![0.0, 1_200.0, 1_200.0],
            net_worth_renting: vec![0.0, 1_080.0, 960.0],
            owning_costs: vec![0.0, 1_200.0, 0.0],
            renting_costs: vec![0.0, 120.0, 120.0],
        }
    }

    #[test]
    fn table_has_one_line_per_year_and_totals() {
        let projection = two_year_projection();
        let table = render_table(&projection, &summarize(&projection));

        assert!(table.contains("Monthly payment:          100.00"));
        assert!(table.contains("   0             0.00             0.00"));
        assert!(table.contains("   2          1200.00           960.00             0.00           120.00"));
        assert!(table.contains(" Sum                                            1200.00           240.00"));
        assert!(table.contains("After 2 years owning is ahead by 240.00."));
        assert!(table.contains("year 1."));
    }

    #[test]
    fn verdict_names_renting_when_it_leads() {
        let mut projection = two_year_projection();
        projection.net_worth_renting = vec![0.0, 1_300.0, 1_500.0];
        let summary = summarize(&projection);

        let table = render_table(&projection, &summary);
        assert!(table.contains("renting and investing is ahead by 300.00"));
        assert!(!table.contains("Owning first"));
    }
}

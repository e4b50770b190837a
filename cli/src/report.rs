use crate::ranking::RankedRow;
use crate::season::Season;

/// Renders the ranking as the fixed-width text table printed to stdout.
pub fn render_report(goalie_name: &str, season: Season, rows: &[RankedRow]) -> String {
    let mut out = String::from("\n\n");
    out.push_str(&format!(
        "Players with the worst shooting percentage against {goalie_name} during the {season} season.\n"
    ));
    out.push_str("\n\n");

    for row in rows {
        let rate = format!("{:.3}", row.rate);
        out.push_str(&format!(
            "{:<30} {:<10} Scored {} of {} shots\n",
            row.shooter_name, rate, row.goals, row.shots
        ));
    }

    out.push_str("\n\n");
    out
}

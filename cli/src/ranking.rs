use std::cmp::Ordering;

use crate::tally::ShooterTally;

/// Rates closer than this are treated as equal.
pub const RATE_EPSILON: f64 = 0.001;

/// The report header always reads "worst shooting percentage"; that wording comes from the
/// original ascending output, which `BestSavePct` reproduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RankOrder {
    /// Shooters who scored most often against the goaltender first.
    #[default]
    WorstSavePct,
    /// Shooters who scored least often against the goaltender first.
    BestSavePct,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    pub shooter_id: u64,
    pub shooter_name: String,
    pub goals: u32,
    pub shots: u32,
    pub rate: f64,
}

/// Exact rate in the requested direction, then volume, name and id.
fn presort(a: &RankedRow, b: &RankedRow, order: RankOrder) -> Ordering {
    let by_rate = match order {
        RankOrder::WorstSavePct => b.rate.total_cmp(&a.rate),
        RankOrder::BestSavePct => a.rate.total_cmp(&b.rate),
    };

    by_rate
        .then_with(|| b.shots.cmp(&a.shots))
        .then_with(|| a.shooter_name.cmp(&b.shooter_name))
        .then_with(|| a.shooter_id.cmp(&b.shooter_id))
}

/// Whether `a` may sit directly above `b`. Rates within epsilon compare by volume first;
/// otherwise the rate direction decides. Exactly one of `precedes(a, b)` and
/// `precedes(b, a)` holds for distinct shooters, but the relation is not transitive.
fn precedes(a: &RankedRow, b: &RankedRow, order: RankOrder) -> bool {
    if (a.rate - b.rate).abs() < RATE_EPSILON {
        b.shots
            .cmp(&a.shots)
            .then_with(|| a.shooter_name.cmp(&b.shooter_name))
            .then_with(|| a.shooter_id.cmp(&b.shooter_id))
            == Ordering::Less
    } else {
        match order {
            RankOrder::WorstSavePct => a.rate > b.rate,
            RankOrder::BestSavePct => a.rate < b.rate,
        }
    }
}

/// Orders every shooter in the tally so that each row may directly precede the next:
/// either its rate is at least epsilon further toward the front, or the two rates are
/// within epsilon and it has at least as many shots. Ties settle by name then id.
///
/// `precedes` is not transitive, so rows are placed by insertion instead of a comparison
/// sort. Each row goes in front of the first row it precedes after a row that precedes it;
/// such a slot always exists because every pair is ordered one way or the other.
pub fn rank(tally: &ShooterTally, order: RankOrder) -> Vec<RankedRow> {
    let mut rows: Vec<RankedRow> = tally
        .iter()
        .map(|(shooter_id, record)| RankedRow {
            shooter_id,
            shooter_name: record.name.clone(),
            goals: record.goals,
            shots: record.shots,
            rate: f64::from(record.goals) / f64::from(record.shots),
        })
        .collect();
    rows.sort_by(|a, b| presort(a, b, order));

    let mut ranked: Vec<RankedRow> = Vec::with_capacity(rows.len());
    for row in rows {
        let slot = if ranked.first().map_or(true, |head| precedes(&row, head, order)) {
            0
        } else {
            // ranked[i] precedes row on entry to every iteration.
            let mut i = 0;
            while i + 1 < ranked.len() && !precedes(&row, &ranked[i + 1], order) {
                i += 1;
            }
            i + 1
        };
        ranked.insert(slot, row);
    }

    ranked
}

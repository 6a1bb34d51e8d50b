pub mod day;

use failure;
use pdf_canvas::Pdf;

use block::TimeBlock;
use error::ProjectionError;
use timeline::{interval_with, OvernightPolicy, TimelineInterval};

// Reexports
pub use self::day::DayReport;

/// A block together with where it goes on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<'a> {
    pub block: &'a TimeBlock,
    pub interval: TimelineInterval,
    /// Column the block is drawn in; overlapping blocks get separate lanes.
    pub lane: usize,
}

pub trait Report {
    fn render(
        &self,
        date: &str,
        placements: &[Placement],
        report_filename: &str,
    ) -> Result<Pdf, failure::Error>;
}

/// Projects every block, ordered by start position, and spreads
/// overlapping ones over lanes. Blocks that cannot be projected are
/// returned with their error.
pub fn place_blocks<'a>(
    blocks: &'a [TimeBlock],
    policy: OvernightPolicy,
) -> (Vec<Placement<'a>>, Vec<(&'a TimeBlock, ProjectionError)>) {
    let mut placed = Vec::new();
    let mut rejected = Vec::new();

    for block in blocks {
        match interval_with(&block.start_time, &block.end_time, policy) {
            Ok(interval) => {
                if interval.clipped {
                    warn!(
                        "Block {:?} ({} - {}) runs past midnight, clipped to the end of the day",
                        block.id, block.start_time, block.end_time
                    );
                }
                placed.push(Placement {
                    block,
                    interval,
                    lane: 0,
                })
            }
            Err(e) => {
                warn!("Skipping block {:?}: {}", block.id, e);
                rejected.push((block, e));
            }
        }
    }

    placed.sort_by(|a, b| {
        a.interval
            .start_percent
            .partial_cmp(&b.interval.start_percent)
            .unwrap_or(::std::cmp::Ordering::Equal)
    });

    let intervals: Vec<TimelineInterval> = placed.iter().map(|p| p.interval).collect();
    for (placement, lane) in placed.iter_mut().zip(assign_lanes(&intervals)) {
        placement.lane = lane;
    }

    (placed, rejected)
}

/// Greedy lane assignment over intervals sorted by start: each interval
/// takes the first lane whose last interval has ended by its start.
pub fn assign_lanes(intervals: &[TimelineInterval]) -> Vec<usize> {
    let mut lane_ends: Vec<f64> = Vec::new();

    intervals
        .iter()
        .map(|interval| {
            let free = lane_ends
                .iter()
                .position(|&end| end <= interval.start_percent);
            match free {
                Some(lane) => {
                    lane_ends[lane] = interval.end_percent;
                    lane
                }
                None => {
                    lane_ends.push(interval.end_percent);
                    lane_ends.len() - 1
                }
            }
        })
        .collect()
}

/// Number of lanes `placements` occupy.
pub fn lane_count(placements: &[Placement]) -> usize {
    placements.iter().map(|p| p.lane + 1).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use block::Style;

    fn block(id: &str, start: &str, end: &str) -> TimeBlock {
        TimeBlock {
            id: id.to_owned(),
            start_time: format!("2024-03-01T{}:00", start),
            end_time: format!("2024-03-01T{}:00", end),
            attached_user: None,
            style: Style::Trabajo,
            created_at: None,
        }
    }

    #[test]
    fn placements_are_sorted_and_lanes_reused() {
        let blocks = vec![
            block("late", "13:00", "15:00"),
            block("early", "08:00", "10:00"),
            block("overlap", "09:00", "11:00"),
            block("after", "10:00", "12:00"),
        ];
        let (placed, rejected) = place_blocks(&blocks, OvernightPolicy::Clip);

        assert!(rejected.is_empty());
        let order: Vec<(&str, usize)> = placed
            .iter()
            .map(|p| (p.block.id.as_str(), p.lane))
            .collect();
        assert_eq!(
            order,
            vec![("early", 0), ("overlap", 1), ("after", 0), ("late", 0)]
        );
        assert_eq!(lane_count(&placed), 2);
    }

    #[test]
    fn unplaceable_blocks_are_set_aside() {
        let mut broken = block("broken", "08:00", "09:00");
        broken.end_time = String::from("soon");
        let blocks = vec![broken, block("night", "23:00", "01:00")];

        let (placed, rejected) = place_blocks(&blocks, OvernightPolicy::Reject);
        assert!(placed.is_empty());
        assert_eq!(rejected.len(), 2);

        let (placed, rejected) = place_blocks(&blocks, OvernightPolicy::Clip);
        assert_eq!(placed.len(), 1);
        assert!(placed[0].interval.clipped);
        assert_eq!(rejected.len(), 1);
    }

    #[test]
    fn no_blocks_no_lanes() {
        let (placed, _) = place_blocks(&[], OvernightPolicy::Clip);
        assert_eq!(lane_count(&placed), 0);
    }
}

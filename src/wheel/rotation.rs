//! Computes how far to turn the wheel so a chosen sector lands under the pointer.

use std::time::Duration;

use rand::Rng;

use crate::wheel::{WheelKind, WheelLayout};

/// The clockwise rotation, in degrees, that brings the centre of sector `index` of `sector_count`
/// to the top pointer after `turns` whole extra turns.
pub fn target_rotation(index: usize, sector_count: usize, turns: u32) -> f64 {
    let arc = 360.0 / sector_count.max(1) as f64;
    let center = index as f64 * arc + arc / 2.0;

    f64::from(turns) * 360.0 + (360.0 - center)
}

/// How a spin should be animated.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinPlan {
    /// The sector the wheel stops on.
    pub sector_index: usize,
    /// Whether the winner actually has a sector.
    ///
    /// Winners past the first [MAX_SECTORS](crate::MAX_SECTORS) items have no sector, in which
    /// case the wheel stops on sector 0.
    pub visible: bool,
    /// Clockwise rotation in degrees from a resting position.
    pub rotation: f64,
    /// How long the animation runs.
    pub duration: Duration,
}

/// Plan the animation that lands on the sector of `winner_id`.
///
/// Returns `None` for an empty wheel.
pub fn plan_spin<R>(
    layout: &WheelLayout,
    winner_id: i64,
    kind: WheelKind,
    rng: &mut R,
) -> Option<SpinPlan>
where
    R: Rng + ?Sized,
{
    if layout.is_empty() {
        return None;
    }

    let located = layout.locate(winner_id);

    if located.is_none() {
        tracing::debug!("winner {winner_id} has no sector, stopping on the first sector");
    }

    let sector_index = located.unwrap_or(0);
    let turns = rng.random_range(kind.extra_turns());

    Some(SpinPlan {
        sector_index,
        visible: located.is_some(),
        rotation: target_rotation(sector_index, layout.sectors.len(), turns),
        duration: kind.spin_duration(),
    })
}

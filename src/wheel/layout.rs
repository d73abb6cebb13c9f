//! Maps items onto the sectors of the wheel.

use std::{ops::Range, time::Duration};

use serde::{Deserialize, Serialize};

use crate::restaurant::Category;

/// The most items that get a sector on the wheel.
pub const MAX_SECTORS: usize = 12;

/// Sector colours, assigned in order.
pub const PALETTE: [&str; MAX_SECTORS] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9", "#F8C471", "#82E0AA",
];

const LABEL_MAX_CHARS: usize = 12;
const LABEL_KEPT_CHARS: usize = 10;

/// Something that can be shown on a wheel sector.
pub trait WheelItem {
    /// The database ID used to match a spin winner to its sector.
    fn item_id(&self) -> i64;

    /// The full name of the item.
    fn label(&self) -> &str;

    /// The item's category, if it has one.
    fn category(&self) -> Option<Category> {
        None
    }
}

/// Which wheel is spinning. The two wheels differ only in their animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelKind {
    /// The meal wheel on the home page.
    Meal,
    /// The restaurant wheel, which can be narrowed to one category.
    Restaurant,
}

impl WheelKind {
    /// The range of whole extra turns added to a spin.
    pub fn extra_turns(self) -> Range<u32> {
        match self {
            WheelKind::Meal => 3..6,
            WheelKind::Restaurant => 4..7,
        }
    }

    /// How long the spin animation runs before the result is revealed.
    pub fn spin_duration(self) -> Duration {
        match self {
            WheelKind::Meal => Duration::from_secs(2),
            WheelKind::Restaurant => Duration::from_secs(3),
        }
    }

    /// Shown when a spin is requested on a wheel with nothing on it.
    pub fn empty_message(self) -> &'static str {
        match self {
            WheelKind::Meal => "No meals available! Please add some meals in the admin panel.",
            WheelKind::Restaurant => {
                "No restaurants available for the selected category! Please add some restaurants in the admin panel."
            }
        }
    }
}

/// One slice of the wheel.
///
/// Angles are in degrees, with 0 at the top pointer and increasing clockwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    /// Position of the sector, counting clockwise from the top.
    pub index: usize,
    /// The ID of the meal or restaurant shown on the sector.
    pub item_id: i64,
    /// The item name, shortened to fit.
    pub label: String,
    /// Fill colour as a CSS hex string.
    pub color: String,
    /// Where the sector begins.
    pub start_angle: f64,
    /// Where the sector ends.
    pub end_angle: f64,
}

impl Sector {
    /// The angle halfway along the sector's arc.
    pub fn center_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// The sectors for the first [MAX_SECTORS] items of a list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelLayout {
    /// The sectors in clockwise order.
    pub sectors: Vec<Sector>,
    /// How many items did not fit on the wheel.
    pub hidden_items: usize,
}

impl WheelLayout {
    /// Lay out `items` in their given order.
    pub fn new<T: WheelItem>(items: &[T]) -> Self {
        let shown = items.len().min(MAX_SECTORS);
        let sectors = items
            .iter()
            .take(shown)
            .enumerate()
            .map(|(index, item)| Sector {
                index,
                item_id: item.item_id(),
                label: truncate_label(item.label()),
                color: PALETTE[index % PALETTE.len()].to_owned(),
                start_angle: boundary_angle(index, shown),
                end_angle: boundary_angle(index + 1, shown),
            })
            .collect();

        Self {
            sectors,
            hidden_items: items.len() - shown,
        }
    }

    /// The angle each sector spans, or a full turn for an empty wheel.
    pub fn arc(&self) -> f64 {
        360.0 / self.sectors.len().max(1) as f64
    }

    /// Whether the wheel has no sectors.
    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    /// The index of the sector showing the item with `item_id`.
    pub fn locate(&self, item_id: i64) -> Option<usize> {
        self.sectors
            .iter()
            .position(|sector| sector.item_id == item_id)
    }

    /// The sector under the top pointer after the wheel has turned clockwise by `rotation`.
    pub fn sector_at_pointer(&self, rotation: f64) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        let angle = (-rotation).rem_euclid(360.0);
        let index = (angle / self.arc()).floor() as usize;

        Some(index.min(self.sectors.len() - 1))
    }
}

// Multiply before dividing so the last boundary is exactly 360.
fn boundary_angle(index: usize, sector_count: usize) -> f64 {
    (index as f64 * 360.0) / sector_count as f64
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() > LABEL_MAX_CHARS {
        let kept: String = label.chars().take(LABEL_KEPT_CHARS).collect();
        format!("{kept}...")
    } else {
        label.to_owned()
    }
}

#[cfg(test)]
pub(crate) mod test_items {
    use crate::{restaurant::Category, wheel::WheelItem};

    /// A minimal wheel item for exercising the layout and view model.
    #[derive(Debug, Clone, PartialEq)]
    pub struct TestItem {
        pub id: i64,
        pub name: String,
        pub category: Option<Category>,
    }

    impl WheelItem for TestItem {
        fn item_id(&self) -> i64 {
            self.id
        }

        fn label(&self) -> &str {
            &self.name
        }

        fn category(&self) -> Option<Category> {
            self.category
        }
    }

    pub fn test_items(count: i64) -> Vec<TestItem> {
        (1..=count)
            .map(|id| TestItem {
                id,
                name: format!("Item {id}"),
                category: None,
            })
            .collect()
    }
}

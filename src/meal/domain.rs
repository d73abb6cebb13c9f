//! Core meal domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, item::ItemText, wheel::WheelItem};

/// Database identifier for a meal.
pub type MealId = i64;

/// A home-cooked meal that can come up on the meal wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    /// The meal's ID in the application database.
    pub id: MealId,
    /// The name shown on the wheel, e.g. "Taco Tuesday".
    pub name: ItemText,
    /// What goes into the meal.
    pub ingredients: ItemText,
    /// When the meal was added.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl WheelItem for Meal {
    fn item_id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> &str {
        self.name.as_ref()
    }
}

/// A validated meal that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeal {
    pub name: ItemText,
    pub ingredients: ItemText,
}

impl NewMeal {
    /// Validate the raw form data.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyField] naming the first missing or blank field.
    pub fn from_form(form: &MealFormData) -> Result<Self, Error> {
        Ok(Self {
            name: ItemText::from_field("name", form.name.as_deref())?,
            ingredients: ItemText::from_field("ingredients", form.ingredients.as_deref())?,
        })
    }
}

/// Request body for meal creation and editing.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MealFormData {
    pub name: Option<String>,
    pub ingredients: Option<String>,
}

//! Core restaurant domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, item::ItemText, restaurant::Category, wheel::WheelItem};

/// Database identifier for a restaurant.
pub type RestaurantId = i64;

/// A place to eat out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    /// The restaurant's ID in the application database.
    pub id: RestaurantId,
    /// What the restaurant is called.
    pub name: ItemText,
    /// How formal the restaurant is.
    pub category: Category,
    /// Free text such as the cuisine or the address.
    pub details: ItemText,
    /// When the restaurant was added.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl WheelItem for Restaurant {
    fn item_id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> &str {
        self.name.as_ref()
    }

    fn category(&self) -> Option<Category> {
        Some(self.category)
    }
}

/// A validated restaurant that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    pub name: ItemText,
    pub category: Category,
    pub details: ItemText,
}

impl NewRestaurant {
    /// Validate the raw form data.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyField] naming the first missing or blank field, or
    /// [Error::InvalidCategory] if the category is not one of the known categories.
    pub fn from_form(form: &RestaurantFormData) -> Result<Self, Error> {
        let name = ItemText::from_field("name", form.name.as_deref())?;
        let category = match form.category.as_deref() {
            None => return Err(Error::EmptyField("category")),
            Some(category) if category.trim().is_empty() => {
                return Err(Error::EmptyField("category"));
            }
            Some(category) => category.parse()?,
        };
        let details = ItemText::from_field("details", form.details.as_deref())?;

        Ok(Self {
            name,
            category,
            details,
        })
    }
}

/// Request body for restaurant creation and editing.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RestaurantFormData {
    pub name: Option<String>,
    pub category: Option<String>,
    pub details: Option<String>,
}

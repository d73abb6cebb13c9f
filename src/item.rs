//! Validated text and response bodies shared by meals and restaurants.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A non-empty, trimmed piece of item text such as a name or description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ItemText(String);

impl ItemText {
    /// Create item text from user input for the field called `field`.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyField] if `text` is empty or only whitespace.
    pub fn new(field: &'static str, text: &str) -> Result<Self, Error> {
        let text = text.trim();

        if text.is_empty() {
            Err(Error::EmptyField(field))
        } else {
            Ok(Self(text.to_owned()))
        }
    }

    /// Create item text from an optional form field, treating a missing field as empty.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyField] if `text` is `None`, empty or only whitespace.
    pub fn from_field(field: &'static str, text: Option<&str>) -> Result<Self, Error> {
        Self::new(field, text.unwrap_or_default())
    }

    /// Create item text without validation.
    ///
    /// The caller should ensure that the string is trimmed and not empty.
    pub fn new_unchecked(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl AsRef<str> for ItemText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ItemText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The body returned by a successful create, update or delete.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    /// Always `true`; failures use the error body instead.
    pub success: bool,
    /// The ID of a newly created item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// A human readable summary.
    pub message: String,
}

impl MutationResponse {
    pub(crate) fn created(id: i64, message: &str) -> Self {
        Self {
            success: true,
            id: Some(id),
            message: message.to_owned(),
        }
    }

    pub(crate) fn done(message: &str) -> Self {
        Self {
            success: true,
            id: None,
            message: message.to_owned(),
        }
    }
}

#[cfg(test)]
mod item_text_tests {
    use crate::{Error, item::ItemText};

    #[test]
    fn new_fails_on_empty_string() {
        assert_eq!(ItemText::new("name", ""), Err(Error::EmptyField("name")));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        assert_eq!(
            ItemText::new("details", "\n\t \r"),
            Err(Error::EmptyField("details"))
        );
    }

    #[test]
    fn new_trims_input() {
        let text = ItemText::new("name", "  Pizza night \n").unwrap();

        assert_eq!(text.as_ref(), "Pizza night");
    }

    #[test]
    fn missing_field_is_empty() {
        assert_eq!(
            ItemText::from_field("ingredients", None),
            Err(Error::EmptyField("ingredients"))
        );
    }
}

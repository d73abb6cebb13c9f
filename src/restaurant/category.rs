//! The closed set of restaurant categories and the filter built on it.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::Error;

/// How formal an outing to the restaurant is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Formal dining.
    Formal,
    /// A casual sit-down meal.
    SitDown,
    /// Fast food and takeaway.
    QuickService,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [Category::Formal, Category::SitDown, Category::QuickService];

    /// The value used in requests and in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Formal => "formal",
            Category::SitDown => "sit-down",
            Category::QuickService => "quick-service",
        }
    }

    /// The human readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Formal => "Formal Dining",
            Category::SitDown => "Sit Down",
            Category::QuickService => "Quick Service",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| Error::InvalidCategory(value.to_owned()))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse().map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// Which restaurants to consider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// A single category.
    Only(Category),
}

impl CategoryFilter {
    /// Parse a filter from a query or body value.
    ///
    /// A missing value, an empty string and `"all"` all mean no filter. Values are matched
    /// exactly, so surrounding whitespace makes a value invalid.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCategory] for any other value that is not a category.
    pub fn parse(value: Option<&str>) -> Result<Self, Error> {
        match value {
            None | Some("") | Some("all") => Ok(CategoryFilter::All),
            Some(category) => category.parse().map(CategoryFilter::Only),
        }
    }

    /// Whether a restaurant in `category` passes the filter.
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(only) => only == category,
        }
    }

    /// The category to bind in a query, `None` for all.
    pub fn category(self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(category),
        }
    }
}

#[cfg(test)]
mod category_tests {
    use crate::Error;

    use super::{Category, CategoryFilter};

    #[test]
    fn parses_known_categories() {
        assert_eq!("formal".parse::<Category>(), Ok(Category::Formal));
        assert_eq!("sit-down".parse::<Category>(), Ok(Category::SitDown));
        assert_eq!("quick-service".parse::<Category>(), Ok(Category::QuickService));
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert_eq!(
            "fancy".parse::<Category>(),
            Err(Error::InvalidCategory("fancy".to_owned()))
        );
        assert!("Formal".parse::<Category>().is_err());
    }

    #[test]
    fn serde_uses_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Category::QuickService).unwrap(),
            "\"quick-service\""
        );
        assert_eq!(
            serde_json::from_str::<Category>("\"sit-down\"").unwrap(),
            Category::SitDown
        );
    }

    #[test]
    fn display_names() {
        let names: Vec<_> = Category::ALL.iter().map(|c| c.display_name()).collect();

        assert_eq!(names, ["Formal Dining", "Sit Down", "Quick Service"]);
    }

    #[test]
    fn filter_parsing() {
        assert_eq!(CategoryFilter::parse(None), Ok(CategoryFilter::All));
        assert_eq!(CategoryFilter::parse(Some("")), Ok(CategoryFilter::All));
        assert_eq!(CategoryFilter::parse(Some("all")), Ok(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::parse(Some("formal")),
            Ok(CategoryFilter::Only(Category::Formal))
        );
        assert_eq!(
            CategoryFilter::parse(Some("cheap")),
            Err(Error::InvalidCategory("cheap".to_owned()))
        );
    }

    #[test]
    fn filter_is_not_trimmed() {
        assert_eq!(
            CategoryFilter::parse(Some(" formal ")),
            Err(Error::InvalidCategory(" formal ".to_owned()))
        );
        assert!(CategoryFilter::parse(Some(" ")).is_err());
    }

    #[test]
    fn filter_matching() {
        assert!(CategoryFilter::All.matches(Category::SitDown));
        assert!(CategoryFilter::Only(Category::SitDown).matches(Category::SitDown));
        assert!(!CategoryFilter::Only(Category::Formal).matches(Category::SitDown));
    }
}

//! Output bucket classification.
//!
//! Every record lands in exactly one bucket, chosen by its `category` tag and
//! whether its `access` tag restricts the campsite to a closed group.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::CampsiteRecord;

/// `access` values that mark a campsite as private.
pub const PRIVATE_ACCESS_VALUES: [&str; 2] = ["private", "members"];

const CATEGORY_KEY: &str = "category";
const ACCESS_KEY: &str = "access";

/// Campsite category as assigned by the campsite service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Regular campsite.
    Standard,
    /// Naturist campsite.
    Nudist,
    /// Basic backcountry site.
    Backcountry,
    /// Camping without further classification.
    Camping,
    /// Caravan or motorhome site.
    Caravan,
    /// Site reserved for groups.
    GroupOnly,
}

impl Category {
    /// Every category in file-listing order.
    pub const ALL: [Self; 6] = [
        Self::Standard,
        Self::Nudist,
        Self::Backcountry,
        Self::Camping,
        Self::Caravan,
        Self::GroupOnly,
    ];

    /// Tag value naming the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Nudist => "nudist",
            Self::Backcountry => "backcountry",
            Self::Camping => "camping",
            Self::Caravan => "caravan",
            Self::GroupOnly => "group_only",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ClassifyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| ClassifyError::UnknownCategory {
                category: value.to_owned(),
            })
    }
}

/// Whether a campsite is open to the public.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Visibility {
    /// Open to everyone.
    #[default]
    Public,
    /// Restricted to members or invited guests.
    Private,
}

impl Visibility {
    /// Derive visibility from an `access` tag value.
    ///
    /// # Examples
    /// ```
    /// use campsite_core::Visibility;
    ///
    /// assert_eq!(Visibility::from_access(Some("members")), Visibility::Private);
    /// assert_eq!(Visibility::from_access(Some("customers")), Visibility::Public);
    /// assert_eq!(Visibility::from_access(None), Visibility::Public);
    /// ```
    #[must_use]
    pub fn from_access(access: Option<&str>) -> Self {
        match access {
            Some(value) if PRIVATE_ACCESS_VALUES.contains(&value) => Self::Private,
            _ => Self::Public,
        }
    }
}

/// Errors raised while classifying a record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassifyError {
    /// The record carries no textual `category` tag.
    #[error("record has no category")]
    MissingCategory,
    /// The `category` tag names no known bucket.
    #[error("unknown category {category:?}")]
    UnknownCategory {
        /// Category value found on the record.
        category: String,
    },
}

/// Identity of an output bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey {
    /// Campsite category.
    pub category: Category,
    /// Public or private access.
    pub visibility: Visibility,
}

impl BucketKey {
    /// Create a bucket key.
    #[must_use]
    pub const fn new(category: Category, visibility: Visibility) -> Self {
        Self {
            category,
            visibility,
        }
    }

    /// Select the bucket for a record.
    ///
    /// # Errors
    /// Returns [`ClassifyError`] when the `category` tag is missing or unknown.
    ///
    /// # Examples
    /// ```
    /// use campsite_core::{BucketKey, CampsiteRecord, Category, Tags, Visibility};
    ///
    /// let tags = Tags::from([("category", "caravan"), ("access", "private")]);
    /// let record = CampsiteRecord::new("node/7", None, tags);
    /// let key = BucketKey::classify(&record)?;
    /// assert_eq!(key, BucketKey::new(Category::Caravan, Visibility::Private));
    /// # Ok::<(), campsite_core::ClassifyError>(())
    /// ```
    pub fn classify(record: &CampsiteRecord) -> Result<Self, ClassifyError> {
        let tags = &record.properties;
        let category: Category = tags
            .text(CATEGORY_KEY)
            .ok_or(ClassifyError::MissingCategory)?
            .parse()?;
        Ok(Self::new(
            category,
            Visibility::from_access(tags.text(ACCESS_KEY)),
        ))
    }

    /// Name of the GPX file holding this bucket.
    ///
    /// Country runs pass the country code as `prefix`; bounding-box runs pass
    /// `None`.
    ///
    /// # Examples
    /// ```
    /// use campsite_core::{BucketKey, Category, Visibility};
    ///
    /// let key = BucketKey::new(Category::GroupOnly, Visibility::Private);
    /// assert_eq!(key.file_name(Some("de")), "de_group_only_private.gpx");
    /// assert_eq!(key.file_name(None), "group_only_private.gpx");
    /// ```
    #[must_use]
    pub fn file_name(&self, prefix: Option<&str>) -> String {
        match prefix {
            Some(prefix) => format!("{prefix}_{self}.gpx"),
            None => format!("{self}.gpx"),
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.visibility {
            Visibility::Public => write!(f, "{}", self.category),
            Visibility::Private => write!(f, "{}_private", self.category),
        }
    }
}

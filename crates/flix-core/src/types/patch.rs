//! Sparse record patches.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

use super::record::{validate_rating, validate_seasons, validate_title};
use super::ContentKind;

/// A sparse update to a [`ContentRecord`](super::ContentRecord).
///
/// Every field is explicitly present (`Some`) or absent (`None`). Absent
/// fields are left out of the serialized form. `duration`, `seasons` and
/// `director` are themselves optional on the record, so a present
/// `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContentKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub duration: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub seasons: Option<Option<u32>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub director: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<String>>,
}

/// A key that appears in the JSON is present, even when its value is null.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ContentPatch {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        *self == ContentPatch::default()
    }

    /// Fold a later patch into this one; fields present in `later` win.
    pub fn merge(&mut self, later: &ContentPatch) {
        fn take<T: Clone>(slot: &mut Option<T>, later: &Option<T>) {
            if let Some(value) = later {
                *slot = Some(value.clone());
            }
        }

        take(&mut self.kind, &later.kind);
        take(&mut self.title, &later.title);
        take(&mut self.slug, &later.slug);
        take(&mut self.genre, &later.genre);
        take(&mut self.description, &later.description);
        take(&mut self.image, &later.image);
        take(&mut self.watch_url, &later.watch_url);
        take(&mut self.year, &later.year);
        take(&mut self.rating, &later.rating);
        take(&mut self.duration, &later.duration);
        take(&mut self.seasons, &later.seasons);
        take(&mut self.director, &later.director);
        take(&mut self.cast, &later.cast);
    }

    /// Check the present fields against the record invariants.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(rating) = self.rating {
            validate_rating(rating)?;
        }
        if let Some(Some(seasons)) = self.seasons {
            validate_seasons(seasons)?;
        }
        Ok(())
    }
}

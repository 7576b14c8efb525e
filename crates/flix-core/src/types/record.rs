//! Catalog record types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

use super::{ContentId, ContentPatch, slugify};

/// Kind of catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Movie,
    Series,
}

impl ContentKind {
    /// Returns the lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Movie => "movie",
            ContentKind::Series => "series",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" | "movies" | "filme" | "filmes" => Ok(ContentKind::Movie),
            "series" | "serie" | "série" | "séries" => Ok(ContentKind::Series),
            other => Err(InvalidInputError::Other {
                message: format!("unknown content type '{}'", other),
            }
            .into()),
        }
    }
}

/// A single catalog entry.
///
/// The serialized shape matches the stored modification log: camelCase
/// field names and `type` for the kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub id: ContentId,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub genre: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub watch_url: String,
    pub year: i32,
    pub rating: f64,
    /// Running time, movies only (e.g. `"2h 22min"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Season count, series only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasons: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// Display order matters; duplicates are kept.
    #[serde(default)]
    pub cast: Vec<String>,
}

impl ContentRecord {
    /// Apply a patch field by field. Present fields win, absent ones keep
    /// their current value.
    pub fn apply(&mut self, patch: &ContentPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(slug) = &patch.slug {
            self.slug = slug.clone();
        }
        if let Some(genre) = &patch.genre {
            self.genre = genre.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(image) = &patch.image {
            self.image = image.clone();
        }
        if let Some(watch_url) = &patch.watch_url {
            self.watch_url = watch_url.clone();
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(duration) = &patch.duration {
            self.duration = duration.clone();
        }
        if let Some(seasons) = patch.seasons {
            self.seasons = seasons;
        }
        if let Some(director) = &patch.director {
            self.director = director.clone();
        }
        if let Some(cast) = &patch.cast {
            self.cast = cast.clone();
        }
    }

    /// Returns a copy with the patch applied.
    pub fn patched(&self, patch: &ContentPatch) -> Self {
        let mut record = self.clone();
        record.apply(patch);
        record
    }
}

/// A record without an identity, as submitted to `ContentStore::add`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDraft {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub title: String,
    /// Derived from the title when left empty.
    #[serde(default)]
    pub slug: String,
    pub genre: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub watch_url: String,
    pub year: i32,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasons: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Vec<String>,
}

impl ContentDraft {
    /// Start a draft with the required fields; the rest default to empty.
    pub fn new(kind: ContentKind, title: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            slug: String::new(),
            genre: genre.into(),
            description: String::new(),
            image: String::new(),
            watch_url: String::new(),
            year: 0,
            rating: 0.0,
            duration: None,
            seasons: match kind {
                ContentKind::Movie => None,
                ContentKind::Series => Some(1),
            },
            director: None,
            cast: Vec::new(),
        }
    }

    /// Check the draft against the record invariants.
    pub fn validate(&self) -> Result<(), Error> {
        validate_title(&self.title)?;
        validate_rating(self.rating)?;
        if let Some(seasons) = self.seasons {
            validate_seasons(seasons)?;
        }
        Ok(())
    }

    /// Turn the draft into a full record with the given id, deriving the
    /// slug from the title when none was supplied.
    pub fn into_record(self, id: ContentId) -> ContentRecord {
        let slug = if self.slug.trim().is_empty() {
            slugify(&self.title)
        } else {
            self.slug
        };

        ContentRecord {
            id,
            kind: self.kind,
            title: self.title,
            slug,
            genre: self.genre,
            description: self.description,
            image: self.image,
            watch_url: self.watch_url,
            year: self.year,
            rating: self.rating,
            duration: self.duration,
            seasons: self.seasons,
            director: self.director,
            cast: self.cast,
        }
    }
}

/// Split a comma-separated cast list, trimming names and dropping empties.
pub fn parse_cast(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn validate_title(title: &str) -> Result<(), Error> {
    if title.trim().is_empty() {
        return Err(InvalidInputError::Title.into());
    }
    Ok(())
}

pub(crate) fn validate_rating(rating: f64) -> Result<(), Error> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(InvalidInputError::Rating { value: rating }.into());
    }
    Ok(())
}

pub(crate) fn validate_seasons(seasons: u32) -> Result<(), Error> {
    if seasons == 0 {
        return Err(InvalidInputError::Seasons.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ContentRecord {
        ContentRecord {
            id: ContentId::new(1),
            kind: ContentKind::Movie,
            title: "A".to_string(),
            slug: "a".to_string(),
            genre: "Ação".to_string(),
            description: String::new(),
            image: String::new(),
            watch_url: String::new(),
            year: 2020,
            rating: 3.0,
            duration: Some("1h 30min".to_string()),
            seasons: None,
            director: Some("Someone".to_string()),
            cast: vec!["X".to_string(), "Y".to_string()],
        }
    }

    #[test]
    fn deserializes_original_shape() {
        let record: ContentRecord = serde_json::from_value(json!({
            "id": 7,
            "type": "series",
            "title": "Sex Education",
            "slug": "sex-education",
            "genre": "Comédia",
            "description": "",
            "image": "/img.jpg",
            "watchUrl": "https://example.com",
            "year": 2019,
            "rating": 4.5,
            "seasons": 4,
            "cast": ["Asa Butterfield"]
        }))
        .unwrap();

        assert_eq!(record.kind, ContentKind::Series);
        assert_eq!(record.watch_url, "https://example.com");
        assert_eq!(record.seasons, Some(4));
        assert_eq!(record.director, None);
    }

    #[test]
    fn patch_overrides_only_present_fields() {
        let patch = ContentPatch {
            rating: Some(5.0),
            ..ContentPatch::default()
        };
        let patched = sample().patched(&patch);
        assert_eq!(patched.rating, 5.0);
        assert_eq!(patched.title, "A");
        assert_eq!(patched.cast, vec!["X", "Y"]);
    }

    #[test]
    fn patch_can_clear_director() {
        let patch = ContentPatch {
            director: Some(None),
            ..ContentPatch::default()
        };
        assert_eq!(sample().patched(&patch).director, None);
    }

    #[test]
    fn patch_can_turn_a_movie_into_a_series() {
        let patch = ContentPatch {
            kind: Some(ContentKind::Series),
            duration: Some(None),
            seasons: Some(Some(2)),
            ..ContentPatch::default()
        };
        let patched = sample().patched(&patch);
        assert_eq!(patched.kind, ContentKind::Series);
        assert_eq!(patched.duration, None);
        assert_eq!(patched.seasons, Some(2));
    }

    #[test]
    fn draft_derives_slug() {
        let draft = ContentDraft::new(ContentKind::Movie, "Jogos Vorazes", "Ação");
        let record = draft.into_record(ContentId::new(99));
        assert_eq!(record.slug, "jogos-vorazes");
        assert_eq!(record.id, ContentId::new(99));
    }

    #[test]
    fn draft_keeps_explicit_slug() {
        let mut draft = ContentDraft::new(ContentKind::Movie, "Jogos Vorazes", "Ação");
        draft.slug = "hunger-games".to_string();
        assert_eq!(draft.into_record(ContentId::new(1)).slug, "hunger-games");
    }

    #[test]
    fn draft_validation() {
        let mut draft = ContentDraft::new(ContentKind::Series, "Dark", "Drama");
        draft.rating = 4.0;
        assert!(draft.validate().is_ok());

        draft.rating = 5.5;
        assert!(draft.validate().is_err());

        draft.rating = 4.0;
        draft.seasons = Some(0);
        assert!(draft.validate().is_err());

        draft.seasons = Some(3);
        draft.title = "   ".to_string();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn nan_rating_is_rejected() {
        assert!(validate_rating(f64::NAN).is_err());
    }

    #[test]
    fn cast_parsing_trims_and_drops_empties() {
        assert_eq!(
            parse_cast(" Ana , Bruno,, Ana ,"),
            vec!["Ana", "Bruno", "Ana"]
        );
    }

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("Filmes".parse::<ContentKind>().unwrap(), ContentKind::Movie);
        assert_eq!("series".parse::<ContentKind>().unwrap(), ContentKind::Series);
        assert!("podcast".parse::<ContentKind>().is_err());
    }
}

//! Read-only views over an effective catalog.
//!
//! These are the lookups the browsing surfaces need: listing by kind or
//! genre, free-text search, slug routing and "more like this".

use serde::Serialize;

use crate::types::{ContentKind, ContentRecord};

/// Number of related titles shown next to a record.
pub const RELATED_LIMIT: usize = 4;

/// Combined search filter. Unset parts match everything.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Case-insensitive substring of title, genre or description.
    pub text: Option<String>,
    /// Exact genre.
    pub genre: Option<String>,
    pub kind: Option<ContentKind>,
}

impl CatalogQuery {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn kind(mut self, kind: ContentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Whether a single record passes every set filter.
    pub fn matches(&self, record: &ContentRecord) -> bool {
        if let Some(kind) = self.kind
            && record.kind != kind
        {
            return false;
        }

        if let Some(genre) = &self.genre
            && &record.genre != genre
        {
            return false;
        }

        match self.text.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(text) => {
                let needle = text.to_lowercase();
                [&record.title, &record.genre, &record.description]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
        }
    }

    /// Matching records in catalog order.
    pub fn filter<'a>(&self, records: &'a [ContentRecord]) -> Vec<&'a ContentRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Records of one kind, in catalog order.
pub fn of_kind(records: &[ContentRecord], kind: ContentKind) -> Vec<&ContentRecord> {
    CatalogQuery::default().kind(kind).filter(records)
}

/// Records of one genre, in catalog order.
pub fn in_genre<'a>(records: &'a [ContentRecord], genre: &str) -> Vec<&'a ContentRecord> {
    CatalogQuery::default().genre(genre).filter(records)
}

/// Distinct genres in first-seen order.
pub fn genres(records: &[ContentRecord]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for record in records {
        if !out.contains(&record.genre.as_str()) {
            out.push(&record.genre);
        }
    }
    out
}

/// First record of `kind` whose slug matches.
///
/// Slugs are not unique; a later record with the same slug is unreachable
/// through this lookup.
pub fn find_by_slug<'a>(
    records: &'a [ContentRecord],
    kind: ContentKind,
    slug: &str,
) -> Option<&'a ContentRecord> {
    records.iter().find(|r| r.kind == kind && r.slug == slug)
}

/// Other records of the same kind and genre, at most `limit`.
pub fn related<'a>(
    records: &'a [ContentRecord],
    record: &ContentRecord,
    limit: usize,
) -> Vec<&'a ContentRecord> {
    records
        .iter()
        .filter(|r| r.kind == record.kind && r.genre == record.genre && r.id != record.id)
        .take(limit)
        .collect()
}

/// Overview counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub movies: usize,
    pub series: usize,
    pub total: usize,
}

impl CatalogStats {
    pub fn of(records: &[ContentRecord]) -> Self {
        let movies = records
            .iter()
            .filter(|r| r.kind == ContentKind::Movie)
            .count();
        Self {
            movies,
            series: records.len() - movies,
            total: records.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentDraft, ContentId};

    fn rec(id: i64, kind: ContentKind, title: &str, genre: &str, description: &str) -> ContentRecord {
        let mut draft = ContentDraft::new(kind, title, genre);
        draft.description = description.to_string();
        draft.into_record(ContentId::new(id))
    }

    fn catalog() -> Vec<ContentRecord> {
        vec![
            rec(1, ContentKind::Movie, "Jogos Vorazes", "Ação", "Arena de sobrevivência"),
            rec(2, ContentKind::Movie, "Toy Story", "Animação", "Brinquedos vivos"),
            rec(3, ContentKind::Series, "Sex Education", "Comédia", "Escola e terapia"),
            rec(4, ContentKind::Movie, "Mad Max", "Ação", "Deserto"),
            rec(5, ContentKind::Series, "Arcane", "Animação", "Irmãs em guerra"),
            rec(6, ContentKind::Movie, "John Wick", "Ação", "Vingança"),
            rec(7, ContentKind::Movie, "Duna", "Ação", "Areia"),
            rec(8, ContentKind::Movie, "Top Gun", "Ação", "Pilotos"),
        ]
    }

    fn ids(records: &[&ContentRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id.get()).collect()
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let records = catalog();
        assert_eq!(ids(&CatalogQuery::default().text("VORAZES").filter(&records)), vec![1]);
        assert_eq!(ids(&CatalogQuery::default().text("animação").filter(&records)), vec![2, 5]);
        assert_eq!(ids(&CatalogQuery::default().text("terapia").filter(&records)), vec![3]);
    }

    #[test]
    fn blank_text_matches_all() {
        let records = catalog();
        assert_eq!(CatalogQuery::default().text("   ").filter(&records).len(), records.len());
    }

    #[test]
    fn filters_combine() {
        let records = catalog();
        let query = CatalogQuery::default()
            .text("a")
            .genre("Animação")
            .kind(ContentKind::Series);
        assert_eq!(ids(&query.filter(&records)), vec![5]);
    }

    #[test]
    fn kind_and_genre_views() {
        let records = catalog();
        assert_eq!(ids(&of_kind(&records, ContentKind::Series)), vec![3, 5]);
        assert_eq!(ids(&in_genre(&records, "Ação")), vec![1, 4, 6, 7, 8]);
    }

    #[test]
    fn genres_in_first_seen_order() {
        assert_eq!(genres(&catalog()), vec!["Ação", "Animação", "Comédia"]);
    }

    #[test]
    fn slug_lookup_respects_kind() {
        let records = catalog();
        assert_eq!(
            find_by_slug(&records, ContentKind::Series, "sex-education").map(|r| r.id.get()),
            Some(3)
        );
        assert!(find_by_slug(&records, ContentKind::Movie, "sex-education").is_none());
    }

    #[test]
    fn slug_collision_returns_first() {
        let mut records = catalog();
        records.push(rec(9, ContentKind::Movie, "Mad  Max!", "Ação", ""));
        assert_eq!(
            find_by_slug(&records, ContentKind::Movie, "mad-max").map(|r| r.id.get()),
            Some(4)
        );
    }

    #[test]
    fn related_excludes_self_and_caps() {
        let records = catalog();
        let related = related(&records, &records[0], RELATED_LIMIT);
        assert_eq!(ids(&related), vec![4, 6, 7, 8]);
    }

    #[test]
    fn stats_count_kinds() {
        assert_eq!(
            CatalogStats::of(&catalog()),
            CatalogStats {
                movies: 6,
                series: 2,
                total: 8
            }
        );
    }
}

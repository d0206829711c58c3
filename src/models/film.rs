use crate::domain::FilmId;
use serde::{Deserialize, Deserializer, Serialize};

/// Shown when a film carries neither a Russian nor an English name.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// One entry of `GET /api/v2.1/films/search-by-keyword`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSearchFilm {
    pub film_id: i64,
    #[serde(default)]
    pub name_ru: Option<String>,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
}

/// Envelope of the keyword search response.
#[derive(Debug, Deserialize)]
pub struct KeywordSearchResponse {
    #[serde(default)]
    pub films: Vec<KeywordSearchFilm>,
}

/// Body of `GET /api/v2.2/films/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmDetails {
    #[serde(default)]
    pub name_ru: Option<String>,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating_imdb: Option<f64>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating_kinopoisk: Option<f64>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub poster_url_preview: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default, rename = "kinopoiskHDId")]
    pub kinopoisk_hd_id: Option<String>,
}

impl FilmDetails {
    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(self.name_ru.as_deref(), self.name_en.as_deref())
    }

    /// Preview poster first, full-size poster as a fallback.
    #[must_use]
    pub fn poster(&self) -> Option<&str> {
        non_blank(self.poster_url_preview.as_deref())
            .or_else(|| non_blank(self.poster_url.as_deref()))
    }

    /// Short description if present, otherwise the long one.
    #[must_use]
    pub fn best_description(&self) -> Option<&str> {
        non_blank(self.short_description.as_deref())
            .or_else(|| non_blank(self.description.as_deref()))
    }
}

impl KeywordSearchFilm {
    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(self.name_ru.as_deref(), self.name_en.as_deref())
    }
}

/// Derives a display name: Russian name, then English name, then [`UNKNOWN_TITLE`].
///
/// Blank names count as absent. Never fails to produce a string.
#[must_use]
pub fn display_name(primary: Option<&str>, secondary: Option<&str>) -> String {
    non_blank(primary)
        .or_else(|| non_blank(secondary))
        .unwrap_or(UNKNOWN_TITLE)
        .to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// A film in the bounded list offered to the user after a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchCandidate {
    pub film_id: FilmId,
    pub display_name: String,
    pub year: Option<i32>,
}

impl From<&KeywordSearchFilm> for SearchCandidate {
    fn from(film: &KeywordSearchFilm) -> Self {
        Self {
            film_id: FilmId::new(film.film_id),
            display_name: film.display_name(),
            year: film.year,
        }
    }
}

/// Result of enriching one selected film. Built once per selection and never stored as a unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedFilm {
    pub film_id: FilmId,
    pub title: String,
    pub year: Option<i32>,
    pub poster_url: Option<String>,
    pub summary: String,
    pub external_link: Option<String>,
    /// How many times this user has selected the film, including this selection.
    pub view_count: i32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Accepts `2003`, `"2003"` and ranges like `"1999-2003"` (first year wins).
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<NumberOrText> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        NumberOrText::Integer(n) => i32::try_from(n).ok(),
        #[allow(clippy::cast_possible_truncation)]
        NumberOrText::Float(f) => Some(f as i32),
        NumberOrText::Text(s) => parse_year(&s),
    }))
}

/// Accepts numbers and numeric strings; anything else (including `"null"`) is absent.
fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<NumberOrText> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        #[allow(clippy::cast_precision_loss)]
        NumberOrText::Integer(n) => Some(n as f64),
        NumberOrText::Float(f) => Some(f),
        NumberOrText::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
    }))
}

#[must_use]
pub fn parse_year(text: &str) -> Option<i32> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    if digits.len() == 4 {
        digits.parse().ok()
    } else {
        None
    }
}

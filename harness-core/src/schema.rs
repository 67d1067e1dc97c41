//! Canonical wire schema for movies and reviews.
//!
//! Field names are configuration, not code: the hosted API has been seen
//! speaking two dialects (`title`/`movieId`/`text` and
//! `name`/`movieID`/`reviewText`), so every payload is rendered through a
//! [`Schema`] instead of hardcoding either one.

use crate::fixture::ResourceKind;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Name of the server-assigned identifier on every record.
pub const ID_FIELD: &str = "id";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub movie_title: String,
    pub movie_genre: String,
    pub movie_release_year: String,
    pub review_movie_ref: String,
    pub review_text: String,
    pub review_rating: String,
}

impl Default for Schema {
    fn default() -> Self {
        Self::canonical()
    }
}

impl Schema {
    pub fn canonical() -> Self {
        Self {
            movie_title: "title".to_string(),
            movie_genre: "genre".to_string(),
            movie_release_year: "releaseYear".to_string(),
            review_movie_ref: "movieId".to_string(),
            review_text: "text".to_string(),
            review_rating: "rating".to_string(),
        }
    }

    /// The older dialect still served by some mock API projects.
    pub fn legacy() -> Self {
        Self {
            movie_title: "name".to_string(),
            review_movie_ref: "movieID".to_string(),
            review_text: "reviewText".to_string(),
            ..Self::canonical()
        }
    }

    /// Fields every listed record of `kind` must carry.
    pub fn required_fields(&self, kind: ResourceKind) -> Vec<&str> {
        match kind {
            ResourceKind::Movies => vec![ID_FIELD, self.movie_title.as_str()],
            ResourceKind::Reviews => vec![
                ID_FIELD,
                self.review_movie_ref.as_str(),
                self.review_text.as_str(),
            ],
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let movie = [
            &self.movie_title,
            &self.movie_genre,
            &self.movie_release_year,
        ];
        let review = [&self.review_movie_ref, &self.review_text, &self.review_rating];

        for fields in [&movie[..], &review[..]] {
            for (i, name) in fields.iter().enumerate() {
                if name.trim().is_empty() {
                    return Err("schema field names must not be empty".to_string());
                }
                if name.as_str() == ID_FIELD {
                    return Err(format!("schema field '{}' collides with the id field", name));
                }
                if fields[i + 1..].contains(name) {
                    return Err(format!("schema field '{}' is declared twice", name));
                }
            }
        }

        Ok(())
    }
}

/// Render a JSON scalar id as text. Strings and integers are accepted since
/// the hosted API hands out string ids while other backends use numbers.
pub fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Server-assigned id of a record, if present and non-empty.
pub fn record_id(record: &Value) -> Option<String> {
    record.get(ID_FIELD).and_then(id_text)
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub genre: String,
    pub release_year: Option<i64>,
}

impl NewMovie {
    pub fn new(title: impl Into<String>, genre: impl Into<String>, release_year: i64) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            release_year: Some(release_year),
        }
    }

    pub fn to_payload(&self, schema: &Schema) -> Value {
        let mut body = Map::new();
        body.insert(schema.movie_title.clone(), Value::from(self.title.as_str()));
        body.insert(schema.movie_genre.clone(), Value::from(self.genre.as_str()));
        if let Some(year) = self.release_year {
            body.insert(schema.movie_release_year.clone(), Value::from(year));
        }
        Value::Object(body)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub release_year: Option<i64>,
}

impl MoviePatch {
    pub fn to_payload(&self, schema: &Schema) -> Value {
        let mut body = Map::new();
        if let Some(title) = &self.title {
            body.insert(schema.movie_title.clone(), Value::from(title.as_str()));
        }
        if let Some(genre) = &self.genre {
            body.insert(schema.movie_genre.clone(), Value::from(genre.as_str()));
        }
        if let Some(year) = self.release_year {
            body.insert(schema.movie_release_year.clone(), Value::from(year));
        }
        Value::Object(body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    /// `None` produces a payload without the movie reference, which is how
    /// the validation scenario probes the backend.
    pub movie_id: Option<String>,
    pub text: String,
    pub rating: Option<i64>,
}

impl NewReview {
    pub fn new(movie_id: impl Into<String>, text: impl Into<String>, rating: i64) -> Self {
        Self {
            movie_id: Some(movie_id.into()),
            text: text.into(),
            rating: Some(rating),
        }
    }

    pub fn to_payload(&self, schema: &Schema) -> Value {
        let mut body = Map::new();
        if let Some(movie_id) = &self.movie_id {
            body.insert(schema.review_movie_ref.clone(), Value::from(movie_id.as_str()));
        }
        body.insert(schema.review_text.clone(), Value::from(self.text.as_str()));
        if let Some(rating) = self.rating {
            body.insert(schema.review_rating.clone(), Value::from(rating));
        }
        Value::Object(body)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewPatch {
    pub text: Option<String>,
    pub rating: Option<i64>,
}

impl ReviewPatch {
    pub fn to_payload(&self, schema: &Schema) -> Value {
        let mut body = Map::new();
        if let Some(text) = &self.text {
            body.insert(schema.review_text.clone(), Value::from(text.as_str()));
        }
        if let Some(rating) = self.rating {
            body.insert(schema.review_rating.clone(), Value::from(rating));
        }
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_movie_payload_matches_contract() {
        let movie = NewMovie::new("Test Movie", "Action", 2023);
        assert_eq!(
            movie.to_payload(&Schema::canonical()),
            json!({"title": "Test Movie", "genre": "Action", "releaseYear": 2023})
        );
    }

    #[test]
    fn legacy_schema_renames_fields() {
        let schema = Schema::legacy();
        let review = NewReview::new("7", "Solid", 4);
        assert_eq!(
            review.to_payload(&schema),
            json!({"movieID": "7", "reviewText": "Solid", "rating": 4})
        );
        assert_eq!(
            NewMovie::new("Heat", "Crime", 1995).to_payload(&schema)["name"],
            "Heat"
        );
    }

    #[test]
    fn patches_only_carry_set_fields() {
        let patch = MoviePatch {
            title: Some("Updated Movie Title".to_string()),
            genre: Some("Drama".to_string()),
            release_year: None,
        };
        let payload = patch.to_payload(&Schema::canonical());
        assert_eq!(payload, json!({"title": "Updated Movie Title", "genre": "Drama"}));
        assert!(payload.get("releaseYear").is_none());
    }

    #[test]
    fn review_without_reference_omits_the_field() {
        let review = NewReview {
            movie_id: None,
            text: "orphan".to_string(),
            rating: None,
        };
        assert_eq!(review.to_payload(&Schema::canonical()), json!({"text": "orphan"}));
    }

    #[test]
    fn record_ids_accept_strings_and_numbers() {
        assert_eq!(record_id(&json!({"id": "12"})), Some("12".to_string()));
        assert_eq!(record_id(&json!({"id": 12})), Some("12".to_string()));
        assert_eq!(record_id(&json!({"id": ""})), None);
        assert_eq!(record_id(&json!({"id": null})), None);
        assert_eq!(record_id(&json!({"title": "no id"})), None);
    }

    #[test]
    fn validate_rejects_duplicate_and_empty_names() {
        assert!(Schema::canonical().validate().is_ok());
        assert!(Schema::legacy().validate().is_ok());

        let dup = Schema {
            movie_genre: "title".to_string(),
            ..Schema::canonical()
        };
        assert!(dup.validate().is_err());

        let empty = Schema {
            review_text: " ".to_string(),
            ..Schema::canonical()
        };
        assert!(empty.validate().is_err());

        let clash = Schema {
            review_rating: "id".to_string(),
            ..Schema::canonical()
        };
        assert!(clash.validate().is_err());
    }

    #[test]
    fn required_fields_follow_schema() {
        let schema = Schema::legacy();
        assert_eq!(schema.required_fields(ResourceKind::Movies), vec!["id", "name"]);
        assert_eq!(
            schema.required_fields(ResourceKind::Reviews),
            vec!["id", "movieID", "reviewText"]
        );
    }
}

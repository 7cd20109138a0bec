use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One movie search result, reduced to the fields callers are promised.
/// Everything else TMDB sends is dropped.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MovieRecord {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub vote_average: f64,
}

impl MovieRecord {
    /// Map one raw TMDB result object to a record. A missing, null, or
    /// wrongly-typed field falls back to its default without touching the
    /// other fields.
    pub fn from_value(raw: &Value) -> Self {
        Self {
            id: raw.get("id").and_then(Value::as_i64).unwrap_or_default(),
            title: string_field(raw, "title"),
            overview: string_field(raw, "overview"),
            release_date: string_field(raw, "release_date"),
            vote_average: raw
                .get("vote_average")
                .and_then(Value::as_f64)
                .unwrap_or_default(),
        }
    }
}

fn string_field(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Pull the `results` array out of a TMDB search response body and map the
/// first `limit` entries, keeping TMDB's order. An absent or non-array
/// `results` yields an empty list.
pub fn top_movies(body: &Value, limit: usize) -> Vec<MovieRecord> {
    body.get("results")
        .and_then(Value::as_array)
        .map(|results| {
            results
                .iter()
                .take(limit)
                .map(MovieRecord::from_value)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_the_fixed_field_set() {
        let raw = json!({
            "id": 27205,
            "title": "Inception",
            "overview": "A thief who steals corporate secrets.",
            "release_date": "2010-07-15",
            "vote_average": 8.4
        });
        let movie = MovieRecord::from_value(&raw);
        assert_eq!(movie.id, 27205);
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.overview, "A thief who steals corporate secrets.");
        assert_eq!(movie.release_date, "2010-07-15");
        assert_eq!(movie.vote_average, 8.4);
    }

    #[test]
    fn missing_fields_default_to_empty_and_zero() {
        let movie = MovieRecord::from_value(&json!({}));
        assert_eq!(
            movie,
            MovieRecord {
                id: 0,
                title: String::new(),
                overview: String::new(),
                release_date: String::new(),
                vote_average: 0.0,
            }
        );
    }

    #[test]
    fn malformed_field_defaults_without_dropping_siblings() {
        let raw = json!({
            "id": "not-a-number",
            "title": "Still Here",
            "overview": null,
            "release_date": "1999-03-31",
            "vote_average": 7.0
        });
        let movie = MovieRecord::from_value(&raw);
        assert_eq!(movie.id, 0);
        assert_eq!(movie.title, "Still Here");
        assert_eq!(movie.overview, "");
        assert_eq!(movie.release_date, "1999-03-31");
        assert_eq!(movie.vote_average, 7.0);
    }

    #[test]
    fn unknown_fields_do_not_change_the_mapping() {
        let stripped = json!({
            "id": 603,
            "title": "The Matrix",
            "overview": "Welcome to the Real World.",
            "release_date": "1999-03-31",
            "vote_average": 8.2
        });
        let mut full = stripped.clone();
        let extras = full.as_object_mut().expect("fixture is an object");
        extras.insert("popularity".into(), json!(81.4));
        extras.insert(
            "poster_path".into(),
            json!("/f89U3ADr1oiB1s9Gkdk6nPpXRlB.jpg"),
        );
        extras.insert("genre_ids".into(), json!([28, 878]));
        extras.insert("adult".into(), json!(false));

        assert_eq!(
            MovieRecord::from_value(&full),
            MovieRecord::from_value(&stripped)
        );
    }

    #[test]
    fn integer_vote_average_is_accepted() {
        let movie = MovieRecord::from_value(&json!({"vote_average": 8}));
        assert_eq!(movie.vote_average, 8.0);
    }

    #[test]
    fn serializes_with_the_snake_case_wire_keys() {
        let movie = MovieRecord {
            id: 5,
            title: "Four Rooms".to_string(),
            overview: "One night, four stories.".to_string(),
            release_date: "1995-12-09".to_string(),
            vote_average: 5.8,
        };
        let encoded = serde_json::to_value(&movie).expect("record serializes");
        assert_eq!(
            encoded,
            json!({
                "id": 5,
                "title": "Four Rooms",
                "overview": "One night, four stories.",
                "release_date": "1995-12-09",
                "vote_average": 5.8
            })
        );
    }

    fn results_body(count: usize) -> Value {
        let results: Vec<Value> = (1..=count)
            .map(|n| json!({"id": n, "title": format!("Movie {n}")}))
            .collect();
        json!({ "page": 1, "results": results, "total_results": count })
    }

    #[test]
    fn top_movies_truncates_in_upstream_order() {
        let movies = top_movies(&results_body(5), 3);
        assert_eq!(
            movies.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn top_movies_returns_fewer_when_upstream_has_fewer() {
        let movies = top_movies(&results_body(2), 3);
        assert_eq!(movies.len(), 2);
    }

    #[test]
    fn top_movies_defaults_to_empty_without_results() {
        assert!(top_movies(&json!({"page": 1, "total_results": 0}), 3).is_empty());
        assert!(top_movies(&json!({"results": null}), 3).is_empty());
        assert!(top_movies(&json!({"results": "oops"}), 3).is_empty());
    }
}

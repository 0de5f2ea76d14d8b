use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type BookId = i64;

/// Book record
///
/// The known fields are typed; anything else the server sends is kept in
/// `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BookId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Query parameters of `GET /books`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookQuery {
    /// Page number (1-indexed)
    pub page: u32,
    /// Optional genre filter; empty strings are not sent
    pub genre: Option<String>,
}

impl BookQuery {
    pub fn page(page: u32) -> Self {
        Self { page, genre: None }
    }

    pub fn with_genre(mut self, genre: Option<&str>) -> Self {
        self.genre = genre.filter(|g| !g.is_empty()).map(str::to_string);
        self
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("page".to_string(), self.page.to_string())];
        if let Some(genre) = &self.genre {
            pairs.push(("genre".to_string(), genre.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_survive() {
        let raw = json!({
            "id": 7,
            "title": "Dune",
            "isbn": "978-0441013593",
            "stock": 3
        });
        let book: Book = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(book.id, Some(7));
        assert_eq!(book.extra.get("isbn"), Some(&json!("978-0441013593")));

        assert_eq!(serde_json::to_value(&book).unwrap(), raw);
    }

    #[test]
    fn test_query_pairs() {
        assert_eq!(
            BookQuery::page(2).to_pairs(),
            vec![("page".to_string(), "2".to_string())]
        );
        assert_eq!(
            BookQuery::page(1).with_genre(Some("fantasy")).to_pairs(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("genre".to_string(), "fantasy".to_string())
            ]
        );
        assert_eq!(BookQuery::page(1).with_genre(Some("")).genre, None);
    }
}

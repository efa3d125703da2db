use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub i32);

impl Category {
    /// Image asset for the category, e.g. `science.svg`.
    pub fn icon(&self) -> String {
        format!("{}.svg", self.kind.to_lowercase())
    }
}

/// A category together with how many questions it holds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub kind: String,
    pub counter: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_is_lower_cased_type() {
        let category = Category {
            id: CategoryId(5),
            kind: "Entertainment".to_string(),
        };
        assert_eq!(category.icon(), "entertainment.svg");
    }

    #[test]
    fn type_field_keeps_its_wire_name() {
        let category: Category = serde_json::from_str(r#"{"id": 1, "type": "Science"}"#).unwrap();
        assert_eq!(category.id, CategoryId(1));
        assert_eq!(category.kind, "Science");
    }
}

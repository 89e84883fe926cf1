use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

static COLOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("color pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub user_id: i64,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Attributes of a category that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub user_id: i64,
}

pub fn is_well_formed_color(color: &str) -> bool {
    COLOR_PATTERN.is_match(color)
}

impl NewCategory {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Category name cannot be empty".to_string());
        }
        if self.name.chars().count() > 255 {
            return Err("Category name too long".to_string());
        }
        if !is_well_formed_color(&self.color) {
            return Err(format!("Invalid color '{}'. Expected #RRGGBB", self.color));
        }
        Ok(())
    }
}

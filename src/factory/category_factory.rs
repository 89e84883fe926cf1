use super::provider::FakeProvider;
use crate::db::category_repository;
use crate::error::StoreError;
use crate::models::category::{Category, NewCategory};
use rusqlite::Connection;
use std::sync::Mutex;

/// Fields to pin instead of generating them.
#[derive(Debug, Clone, Default)]
pub struct CategoryOverrides {
    pub name: Option<String>,
    pub color: Option<String>,
    pub user_id: Option<i64>,
}

/// Generates random-but-valid categories, all owned by `default_owner` unless overridden.
/// Callers may share one factory across threads; draws from the provider are serialized.
pub struct CategoryFactory<P: FakeProvider> {
    provider: Mutex<P>,
    default_owner: i64,
}

impl<P: FakeProvider> CategoryFactory<P> {
    pub fn new(provider: P, default_owner: i64) -> Self {
        Self {
            provider: Mutex::new(provider),
            default_owner,
        }
    }

    pub fn definition(&self) -> Result<NewCategory, StoreError> {
        let mut provider = self
            .provider
            .lock()
            .map_err(|_| StoreError::ProviderUnavailable("provider lock poisoned".to_string()))?;
        Ok(NewCategory {
            name: provider.word()?,
            color: provider.safe_hex_color()?,
            user_id: self.default_owner,
        })
    }

    pub fn make(&self, overrides: &CategoryOverrides) -> Result<NewCategory, StoreError> {
        let mut category = self.definition()?;
        if let Some(name) = &overrides.name {
            category.name = name.clone();
        }
        if let Some(color) = &overrides.color {
            category.color = color.clone();
        }
        if let Some(user_id) = overrides.user_id {
            category.user_id = user_id;
        }
        Ok(category)
    }

    pub fn create(&self, conn: &Connection, overrides: &CategoryOverrides) -> Result<Category, StoreError> {
        let category = self.make(overrides)?;
        category_repository::create_category(conn, &category)
    }

    pub fn create_many(&self, conn: &Connection, count: usize) -> Result<Vec<Category>, StoreError> {
        let overrides = CategoryOverrides::default();
        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            created.push(self.create(conn, &overrides)?);
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_OWNER_ID;
    use crate::db::connection::establish_migrated_test_connection;
    use crate::db::user_repository::create_user_with_id;
    use crate::factory::provider::RandProvider;
    use crate::models::category::is_well_formed_color;
    use std::sync::Arc;
    use std::thread;

    struct BrokenProvider;

    impl FakeProvider for BrokenProvider {
        fn word(&mut self) -> Result<String, StoreError> {
            Err(StoreError::ProviderUnavailable("offline".to_string()))
        }

        fn safe_hex_color(&mut self) -> Result<String, StoreError> {
            Err(StoreError::ProviderUnavailable("offline".to_string()))
        }
    }

    fn factory() -> CategoryFactory<RandProvider> {
        CategoryFactory::new(RandProvider::seeded(2025), DEFAULT_OWNER_ID)
    }

    #[test]
    fn test_definition_defaults_owner_to_two() {
        let category = factory().definition().unwrap();
        assert_eq!(category.user_id, 2);
        assert!(!category.name.is_empty());
        assert!(is_well_formed_color(&category.color));
    }

    #[test]
    fn test_definition_uses_configured_owner() {
        let factory = CategoryFactory::new(RandProvider::seeded(1), 17);
        assert_eq!(factory.definition().unwrap().user_id, 17);
    }

    #[test]
    fn test_thousand_definitions_are_valid() {
        let factory = factory();
        for _ in 0..1000 {
            let category = factory.definition().unwrap();
            assert!(is_well_formed_color(&category.color), "bad color {}", category.color);
            assert!(!category.name.is_empty());
            assert_eq!(category.user_id, 2);
        }
    }

    #[test]
    fn test_make_applies_overrides() {
        let overrides = CategoryOverrides {
            name: Some("Groceries".to_string()),
            user_id: Some(5),
            ..Default::default()
        };

        let category = factory().make(&overrides).unwrap();
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.user_id, 5);
        assert!(is_well_formed_color(&category.color));
    }

    #[test]
    fn test_broken_provider_is_unavailable() {
        let factory = CategoryFactory::new(BrokenProvider, DEFAULT_OWNER_ID);
        let result = factory.definition();
        assert!(matches!(result, Err(StoreError::ProviderUnavailable(_))));
    }

    #[test]
    fn test_create_persists_for_default_owner() {
        let conn = establish_migrated_test_connection().unwrap();
        create_user_with_id(&conn, DEFAULT_OWNER_ID, "Demo", "demo@example.com").unwrap();

        let categories = factory().create_many(&conn, 5).unwrap();
        assert_eq!(categories.len(), 5);
        assert!(categories.iter().all(|c| c.user_id == DEFAULT_OWNER_ID && c.id > 0));
    }

    #[test]
    fn test_create_without_owner_is_foreign_key_violation() {
        let conn = establish_migrated_test_connection().unwrap();

        let result = factory().create(&conn, &CategoryOverrides::default());
        assert!(matches!(result, Err(StoreError::ForeignKeyViolation(_))));
    }

    #[test]
    fn test_independent_factories_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|seed| {
                thread::spawn(move || {
                    let factory = CategoryFactory::new(RandProvider::seeded(seed), DEFAULT_OWNER_ID);
                    (0..100)
                        .map(|_| factory.definition().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            let categories = handle.join().unwrap();
            assert_eq!(categories.len(), 100);
            assert!(categories.iter().all(|c| is_well_formed_color(&c.color)));
        }
    }

    #[test]
    fn test_shared_factory_across_threads() {
        let factory = Arc::new(factory());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let factory = Arc::clone(&factory);
                thread::spawn(move || {
                    (0..250)
                        .map(|_| factory.definition().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut total = 0;
        for handle in handles {
            let categories = handle.join().unwrap();
            total += categories.len();
            assert!(categories.iter().all(|c| {
                is_well_formed_color(&c.color) && !c.name.is_empty() && c.user_id == DEFAULT_OWNER_ID
            }));
        }
        assert_eq!(total, 1000);
    }
}

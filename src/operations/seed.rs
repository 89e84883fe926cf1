use crate::config::AppConfig;
use crate::db::user_repository;
use crate::error::StoreError;
use crate::factory::category_factory::CategoryFactory;
use crate::factory::provider::FakeProvider;
use crate::models::category::Category;
use rusqlite::Connection;

/// Persists `count` generated categories for the configured owner, creating that owner first if needed.
pub fn seed_categories_db<P: FakeProvider>(
    conn: &Connection,
    config: &AppConfig,
    provider: P,
    count: usize,
) -> Result<Vec<Category>, StoreError> {
    let tx = conn.unchecked_transaction()?;
    ensure_owner(&tx, config.default_owner)?;

    let factory = CategoryFactory::new(provider, config.default_owner);
    let categories = factory.create_many(&tx, count)?;
    tx.commit()?;

    tracing::info!(count = categories.len(), owner = config.default_owner, "seeded categories");
    Ok(categories)
}

fn ensure_owner(conn: &Connection, owner: i64) -> Result<(), StoreError> {
    if user_repository::get_user(conn, owner)?.is_some() {
        return Ok(());
    }
    let email = free_demo_email(conn, owner)?;
    user_repository::create_user_with_id(conn, owner, "Demo User", &email)?;
    tracing::info!(user_id = owner, email = %email, "created seed owner");
    Ok(())
}

// emails are unique, so skip addresses another user already holds
fn free_demo_email(conn: &Connection, owner: i64) -> Result<String, StoreError> {
    let mut email = format!("demo{}@example.com", owner);
    let mut suffix = 1;
    while user_repository::find_user_by_email(conn, &email)?.is_some() {
        email = format!("demo{}+{}@example.com", owner, suffix);
        suffix += 1;
    }
    Ok(email)
}

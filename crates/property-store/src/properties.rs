//! Property registry CRUD.

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use crate::db::PropertyStore;
use crate::models::{Property, PropertyInput};

impl PropertyStore {
    pub async fn insert_property(&self, input: &PropertyInput) -> Result<Property> {
        let property = Property {
            id: Uuid::new_v4().to_string(),
            name: input.name.clone(),
            address: input.address.clone(),
            city: input.city.clone(),
            property_type: input.property_type.clone(),
            unit_count: input.unit_count,
            asking_price: input.asking_price,
            notes: input.notes.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO properties
                (id, name, address, city, property_type, unit_count,
                 asking_price, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&property.id)
        .bind(&property.name)
        .bind(&property.address)
        .bind(&property.city)
        .bind(&property.property_type)
        .bind(property.unit_count)
        .bind(property.asking_price)
        .bind(&property.notes)
        .bind(property.created_at)
        .bind(property.updated_at)
        .execute(self.pool())
        .await?;

        Ok(property)
    }

    pub async fn get_property(&self, id: &str) -> Result<Option<Property>> {
        let property = sqlx::query_as::<_, Property>(
            r#"
            SELECT id, name, address, city, property_type, unit_count,
                   asking_price, notes, created_at, updated_at
            FROM properties
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(property)
    }

    /// Newest first.
    pub async fn list_properties(&self) -> Result<Vec<Property>> {
        let properties = sqlx::query_as::<_, Property>(
            r#"
            SELECT id, name, address, city, property_type, unit_count,
                   asking_price, notes, created_at, updated_at
            FROM properties
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(properties)
    }

    /// Full replace of caller-supplied fields. Returns `None` when no
    /// property has this id.
    pub async fn update_property(
        &self,
        id: &str,
        input: &PropertyInput,
    ) -> Result<Option<Property>> {
        let result = sqlx::query(
            r#"
            UPDATE properties
            SET name = ?, address = ?, city = ?, property_type = ?,
                unit_count = ?, asking_price = ?, notes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.property_type)
        .bind(input.unit_count)
        .bind(input.asking_price)
        .bind(&input.notes)
        .bind(Utc::now())
        .bind(id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_property(id).await
    }

    pub async fn delete_property(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> PropertyStore {
        PropertyStore::new("sqlite::memory:").await.unwrap()
    }

    fn duplex() -> PropertyInput {
        PropertyInput {
            name: "Rue Cartier duplex".into(),
            address: Some("123 Rue Cartier".into()),
            city: Some("Québec".into()),
            property_type: "PLEX".into(),
            unit_count: Some(2),
            asking_price: Some(450_000.0),
            notes: None,
        }
    }

    #[tokio::test]
    async fn insert_get_roundtrip() {
        let store = store().await;
        let created = store.insert_property(&duplex()).await.unwrap();

        let fetched = store.get_property(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, "Rue Cartier duplex");
        assert_eq!(fetched.property_type, "PLEX");
        assert_eq!(fetched.unit_count, Some(2));
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = store().await;
        assert!(store.get_property("no-such-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_returns_all() {
        let store = store().await;
        store.insert_property(&duplex()).await.unwrap();
        let mut second = duplex();
        second.name = "Limoilou triplex".into();
        second.property_type = "MULTI".into();
        store.insert_property(&second).await.unwrap();

        let all = store.list_properties().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let store = store().await;
        let created = store.insert_property(&duplex()).await.unwrap();

        let mut changed = duplex();
        changed.asking_price = Some(425_000.0);
        changed.notes = Some("seller motivated".into());
        let updated = store
            .update_property(&created.id, &changed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.asking_price, Some(425_000.0));
        assert_eq!(updated.notes.as_deref(), Some("seller motivated"));

        assert!(store
            .update_property("no-such-id", &changed)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_row_existed() {
        let store = store().await;
        let created = store.insert_property(&duplex()).await.unwrap();

        assert!(store.delete_property(&created.id).await.unwrap());
        assert!(!store.delete_property(&created.id).await.unwrap());
        assert!(store.get_property(&created.id).await.unwrap().is_none());
    }
}

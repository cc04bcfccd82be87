//! Project CRUD. Projects hang off a property and are deleted with it.

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use crate::db::PropertyStore;
use crate::models::{Project, ProjectInput, DEFAULT_PROJECT_STATUS};

impl PropertyStore {
    /// Returns `None` when the parent property does not exist.
    pub async fn insert_project(
        &self,
        property_id: &str,
        input: &ProjectInput,
    ) -> Result<Option<Project>> {
        if self.get_property(property_id).await?.is_none() {
            return Ok(None);
        }

        let project = Project {
            id: Uuid::new_v4().to_string(),
            property_id: property_id.to_string(),
            name: input.name.clone(),
            strategy: input.strategy.clone(),
            status: input
                .status
                .clone()
                .unwrap_or_else(|| DEFAULT_PROJECT_STATUS.to_string()),
            notes: input.notes.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO projects
                (id, property_id, name, strategy, status, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&project.id)
        .bind(&project.property_id)
        .bind(&project.name)
        .bind(&project.strategy)
        .bind(&project.status)
        .bind(&project.notes)
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(self.pool())
        .await?;

        Ok(Some(project))
    }

    pub async fn get_project(&self, id: &str) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, property_id, name, strategy, status, notes, created_at, updated_at
            FROM projects
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(project)
    }

    /// All projects for one property, newest first.
    pub async fn list_projects(&self, property_id: &str) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, property_id, name, strategy, status, notes, created_at, updated_at
            FROM projects
            WHERE property_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(property_id)
        .fetch_all(self.pool())
        .await?;

        Ok(projects)
    }

    /// Full replace of caller-supplied fields. Returns `None` when no
    /// project has this id.
    pub async fn update_project(&self, id: &str, input: &ProjectInput) -> Result<Option<Project>> {
        let status = input
            .status
            .clone()
            .unwrap_or_else(|| DEFAULT_PROJECT_STATUS.to_string());

        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = ?, strategy = ?, status = ?, notes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.strategy)
        .bind(status)
        .bind(&input.notes)
        .bind(Utc::now())
        .bind(id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_project(id).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

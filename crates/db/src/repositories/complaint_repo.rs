//! Repository for the `complaints` and `complaint_updates` tables.

use sqlx::{PgConnection, PgPool};

use crate::models::complaint::{Complaint, ComplaintChange, ComplaintFilter, ComplaintUpdate};
use crate::repositories::AuditLogRepo;

/// Column list for `complaints` queries.
const COLUMNS: &str = "\
    id, citizen_id, category, description, status, priority, \
    latitude, longitude, address, assigned_officer_id, \
    estimated_resolution, resolved_at, created_at, updated_at";

/// Column list for `complaint_updates` queries.
const UPDATE_COLUMNS: &str = "complaint_id, status, comment, author_role, author_id, created_at";

/// Provides CRUD operations for complaints.
pub struct ComplaintRepo;

impl ComplaintRepo {
    /// Insert a fully built complaint and its initial timeline in one
    /// transaction.
    pub async fn create(pool: &PgPool, complaint: &Complaint) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO complaints \
                (id, citizen_id, category, description, status, priority, \
                 latitude, longitude, address, assigned_officer_id, \
                 estimated_resolution, resolved_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(&complaint.id)
        .bind(&complaint.citizen_id)
        .bind(&complaint.category)
        .bind(&complaint.description)
        .bind(&complaint.status)
        .bind(&complaint.priority)
        .bind(complaint.latitude)
        .bind(complaint.longitude)
        .bind(&complaint.address)
        .bind(&complaint.assigned_officer_id)
        .bind(complaint.estimated_resolution)
        .bind(complaint.resolved_at)
        .bind(complaint.created_at)
        .bind(complaint.updated_at)
        .execute(&mut *tx)
        .await?;

        for update in &complaint.updates {
            Self::insert_update(&mut *tx, update).await?;
        }

        tx.commit().await
    }

    /// Find a complaint by ID, including its timeline.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complaints WHERE id = $1");
        let complaint = sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match complaint {
            Some(mut c) => {
                c.updates = Self::list_updates(pool, id).await?;
                Ok(Some(c))
            }
            None => Ok(None),
        }
    }

    /// List complaints matching the filter, newest first. Timelines are not
    /// loaded.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &ComplaintFilter,
    ) -> Result<Vec<Complaint>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if filter.category.is_some() {
            conditions.push(format!("LOWER(category) = LOWER(${param_idx})"));
            param_idx += 1;
        }
        if filter.priority.is_some() {
            conditions.push(format!("priority = ${param_idx}"));
            param_idx += 1;
        }
        if filter.citizen_id.is_some() {
            conditions.push(format!("citizen_id = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM complaints {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Complaint>(&query);
        if let Some(s) = &filter.status {
            q = q.bind(s);
        }
        if let Some(c) = &filter.category {
            q = q.bind(c);
        }
        if let Some(p) = &filter.priority {
            q = q.bind(p);
        }
        if let Some(cid) = &filter.citizen_id {
            q = q.bind(cid);
        }
        q = q.bind(filter.limit()).bind(filter.offset());

        q.fetch_all(pool).await
    }

    /// Complaint counts grouped by status, optionally for one citizen.
    pub async fn count_by_status(
        pool: &PgPool,
        citizen_id: Option<&str>,
    ) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*)::BIGINT FROM complaints \
             WHERE ($1::TEXT IS NULL OR citizen_id = $1) \
             GROUP BY status",
        )
        .bind(citizen_id)
        .fetch_all(pool)
        .await
    }

    /// Apply a computed change inside one transaction: status and assignment
    /// update, timeline row, and audit row.
    ///
    /// Returns `None` (and writes nothing) if the complaint does not exist.
    /// Any failure rolls the whole transaction back.
    pub async fn apply_change(
        pool: &PgPool,
        id: &str,
        change: &ComplaintChange,
    ) -> Result<Option<Complaint>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists = sqlx::query_scalar::<_, String>(
            "UPDATE complaints SET status = $1, resolved_at = $2, updated_at = $3 \
             WHERE id = $4 RETURNING id",
        )
        .bind(&change.status)
        .bind(change.resolved_at)
        .bind(change.updated_at)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if exists.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "UPDATE complaints SET assigned_officer_id = $1 WHERE id = $2 RETURNING {COLUMNS}"
        );
        let mut complaint = sqlx::query_as::<_, Complaint>(&query)
            .bind(&change.assigned_officer_id)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_update(&mut *tx, &change.log).await?;

        if let Some(audit) = &change.audit {
            AuditLogRepo::insert(&mut *tx, audit).await?;
        }

        tx.commit().await?;

        complaint.updates = Self::list_updates(pool, id).await?;
        Ok(Some(complaint))
    }

    /// Timeline of a complaint, oldest first.
    pub async fn list_updates(pool: &PgPool, id: &str) -> Result<Vec<ComplaintUpdate>, sqlx::Error> {
        let query = format!(
            "SELECT {UPDATE_COLUMNS} FROM complaint_updates \
             WHERE complaint_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ComplaintUpdate>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    async fn insert_update(conn: &mut PgConnection, update: &ComplaintUpdate) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO complaint_updates \
                (complaint_id, status, comment, author_role, author_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&update.complaint_id)
        .bind(&update.status)
        .bind(&update.comment)
        .bind(&update.author_role)
        .bind(&update.author_id)
        .bind(update.created_at)
        .execute(conn)
        .await?;
        Ok(())
    }
}

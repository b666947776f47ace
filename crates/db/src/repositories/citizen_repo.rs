//! Repository for the `citizens` table.

use sqlx::PgPool;

use crate::models::citizen::Citizen;

/// Column list for `citizens` queries.
const COLUMNS: &str = "id, name, phone, email, address, ward, created_at";

/// Provides lookups and inserts for citizens.
pub struct CitizenRepo;

impl CitizenRepo {
    /// Insert a citizen row built by the caller.
    pub async fn create(pool: &PgPool, citizen: &Citizen) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO citizens (id, name, phone, email, address, ward, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&citizen.id)
        .bind(&citizen.name)
        .bind(&citizen.phone)
        .bind(&citizen.email)
        .bind(&citizen.address)
        .bind(citizen.ward)
        .bind(citizen.created_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a citizen by ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Citizen>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM citizens WHERE id = $1");
        sqlx::query_as::<_, Citizen>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a citizen by registered phone number.
    pub async fn find_by_phone(pool: &PgPool, phone: &str) -> Result<Option<Citizen>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM citizens WHERE phone = $1");
        sqlx::query_as::<_, Citizen>(&query)
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    /// Total number of citizens.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM citizens")
            .fetch_one(pool)
            .await
    }
}

//! Repository for the `advocates` table.

use formulaw_core::fid;
use formulaw_core::types::DbId;
use sqlx::PgPool;

use crate::models::advocate::{
    Advocate, AdvocateSearchFilter, RegisterAdvocate, UpdateAdvocateProfile,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, fid, fid_number, email, first_name, last_name, phone_number, \
                        bar_council_id, bar_council_issue_years, bar_council_issue_months, \
                        languages, law_types, working_hours, area, city, state, \
                        per_minute_charge, verification_status, duty_status, average_rating, \
                        rated_call_count, total_cases, total_earnings, created_at";

/// Provides directory and verification operations for advocates.
pub struct AdvocateRepo;

impl AdvocateRepo {
    /// Register a new advocate: user row, FID allocation, advocate row and
    /// wallet, all in one transaction.
    ///
    /// Duplicate email or Bar Council ID surfaces as a unique violation on
    /// the corresponding `uq_` constraint.
    pub async fn register(pool: &PgPool, input: &RegisterAdvocate) -> Result<Advocate, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_id: DbId = sqlx::query_scalar(
            "INSERT INTO users (email, role, name, city)
             VALUES ($1, 'advocate', $2, $3)
             RETURNING id",
        )
        .bind(&input.email)
        .bind(format!("{} {}", input.first_name, input.last_name))
        .bind(&input.city)
        .fetch_one(&mut *tx)
        .await?;

        let fid_number: i64 = sqlx::query_scalar("SELECT nextval('advocate_fid_seq')")
            .fetch_one(&mut *tx)
            .await?;
        let fid = fid::format_fid(fid_number);

        let query = format!(
            "INSERT INTO advocates (user_id, fid, fid_number, email, first_name, last_name,
                                    phone_number, bar_council_id, bar_council_issue_years,
                                    bar_council_issue_months, languages, law_types,
                                    working_hours, area, city, state, per_minute_charge)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             RETURNING {COLUMNS}"
        );
        let advocate = sqlx::query_as::<_, Advocate>(&query)
            .bind(user_id)
            .bind(&fid)
            .bind(fid_number)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone_number)
            .bind(&input.bar_council_id)
            .bind(input.bar_council_issue_years)
            .bind(input.bar_council_issue_months)
            .bind(&input.languages)
            .bind(&input.law_types)
            .bind(&input.working_hours)
            .bind(&input.area)
            .bind(&input.city)
            .bind(&input.state)
            .bind(input.per_minute_charge)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO wallets (user_id) VALUES ($1)")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(advocate)
    }

    /// Find an advocate by the owning user's ID.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Advocate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM advocates WHERE user_id = $1");
        sqlx::query_as::<_, Advocate>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an advocate by registration email.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Advocate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM advocates WHERE email = $1");
        sqlx::query_as::<_, Advocate>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Search the public directory: approved, on-duty advocates only.
    ///
    /// Filters are equality on city and membership on law_types/languages.
    /// Every sort mode carries a `created_at DESC` secondary key so ties
    /// order newest-first; an unrecognized `sort_by` falls back to newest.
    pub async fn search(
        pool: &PgPool,
        filter: &AdvocateSearchFilter,
    ) -> Result<Vec<Advocate>, sqlx::Error> {
        let mut conditions = vec![
            "verification_status = 'approved'".to_string(),
            "duty_status = true".to_string(),
        ];
        let mut idx = 0;

        if filter.law_type.is_some() {
            idx += 1;
            conditions.push(format!("${idx} = ANY(law_types)"));
        }
        if filter.city.is_some() {
            idx += 1;
            conditions.push(format!("city = ${idx}"));
        }
        if filter.language.is_some() {
            idx += 1;
            conditions.push(format!("${idx} = ANY(languages)"));
        }

        let order_by = match filter.sort_by.as_deref() {
            Some("rating") => "average_rating DESC, created_at DESC",
            Some("price_low") => "per_minute_charge ASC, created_at DESC",
            Some("price_high") => "per_minute_charge DESC, created_at DESC",
            _ => "created_at DESC",
        };

        let query = format!(
            "SELECT {COLUMNS} FROM advocates
             WHERE {}
             ORDER BY {order_by}
             LIMIT 100",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, Advocate>(&query);
        if let Some(law_type) = &filter.law_type {
            q = q.bind(law_type);
        }
        if let Some(city) = &filter.city {
            q = q.bind(city);
        }
        if let Some(language) = &filter.language {
            q = q.bind(language);
        }
        q.fetch_all(pool).await
    }

    /// List every advocate, most recently registered first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Advocate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM advocates
             ORDER BY created_at DESC
             LIMIT 1000"
        );
        sqlx::query_as::<_, Advocate>(&query).fetch_all(pool).await
    }

    /// List advocates awaiting verification, oldest first (review queue order).
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<Advocate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM advocates
             WHERE verification_status = 'pending'
             ORDER BY created_at ASC
             LIMIT 100"
        );
        sqlx::query_as::<_, Advocate>(&query).fetch_all(pool).await
    }

    /// Update an advocate's profile. Only non-`None` fields are applied.
    /// The denormalized name/city on the user row follow along.
    ///
    /// Returns `None` if no row with the given `user_id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateAdvocateProfile,
    ) -> Result<Option<Advocate>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE advocates SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                phone_number = COALESCE($4, phone_number),
                languages = COALESCE($5, languages),
                law_types = COALESCE($6, law_types),
                working_hours = COALESCE($7, working_hours),
                area = COALESCE($8, area),
                city = COALESCE($9, city),
                state = COALESCE($10, state),
                per_minute_charge = COALESCE($11, per_minute_charge)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        let advocate = sqlx::query_as::<_, Advocate>(&query)
            .bind(user_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone_number)
            .bind(&input.languages)
            .bind(&input.law_types)
            .bind(&input.working_hours)
            .bind(&input.area)
            .bind(&input.city)
            .bind(&input.state)
            .bind(input.per_minute_charge)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(advocate) = advocate else {
            return Ok(None);
        };

        sqlx::query("UPDATE users SET name = $2, city = $3 WHERE id = $1")
            .bind(user_id)
            .bind(format!("{} {}", advocate.first_name, advocate.last_name))
            .bind(&advocate.city)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(advocate))
    }

    /// Set duty status. Returns `true` if the row was updated.
    ///
    /// Callers check verification first; the table CHECK backs them up.
    pub async fn set_duty(pool: &PgPool, user_id: DbId, duty: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE advocates SET duty_status = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(duty)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply a verification decision, but only while the advocate is still
    /// pending. Returns `None` when the advocate was already decided, so a
    /// concurrent double-decision cannot flip a terminal state.
    pub async fn decide(
        pool: &PgPool,
        user_id: DbId,
        status: &str,
    ) -> Result<Option<Advocate>, sqlx::Error> {
        let query = format!(
            "UPDATE advocates SET verification_status = $2
             WHERE user_id = $1 AND verification_status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Advocate>(&query)
            .bind(user_id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}

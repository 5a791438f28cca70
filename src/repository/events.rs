//! Events and event applications repositories

use async_trait::async_trait;
use sqlx::PgConnection;

use crate::{
    error::AppResult,
    models::application::{Application, ApplicationCreate, ApplicationFilter, ApplicationUpdate},
    models::event::{Event, EventData, EventFilter},
    pagination::{Page, PageRequest, Paginator},
    repository::Repository,
};

pub struct EventsRepository;

#[async_trait]
impl Repository for EventsRepository {
    type Entity = Event;
    type Create = EventData;
    type Update = EventData;
    type Filter = EventFilter;

    async fn retrieve(conn: &mut PgConnection, id: i32) -> AppResult<Option<Event>> {
        let row = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        if row.is_none() {
            tracing::debug!("Event with id={} not found", id);
        }
        Ok(row)
    }

    async fn retrieve_all(
        conn: &mut PgConnection,
        page: &PageRequest,
        filter: &EventFilter,
    ) -> AppResult<Page<Event>> {
        let paginator = Paginator::new(page)?;

        let mut conditions = Vec::new();
        let mut idx = 1;

        if filter.name_contains.is_some() {
            conditions.push(format!("lower(name) LIKE ${}", idx));
            idx += 1;
        }
        if filter.start_dt.is_some() {
            conditions.push(format!("start_date >= ${}", idx));
            idx += 1;
        }
        if filter.end_dt.is_some() {
            conditions.push(format!("start_date <= ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let name_pattern = filter
            .name_contains
            .as_ref()
            .map(|name| format!("%{}%", name.to_lowercase()));

        let count_q = format!("SELECT COUNT(*) FROM events {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_q);
        if let Some(ref pattern) = name_pattern {
            count_builder = count_builder.bind(pattern);
        }
        if let Some(start_dt) = filter.start_dt {
            count_builder = count_builder.bind(start_dt);
        }
        if let Some(end_dt) = filter.end_dt {
            count_builder = count_builder.bind(end_dt);
        }
        let total = count_builder.fetch_one(&mut *conn).await?;

        let mut select_q = format!(
            "SELECT * FROM events {} ORDER BY start_date DESC",
            where_clause
        );
        if let (Some(limit), Some(offset)) = (paginator.limit(), paginator.offset()) {
            select_q.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
        }

        let mut builder = sqlx::query_as::<_, Event>(&select_q);
        if let Some(ref pattern) = name_pattern {
            builder = builder.bind(pattern);
        }
        if let Some(start_dt) = filter.start_dt {
            builder = builder.bind(start_dt);
        }
        if let Some(end_dt) = filter.end_dt {
            builder = builder.bind(end_dt);
        }
        let rows = builder.fetch_all(&mut *conn).await?;

        Ok(paginator.paginate(total, rows))
    }

    async fn create(conn: &mut PgConnection, data: &EventData) -> AppResult<Event> {
        let row = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (
                name, description, short_description, location,
                participants, coordinator_contact, start_date, end_date
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.short_description)
        .bind(&data.location)
        .bind(&data.participants)
        .bind(&data.coordinator_contact)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!("Created event with id={}", row.id);
        Ok(row)
    }

    async fn update(
        conn: &mut PgConnection,
        id: i32,
        data: &EventData,
    ) -> AppResult<Option<Event>> {
        let row = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events SET
                name = $1, description = $2, short_description = $3,
                location = $4, participants = $5, coordinator_contact = $6,
                start_date = $7, end_date = $8
            WHERE id = $9
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.short_description)
        .bind(&data.location)
        .bind(&data.participants)
        .bind(&data.coordinator_contact)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    async fn delete(conn: &mut PgConnection, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        tracing::debug!("Deleted event with id={}", id);
        Ok(())
    }

    async fn exists(conn: &mut PgConnection, id: i32) -> AppResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM events WHERE id = $1)")
                .bind(id)
                .fetch_one(&mut *conn)
                .await?;
        Ok(exists)
    }
}

impl EventsRepository {
    /// Replace the stored image reference
    pub async fn set_image_url(
        conn: &mut PgConnection,
        id: i32,
        image_url: &str,
    ) -> AppResult<Option<Event>> {
        let row = sqlx::query_as::<_, Event>(
            "UPDATE events SET image_url = $1 WHERE id = $2 RETURNING *",
        )
        .bind(image_url)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row)
    }
}

pub struct ApplicationsRepository;

#[async_trait]
impl Repository for ApplicationsRepository {
    type Entity = Application;
    type Create = ApplicationCreate;
    type Update = ApplicationUpdate;
    type Filter = ApplicationFilter;

    async fn retrieve(conn: &mut PgConnection, id: i32) -> AppResult<Option<Application>> {
        let row =
            sqlx::query_as::<_, Application>("SELECT * FROM events_applications WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;

        if row.is_none() {
            tracing::debug!("Application with id={} not found", id);
        }
        Ok(row)
    }

    async fn retrieve_all(
        conn: &mut PgConnection,
        page: &PageRequest,
        filter: &ApplicationFilter,
    ) -> AppResult<Page<Application>> {
        let paginator = Paginator::new(page)?;

        let mut conditions = Vec::new();
        let mut idx = 1;

        if filter.name_contains.is_some() {
            conditions.push(format!("lower(full_name) LIKE ${}", idx));
            idx += 1;
        }
        if filter.event_id.is_some() {
            conditions.push(format!("event_id = ${}", idx));
            idx += 1;
        }
        if filter.statuses.is_some() {
            conditions.push(format!("status = ANY(${})", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let name_pattern = filter
            .name_contains
            .as_ref()
            .map(|name| format!("%{}%", name.to_lowercase()));
        let statuses: Option<Vec<i16>> = filter
            .statuses
            .as_ref()
            .map(|statuses| statuses.iter().map(|s| i16::from(*s)).collect());

        let count_q = format!("SELECT COUNT(*) FROM events_applications {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_q);
        if let Some(ref pattern) = name_pattern {
            count_builder = count_builder.bind(pattern);
        }
        if let Some(event_id) = filter.event_id {
            count_builder = count_builder.bind(event_id);
        }
        if let Some(ref statuses) = statuses {
            count_builder = count_builder.bind(statuses);
        }
        let total = count_builder.fetch_one(&mut *conn).await?;

        let mut select_q = format!(
            "SELECT * FROM events_applications {} ORDER BY id",
            where_clause
        );
        if let (Some(limit), Some(offset)) = (paginator.limit(), paginator.offset()) {
            select_q.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
        }

        let mut builder = sqlx::query_as::<_, Application>(&select_q);
        if let Some(ref pattern) = name_pattern {
            builder = builder.bind(pattern);
        }
        if let Some(event_id) = filter.event_id {
            builder = builder.bind(event_id);
        }
        if let Some(ref statuses) = statuses {
            builder = builder.bind(statuses);
        }
        let rows = builder.fetch_all(&mut *conn).await?;

        Ok(paginator.paginate(total, rows))
    }

    async fn create(conn: &mut PgConnection, data: &ApplicationCreate) -> AppResult<Application> {
        let row = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO events_applications (
                full_name, email, phone, birthdate, comment,
                study_organisation, event_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.data.full_name)
        .bind(&data.data.email)
        .bind(&data.data.phone)
        .bind(data.data.birthdate)
        .bind(&data.data.comment)
        .bind(&data.data.study_organisation)
        .bind(data.event_id)
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!("Created application with id={}", row.id);
        Ok(row)
    }

    async fn update(
        conn: &mut PgConnection,
        id: i32,
        data: &ApplicationUpdate,
    ) -> AppResult<Option<Application>> {
        let row = sqlx::query_as::<_, Application>(
            r#"
            UPDATE events_applications SET
                full_name = $1, email = $2, phone = $3, birthdate = $4,
                comment = $5, study_organisation = $6, status = $7
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(data.birthdate)
        .bind(&data.comment)
        .bind(&data.study_organisation)
        .bind(data.status)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    async fn delete(conn: &mut PgConnection, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM events_applications WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        tracing::debug!("Deleted application with id={}", id);
        Ok(())
    }

    async fn exists(conn: &mut PgConnection, id: i32) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM events_applications WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(exists)
    }
}

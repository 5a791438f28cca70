//! Museum hall and section repositories

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgConnection;

use crate::{
    error::AppResult,
    models::museum::{
        HallData, HallWithSections, MuseumHall, MuseumSection, SectionCreate, SectionData,
        SectionFilter,
    },
    pagination::{Page, PageRequest, Paginator},
    repository::Repository,
};

pub struct HallsRepository;

#[async_trait]
impl Repository for HallsRepository {
    type Entity = MuseumHall;
    type Create = HallData;
    type Update = HallData;
    type Filter = ();

    async fn retrieve(conn: &mut PgConnection, id: i32) -> AppResult<Option<MuseumHall>> {
        let row = sqlx::query_as::<_, MuseumHall>("SELECT * FROM museum_hall WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        if row.is_none() {
            tracing::debug!("Museum hall with id={} not found", id);
        }
        Ok(row)
    }

    async fn retrieve_all(
        conn: &mut PgConnection,
        page: &PageRequest,
        _filter: &(),
    ) -> AppResult<Page<MuseumHall>> {
        let paginator = Paginator::new(page)?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM museum_hall")
            .fetch_one(&mut *conn)
            .await?;

        let mut select_q = "SELECT * FROM museum_hall ORDER BY id".to_string();
        if let (Some(limit), Some(offset)) = (paginator.limit(), paginator.offset()) {
            select_q.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
        }
        let rows = sqlx::query_as::<_, MuseumHall>(&select_q)
            .fetch_all(&mut *conn)
            .await?;

        Ok(paginator.paginate(total, rows))
    }

    async fn create(conn: &mut PgConnection, data: &HallData) -> AppResult<MuseumHall> {
        let row = sqlx::query_as::<_, MuseumHall>(
            "INSERT INTO museum_hall (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!("Created museum hall with id={}", row.id);
        Ok(row)
    }

    async fn update(
        conn: &mut PgConnection,
        id: i32,
        data: &HallData,
    ) -> AppResult<Option<MuseumHall>> {
        let row = sqlx::query_as::<_, MuseumHall>(
            "UPDATE museum_hall SET name = $1, description = $2 WHERE id = $3 RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    async fn delete(conn: &mut PgConnection, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM museum_hall WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        tracing::debug!("Deleted museum hall with id={}", id);
        Ok(())
    }

    async fn exists(conn: &mut PgConnection, id: i32) -> AppResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM museum_hall WHERE id = $1)")
                .bind(id)
                .fetch_one(&mut *conn)
                .await?;
        Ok(exists)
    }
}

impl HallsRepository {
    /// Single lookup with the section list eagerly loaded
    pub async fn retrieve_with_sections(
        conn: &mut PgConnection,
        id: i32,
    ) -> AppResult<Option<HallWithSections>> {
        let Some(hall) = Self::retrieve(conn, id).await? else {
            return Ok(None);
        };

        let sections =
            sqlx::query_as::<_, MuseumSection>("SELECT * FROM museum_section WHERE hall_id = $1")
                .bind(id)
                .fetch_all(&mut *conn)
                .await?;

        Ok(Some(HallWithSections { hall, sections }))
    }

    /// Paginated listing with section lists eagerly loaded
    pub async fn retrieve_all_with_sections(
        conn: &mut PgConnection,
        page: &PageRequest,
    ) -> AppResult<Page<HallWithSections>> {
        let hall_page = Self::retrieve_all(conn, page, &()).await?;

        let ids: Vec<i32> = hall_page.items.iter().map(|h| h.id).collect();
        let sections = sqlx::query_as::<_, MuseumSection>(
            "SELECT * FROM museum_section WHERE hall_id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&mut *conn)
        .await?;

        let mut by_hall: HashMap<i32, Vec<MuseumSection>> = HashMap::new();
        for section in sections {
            by_hall.entry(section.hall_id).or_default().push(section);
        }

        Ok(hall_page.map(|hall| {
            let sections = by_hall.remove(&hall.id).unwrap_or_default();
            HallWithSections { hall, sections }
        }))
    }

    /// Replace the stored image reference
    pub async fn set_image_url(
        conn: &mut PgConnection,
        id: i32,
        image_url: &str,
    ) -> AppResult<Option<MuseumHall>> {
        let row = sqlx::query_as::<_, MuseumHall>(
            "UPDATE museum_hall SET image_url = $1 WHERE id = $2 RETURNING *",
        )
        .bind(image_url)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row)
    }
}

pub struct SectionsRepository;

#[async_trait]
impl Repository for SectionsRepository {
    type Entity = MuseumSection;
    type Create = SectionCreate;
    type Update = SectionData;
    type Filter = SectionFilter;

    async fn retrieve(conn: &mut PgConnection, id: i32) -> AppResult<Option<MuseumSection>> {
        let row = sqlx::query_as::<_, MuseumSection>("SELECT * FROM museum_section WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        if row.is_none() {
            tracing::debug!("Museum section with id={} not found", id);
        }
        Ok(row)
    }

    async fn retrieve_all(
        conn: &mut PgConnection,
        page: &PageRequest,
        filter: &SectionFilter,
    ) -> AppResult<Page<MuseumSection>> {
        let paginator = Paginator::new(page)?;

        let where_clause = if filter.hall_id.is_some() {
            "WHERE hall_id = $1"
        } else {
            ""
        };

        let count_q = format!("SELECT COUNT(*) FROM museum_section {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_q);
        if let Some(hall_id) = filter.hall_id {
            count_builder = count_builder.bind(hall_id);
        }
        let total = count_builder.fetch_one(&mut *conn).await?;

        let mut select_q = format!("SELECT * FROM museum_section {} ORDER BY id", where_clause);
        if let (Some(limit), Some(offset)) = (paginator.limit(), paginator.offset()) {
            select_q.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
        }

        let mut builder = sqlx::query_as::<_, MuseumSection>(&select_q);
        if let Some(hall_id) = filter.hall_id {
            builder = builder.bind(hall_id);
        }
        let rows = builder.fetch_all(&mut *conn).await?;

        Ok(paginator.paginate(total, rows))
    }

    async fn create(conn: &mut PgConnection, data: &SectionCreate) -> AppResult<MuseumSection> {
        let row = sqlx::query_as::<_, MuseumSection>(
            "INSERT INTO museum_section (name, description, hall_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.data.name)
        .bind(&data.data.description)
        .bind(data.hall_id)
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!("Created museum section with id={}", row.id);
        Ok(row)
    }

    async fn update(
        conn: &mut PgConnection,
        id: i32,
        data: &SectionData,
    ) -> AppResult<Option<MuseumSection>> {
        let row = sqlx::query_as::<_, MuseumSection>(
            "UPDATE museum_section SET name = $1, description = $2 WHERE id = $3 RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    async fn delete(conn: &mut PgConnection, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM museum_section WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        tracing::debug!("Deleted museum section with id={}", id);
        Ok(())
    }

    async fn exists(conn: &mut PgConnection, id: i32) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM museum_section WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(exists)
    }
}

impl SectionsRepository {
    /// Replace the stored image reference
    pub async fn set_image_url(
        conn: &mut PgConnection,
        id: i32,
        image_url: &str,
    ) -> AppResult<Option<MuseumSection>> {
        let row = sqlx::query_as::<_, MuseumSection>(
            "UPDATE museum_section SET image_url = $1 WHERE id = $2 RETURNING *",
        )
        .bind(image_url)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row)
    }
}

//! Media, media category and media photo repositories

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgConnection;

use crate::{
    error::AppResult,
    models::media::{
        Media, MediaCategory, MediaCategoryData, MediaCategoryFilter, MediaData, MediaFilter,
        MediaPhoto, MediaPhotoCreate, MediaWithPhotos,
    },
    pagination::{Page, PageRequest, Paginator},
    repository::Repository,
};

pub struct MediaRepository;

#[async_trait]
impl Repository for MediaRepository {
    type Entity = Media;
    type Create = MediaData;
    type Update = MediaData;
    type Filter = MediaFilter;

    async fn retrieve(conn: &mut PgConnection, id: i32) -> AppResult<Option<Media>> {
        let row = sqlx::query_as::<_, Media>("SELECT * FROM media WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        if row.is_none() {
            tracing::debug!("Media with id={} not found", id);
        }
        Ok(row)
    }

    async fn retrieve_all(
        conn: &mut PgConnection,
        page: &PageRequest,
        filter: &MediaFilter,
    ) -> AppResult<Page<Media>> {
        let paginator = Paginator::new(page)?;
        let (where_clause, name_pattern, types) = media_where_clause(filter);

        let count_q = format!("SELECT COUNT(*) FROM media {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_q);
        if let Some(ref pattern) = name_pattern {
            count_builder = count_builder.bind(pattern);
        }
        if let Some(ref types) = types {
            count_builder = count_builder.bind(types);
        }
        if let Some(category_id) = filter.category_id {
            count_builder = count_builder.bind(category_id);
        }
        let total = count_builder.fetch_one(&mut *conn).await?;

        let mut select_q = format!("SELECT * FROM media {} ORDER BY id", where_clause);
        if let (Some(limit), Some(offset)) = (paginator.limit(), paginator.offset()) {
            select_q.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
        }

        let mut builder = sqlx::query_as::<_, Media>(&select_q);
        if let Some(ref pattern) = name_pattern {
            builder = builder.bind(pattern);
        }
        if let Some(ref types) = types {
            builder = builder.bind(types);
        }
        if let Some(category_id) = filter.category_id {
            builder = builder.bind(category_id);
        }
        let rows = builder.fetch_all(&mut *conn).await?;

        Ok(paginator.paginate(total, rows))
    }

    async fn create(conn: &mut PgConnection, data: &MediaData) -> AppResult<Media> {
        let row = sqlx::query_as::<_, Media>(
            r#"
            INSERT INTO media (name, description, media_type, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.media_type)
        .bind(data.category_id)
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!("Created media with id={}", row.id);
        Ok(row)
    }

    async fn update(
        conn: &mut PgConnection,
        id: i32,
        data: &MediaData,
    ) -> AppResult<Option<Media>> {
        let row = sqlx::query_as::<_, Media>(
            r#"
            UPDATE media SET
                name = $1, description = $2, media_type = $3, category_id = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.media_type)
        .bind(data.category_id)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    async fn delete(conn: &mut PgConnection, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM media WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        tracing::debug!("Deleted media with id={}", id);
        Ok(())
    }

    async fn exists(conn: &mut PgConnection, id: i32) -> AppResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM media WHERE id = $1)")
                .bind(id)
                .fetch_one(&mut *conn)
                .await?;
        Ok(exists)
    }
}

impl MediaRepository {
    /// Single lookup with the photo gallery eagerly loaded
    pub async fn retrieve_with_photos(
        conn: &mut PgConnection,
        id: i32,
    ) -> AppResult<Option<MediaWithPhotos>> {
        let Some(media) = Self::retrieve(conn, id).await? else {
            return Ok(None);
        };

        let photos =
            sqlx::query_as::<_, MediaPhoto>("SELECT * FROM media_photo WHERE media_id = $1")
                .bind(id)
                .fetch_all(&mut *conn)
                .await?;

        Ok(Some(MediaWithPhotos { media, photos }))
    }

    /// Paginated listing with photo galleries eagerly loaded
    pub async fn retrieve_all_with_photos(
        conn: &mut PgConnection,
        page: &PageRequest,
        filter: &MediaFilter,
    ) -> AppResult<Page<MediaWithPhotos>> {
        let media_page = Self::retrieve_all(conn, page, filter).await?;

        let ids: Vec<i32> = media_page.items.iter().map(|m| m.id).collect();
        let photos = sqlx::query_as::<_, MediaPhoto>(
            "SELECT * FROM media_photo WHERE media_id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&mut *conn)
        .await?;

        let mut by_media: HashMap<i32, Vec<MediaPhoto>> = HashMap::new();
        for photo in photos {
            by_media.entry(photo.media_id).or_default().push(photo);
        }

        Ok(media_page.map(|media| {
            let photos = by_media.remove(&media.id).unwrap_or_default();
            MediaWithPhotos { media, photos }
        }))
    }

    /// Replace the stored image reference
    pub async fn set_image_url(
        conn: &mut PgConnection,
        id: i32,
        image_url: &str,
    ) -> AppResult<Option<Media>> {
        let row =
            sqlx::query_as::<_, Media>("UPDATE media SET image_url = $1 WHERE id = $2 RETURNING *")
                .bind(image_url)
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;
        Ok(row)
    }

    /// Replace the stored file reference
    pub async fn set_file_url(
        conn: &mut PgConnection,
        id: i32,
        url: &str,
    ) -> AppResult<Option<Media>> {
        let row = sqlx::query_as::<_, Media>("UPDATE media SET url = $1 WHERE id = $2 RETURNING *")
            .bind(url)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    /// Link or unlink the owning category
    pub async fn set_category(
        conn: &mut PgConnection,
        id: i32,
        category_id: Option<i32>,
    ) -> AppResult<Option<Media>> {
        let row = sqlx::query_as::<_, Media>(
            "UPDATE media SET category_id = $1 WHERE id = $2 RETURNING *",
        )
        .bind(category_id)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row)
    }
}

fn media_where_clause(filter: &MediaFilter) -> (String, Option<String>, Option<Vec<i16>>) {
    let mut conditions = Vec::new();
    let mut idx = 1;

    if filter.name_contains.is_some() {
        conditions.push(format!("lower(name) LIKE ${}", idx));
        idx += 1;
    }
    if filter.types.is_some() {
        conditions.push(format!("media_type = ANY(${})", idx));
        idx += 1;
    }
    if filter.category_id.is_some() {
        conditions.push(format!("category_id = ${}", idx));
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
    let types: Option<Vec<i16>> = filter
        .types
        .as_ref()
        .map(|types| types.iter().map(|t| i16::from(*t)).collect());

    (where_clause, name_pattern, types)
}

pub struct MediaCategoriesRepository;

#[async_trait]
impl Repository for MediaCategoriesRepository {
    type Entity = MediaCategory;
    type Create = MediaCategoryData;
    type Update = MediaCategoryData;
    type Filter = MediaCategoryFilter;

    async fn retrieve(conn: &mut PgConnection, id: i32) -> AppResult<Option<MediaCategory>> {
        let row = sqlx::query_as::<_, MediaCategory>("SELECT * FROM media_category WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        if row.is_none() {
            tracing::debug!("Media category with id={} not found", id);
        }
        Ok(row)
    }

    async fn retrieve_all(
        conn: &mut PgConnection,
        page: &PageRequest,
        filter: &MediaCategoryFilter,
    ) -> AppResult<Page<MediaCategory>> {
        let paginator = Paginator::new(page)?;

        let where_clause = if filter.types.is_some() {
            "WHERE media_type = ANY($1)"
        } else {
            ""
        };
        let types: Option<Vec<i16>> = filter
            .types
            .as_ref()
            .map(|types| types.iter().map(|t| i16::from(*t)).collect());

        let count_q = format!("SELECT COUNT(*) FROM media_category {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_q);
        if let Some(ref types) = types {
            count_builder = count_builder.bind(types);
        }
        let total = count_builder.fetch_one(&mut *conn).await?;

        let mut select_q = format!("SELECT * FROM media_category {} ORDER BY id", where_clause);
        if let (Some(limit), Some(offset)) = (paginator.limit(), paginator.offset()) {
            select_q.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
        }

        let mut builder = sqlx::query_as::<_, MediaCategory>(&select_q);
        if let Some(ref types) = types {
            builder = builder.bind(types);
        }
        let rows = builder.fetch_all(&mut *conn).await?;

        Ok(paginator.paginate(total, rows))
    }

    async fn create(conn: &mut PgConnection, data: &MediaCategoryData) -> AppResult<MediaCategory> {
        let row = sqlx::query_as::<_, MediaCategory>(
            "INSERT INTO media_category (name, media_type) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.media_type)
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!("Created media category with id={}", row.id);
        Ok(row)
    }

    async fn update(
        conn: &mut PgConnection,
        id: i32,
        data: &MediaCategoryData,
    ) -> AppResult<Option<MediaCategory>> {
        let row = sqlx::query_as::<_, MediaCategory>(
            "UPDATE media_category SET name = $1, media_type = $2 WHERE id = $3 RETURNING *",
        )
        .bind(&data.name)
        .bind(data.media_type)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    async fn delete(conn: &mut PgConnection, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM media_category WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        tracing::debug!("Deleted media category with id={}", id);
        Ok(())
    }

    async fn exists(conn: &mut PgConnection, id: i32) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM media_category WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(exists)
    }
}

pub struct MediaPhotosRepository;

#[async_trait]
impl Repository for MediaPhotosRepository {
    type Entity = MediaPhoto;
    type Create = MediaPhotoCreate;
    /// Replacement image URL, the only mutable field
    type Update = String;
    type Filter = ();

    async fn retrieve(conn: &mut PgConnection, id: i32) -> AppResult<Option<MediaPhoto>> {
        let row = sqlx::query_as::<_, MediaPhoto>("SELECT * FROM media_photo WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        if row.is_none() {
            tracing::debug!("Media photo with id={} not found", id);
        }
        Ok(row)
    }

    async fn retrieve_all(
        conn: &mut PgConnection,
        page: &PageRequest,
        _filter: &(),
    ) -> AppResult<Page<MediaPhoto>> {
        let paginator = Paginator::new(page)?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM media_photo")
            .fetch_one(&mut *conn)
            .await?;

        let mut select_q = "SELECT * FROM media_photo ORDER BY id".to_string();
        if let (Some(limit), Some(offset)) = (paginator.limit(), paginator.offset()) {
            select_q.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
        }
        let rows = sqlx::query_as::<_, MediaPhoto>(&select_q)
            .fetch_all(&mut *conn)
            .await?;

        Ok(paginator.paginate(total, rows))
    }

    async fn create(conn: &mut PgConnection, data: &MediaPhotoCreate) -> AppResult<MediaPhoto> {
        let row = sqlx::query_as::<_, MediaPhoto>(
            "INSERT INTO media_photo (media_id) VALUES ($1) RETURNING *",
        )
        .bind(data.media_id)
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!("Created media photo with id={}", row.id);
        Ok(row)
    }

    async fn update(
        conn: &mut PgConnection,
        id: i32,
        image_url: &String,
    ) -> AppResult<Option<MediaPhoto>> {
        let row = sqlx::query_as::<_, MediaPhoto>(
            "UPDATE media_photo SET image_url = $1 WHERE id = $2 RETURNING *",
        )
        .bind(image_url)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    async fn delete(conn: &mut PgConnection, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM media_photo WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        tracing::debug!("Deleted media photo with id={}", id);
        Ok(())
    }

    async fn exists(conn: &mut PgConnection, id: i32) -> AppResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM media_photo WHERE id = $1)")
                .bind(id)
                .fetch_one(&mut *conn)
                .await?;
        Ok(exists)
    }
}

//! Shared macro generating the Diesel-backed CRUD repository adapters.

/// Generate a [`CrudRepository`](crate::domain::ports::CrudRepository)
/// implementation for one catalogue table.
///
/// The generated methods:
/// - build entities from validated drafts and write the full row back on
///   mutation, so row and entity can never drift apart
/// - exclude soft-deleted rows everywhere except `find_by_id` with
///   `include_deleted` and `restore`
/// - fetch `limit + 1` rows for listings to detect a following page
///
/// The call site must import `diesel::prelude::*`,
/// `diesel_async::RunQueryDsl`, the schema module named by `table`, the row
/// type, and the error mapping helpers.
macro_rules! impl_diesel_crud {
    (
        impl CrudRepository<$entity:ty> for $repo:ty {
            row: $row:ty,
            table: $table:ident,
            slug_column: $slug_col:ident,
            search($needle:ident): $search_expr:expr $(,)?
        }
    ) => {
        #[async_trait::async_trait]
        impl crate::domain::ports::CrudRepository<$entity> for $repo {
            async fn insert(
                &self,
                draft: <$entity as crate::domain::CrudEntity>::Draft,
                actor: uuid::Uuid,
            ) -> Result<$entity, crate::domain::ports::RepositoryError> {
                let entity = <$entity as crate::domain::CrudEntity>::from_draft(
                    draft,
                    uuid::Uuid::new_v4(),
                    crate::domain::AuditInfo::created_now(actor),
                );
                let row = <$row>::from(&entity);
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                diesel::insert_into($table::table)
                    .values(&row)
                    .execute(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                Ok(entity)
            }

            async fn update(
                &self,
                id: uuid::Uuid,
                changes: <$entity as crate::domain::CrudEntity>::Changes,
                actor: uuid::Uuid,
            ) -> Result<Option<$entity>, crate::domain::ports::RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row: Option<$row> = $table::table
                    .filter($table::id.eq(id))
                    .filter($table::deleted_at.is_null())
                    .select(<$row>::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                let Some(row) = row else {
                    return Ok(None);
                };
                let mut entity: $entity = row.try_into()?;
                crate::domain::CrudEntity::apply_changes(&mut entity, changes);
                crate::domain::CrudEntity::audit_mut(&mut entity).touch(actor);
                let updated = <$row>::from(&entity);
                diesel::update($table::table.filter($table::id.eq(id)))
                    .set(&updated)
                    .execute(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                Ok(Some(entity))
            }

            async fn find_by_id(
                &self,
                id: uuid::Uuid,
                include_deleted: bool,
            ) -> Result<Option<$entity>, crate::domain::ports::RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let mut query = $table::table.filter($table::id.eq(id)).into_boxed();
                if !include_deleted {
                    query = query.filter($table::deleted_at.is_null());
                }
                let row: Option<$row> = query
                    .select(<$row>::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                row.map(TryInto::try_into).transpose()
            }

            async fn find_by_slug(
                &self,
                slug: &str,
            ) -> Result<Option<$entity>, crate::domain::ports::RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row: Option<$row> = $table::table
                    .filter($table::$slug_col.eq(slug))
                    .filter($table::deleted_at.is_null())
                    .select(<$row>::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                row.map(TryInto::try_into).transpose()
            }

            async fn soft_delete(
                &self,
                id: uuid::Uuid,
                actor: uuid::Uuid,
            ) -> Result<bool, crate::domain::ports::RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let now = chrono::Utc::now();
                let marked = diesel::update(
                    $table::table
                        .filter($table::id.eq(id))
                        .filter($table::deleted_at.is_null()),
                )
                .set((
                    $table::deleted_at.eq(Some(now)),
                    $table::deleted_by.eq(Some(actor)),
                    $table::updated_at.eq(now),
                    $table::updated_by.eq(actor),
                ))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
                Ok(marked > 0)
            }

            async fn restore(
                &self,
                id: uuid::Uuid,
                actor: uuid::Uuid,
            ) -> Result<Option<$entity>, crate::domain::ports::RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row: Option<$row> = $table::table
                    .filter($table::id.eq(id))
                    .select(<$row>::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                let Some(row) = row else {
                    return Ok(None);
                };
                let mut entity: $entity = row.try_into()?;
                if crate::domain::CrudEntity::audit(&entity).is_deleted() {
                    crate::domain::CrudEntity::audit_mut(&mut entity).clear_deleted(actor);
                    let updated = <$row>::from(&entity);
                    diesel::update($table::table.filter($table::id.eq(id)))
                        .set(&updated)
                        .execute(&mut conn)
                        .await
                        .map_err(map_diesel_error)?;
                }
                Ok(Some(entity))
            }

            async fn hard_delete(
                &self,
                id: uuid::Uuid,
            ) -> Result<bool, crate::domain::ports::RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let removed = diesel::delete($table::table.filter($table::id.eq(id)))
                    .execute(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                Ok(removed > 0)
            }

            async fn list(
                &self,
                page: &pagination::PageRequest,
            ) -> Result<pagination::Page<$entity>, crate::domain::ports::RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let rows: Vec<$row> = $table::table
                    .filter($table::deleted_at.is_null())
                    .order(($table::created_at.asc(), $table::id.asc()))
                    .offset(sql_offset(page))
                    .limit(sql_limit(page))
                    .select(<$row>::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                collect_page(rows, page)
            }

            async fn search(
                &self,
                needle: &str,
                page: &pagination::PageRequest,
            ) -> Result<pagination::Page<$entity>, crate::domain::ports::RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let $needle = format!(
                    "%{}%",
                    needle
                        .replace('\\', "\\\\")
                        .replace('%', "\\%")
                        .replace('_', "\\_")
                );
                let rows: Vec<$row> = $table::table
                    .filter($table::deleted_at.is_null())
                    .filter($search_expr)
                    .order(($table::created_at.asc(), $table::id.asc()))
                    .offset(sql_offset(page))
                    .limit(sql_limit(page))
                    .select(<$row>::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                collect_page(rows, page)
            }
        }
    };
}

pub(crate) use impl_diesel_crud;

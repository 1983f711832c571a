//! Macro generating the uniform CRUD route set for one catalogue entity.
//!
//! Every entity family exposes the same eight handlers: create, list,
//! search, fetch by id, fetch by slug, partial update, delete (soft by
//! default, `?hard=true` for permanent), and restore. The macro stamps them
//! out against the entity's driving port on [`HttpState`], annotated for
//! OpenAPI, and emits a `configure_crud` function registering them in an
//! order that keeps literal segments ahead of the `{id}` matcher.
//!
//! [`HttpState`]: crate::inbound::http::state::HttpState

macro_rules! crud_endpoints {
    (
        module: $module:ident,
        entity: $entity:ty,
        draft: $draft:ty,
        changes: $changes:ty,
        state: $state:ident,
        tag: $tag:literal,
        collection: $collection:literal,
        search: $search:literal,
        by_id: $by_id:literal,
        by_slug: $by_slug:literal,
        restore: $restore:literal $(,)?
    ) => {
        ::paste::paste! {
            #[doc = concat!("Create a new ", stringify!($entity), " from a draft payload.")]
            #[utoipa::path(
                post,
                path = $collection,
                tags = [$tag],
                request_body = $draft,
                responses(
                    (status = 201, description = "Record created", body = $entity),
                    (status = 400, description = "Validation failed", body = $crate::domain::Error),
                    (status = 401, description = "Missing or unknown API key", body = $crate::domain::Error),
                    (status = 403, description = "Actor lacks permission", body = $crate::domain::Error),
                    (status = 409, description = "Slug already taken", body = $crate::domain::Error)
                ),
                security(("ApiKey" = []))
            )]
            #[actix_web::post($collection)]
            pub async fn [<$module _create>](
                state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
                actor: $crate::domain::Actor,
                payload: actix_web::web::Json<$draft>,
            ) -> $crate::inbound::http::ApiResult<actix_web::HttpResponse> {
                let created = state.$state.create(&actor, payload.into_inner()).await?;
                Ok(actix_web::HttpResponse::Created().json(created))
            }

            #[doc = concat!("Page through active ", stringify!($entity), " records.")]
            #[utoipa::path(
                get,
                path = $collection,
                tags = [$tag],
                params($crate::inbound::http::paging::PageQuery),
                responses(
                    (status = 200, description = "Page of records", body = $crate::inbound::http::paging::PageEnvelope),
                    (status = 400, description = "Invalid cursor", body = $crate::domain::Error),
                    (status = 401, description = "Missing or unknown API key", body = $crate::domain::Error),
                    (status = 403, description = "Actor lacks permission", body = $crate::domain::Error)
                ),
                security(("ApiKey" = []))
            )]
            #[actix_web::get($collection)]
            pub async fn [<$module _list>](
                state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
                actor: $crate::domain::Actor,
                query: actix_web::web::Query<$crate::inbound::http::paging::PageQuery>,
            ) -> $crate::inbound::http::ApiResult<actix_web::HttpResponse> {
                let page = state.$state.list(&actor, query.page_request()?).await?;
                Ok(actix_web::HttpResponse::Ok().json(page))
            }

            #[doc = concat!("Search active ", stringify!($entity), " records by text fragment.")]
            #[utoipa::path(
                get,
                path = $search,
                tags = [$tag],
                params($crate::inbound::http::paging::SearchQuery),
                responses(
                    (status = 200, description = "Page of matching records", body = $crate::inbound::http::paging::PageEnvelope),
                    (status = 400, description = "Invalid cursor", body = $crate::domain::Error),
                    (status = 401, description = "Missing or unknown API key", body = $crate::domain::Error),
                    (status = 403, description = "Actor lacks permission", body = $crate::domain::Error)
                ),
                security(("ApiKey" = []))
            )]
            #[actix_web::get($search)]
            pub async fn [<$module _search>](
                state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
                actor: $crate::domain::Actor,
                query: actix_web::web::Query<$crate::inbound::http::paging::SearchQuery>,
            ) -> $crate::inbound::http::ApiResult<actix_web::HttpResponse> {
                let page = state
                    .$state
                    .search(&actor, &query.q, query.page_request()?)
                    .await?;
                Ok(actix_web::HttpResponse::Ok().json(page))
            }

            #[doc = concat!("Fetch one active ", stringify!($entity), " by id.")]
            #[utoipa::path(
                get,
                path = $by_id,
                tags = [$tag],
                params(("id" = uuid::Uuid, Path, description = "Record identifier")),
                responses(
                    (status = 200, description = "The record", body = $entity),
                    (status = 401, description = "Missing or unknown API key", body = $crate::domain::Error),
                    (status = 403, description = "Actor lacks permission", body = $crate::domain::Error),
                    (status = 404, description = "No active record with this id", body = $crate::domain::Error)
                ),
                security(("ApiKey" = []))
            )]
            #[actix_web::get($by_id)]
            pub async fn [<$module _get>](
                state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
                actor: $crate::domain::Actor,
                path: actix_web::web::Path<uuid::Uuid>,
            ) -> $crate::inbound::http::ApiResult<actix_web::HttpResponse> {
                let found = state.$state.get(&actor, path.into_inner()).await?;
                Ok(actix_web::HttpResponse::Ok().json(found))
            }

            #[doc = concat!("Fetch one active ", stringify!($entity), " by slug.")]
            #[utoipa::path(
                get,
                path = $by_slug,
                tags = [$tag],
                params(("slug" = String, Path, description = "Unique human-readable identifier")),
                responses(
                    (status = 200, description = "The record", body = $entity),
                    (status = 401, description = "Missing or unknown API key", body = $crate::domain::Error),
                    (status = 403, description = "Actor lacks permission", body = $crate::domain::Error),
                    (status = 404, description = "No active record with this slug", body = $crate::domain::Error)
                ),
                security(("ApiKey" = []))
            )]
            #[actix_web::get($by_slug)]
            pub async fn [<$module _get_by_slug>](
                state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
                actor: $crate::domain::Actor,
                path: actix_web::web::Path<String>,
            ) -> $crate::inbound::http::ApiResult<actix_web::HttpResponse> {
                let found = state.$state.get_by_slug(&actor, &path.into_inner()).await?;
                Ok(actix_web::HttpResponse::Ok().json(found))
            }

            #[doc = concat!("Apply partial changes to one ", stringify!($entity), ".")]
            #[utoipa::path(
                patch,
                path = $by_id,
                tags = [$tag],
                params(("id" = uuid::Uuid, Path, description = "Record identifier")),
                request_body = $changes,
                responses(
                    (status = 200, description = "Updated record", body = $entity),
                    (status = 400, description = "Validation failed", body = $crate::domain::Error),
                    (status = 401, description = "Missing or unknown API key", body = $crate::domain::Error),
                    (status = 403, description = "Actor lacks permission", body = $crate::domain::Error),
                    (status = 404, description = "No active record with this id", body = $crate::domain::Error)
                ),
                security(("ApiKey" = []))
            )]
            #[actix_web::patch($by_id)]
            pub async fn [<$module _update>](
                state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
                actor: $crate::domain::Actor,
                path: actix_web::web::Path<uuid::Uuid>,
                payload: actix_web::web::Json<$changes>,
            ) -> $crate::inbound::http::ApiResult<actix_web::HttpResponse> {
                let updated = state
                    .$state
                    .update(&actor, path.into_inner(), payload.into_inner())
                    .await?;
                Ok(actix_web::HttpResponse::Ok().json(updated))
            }

            #[doc = concat!(
                "Delete one ", stringify!($entity),
                "; soft by default, permanent with `?hard=true` (admin only)."
            )]
            #[utoipa::path(
                delete,
                path = $by_id,
                tags = [$tag],
                params(
                    ("id" = uuid::Uuid, Path, description = "Record identifier"),
                    $crate::inbound::http::paging::DeleteParams
                ),
                responses(
                    (status = 204, description = "Record deleted"),
                    (status = 401, description = "Missing or unknown API key", body = $crate::domain::Error),
                    (status = 403, description = "Actor lacks permission", body = $crate::domain::Error),
                    (status = 404, description = "No active record with this id", body = $crate::domain::Error)
                ),
                security(("ApiKey" = []))
            )]
            #[actix_web::delete($by_id)]
            pub async fn [<$module _delete>](
                state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
                actor: $crate::domain::Actor,
                path: actix_web::web::Path<uuid::Uuid>,
                query: actix_web::web::Query<$crate::inbound::http::paging::DeleteParams>,
            ) -> $crate::inbound::http::ApiResult<actix_web::HttpResponse> {
                let id = path.into_inner();
                if query.is_hard() {
                    state.$state.hard_delete(&actor, id).await?;
                } else {
                    state.$state.soft_delete(&actor, id).await?;
                }
                Ok(actix_web::HttpResponse::NoContent().finish())
            }

            #[doc = concat!("Bring one soft-deleted ", stringify!($entity), " back.")]
            #[utoipa::path(
                post,
                path = $restore,
                tags = [$tag],
                params(("id" = uuid::Uuid, Path, description = "Record identifier")),
                responses(
                    (status = 200, description = "Restored record", body = $entity),
                    (status = 401, description = "Missing or unknown API key", body = $crate::domain::Error),
                    (status = 403, description = "Actor lacks permission", body = $crate::domain::Error),
                    (status = 404, description = "No record with this id", body = $crate::domain::Error)
                ),
                security(("ApiKey" = []))
            )]
            #[actix_web::post($restore)]
            pub async fn [<$module _restore>](
                state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
                actor: $crate::domain::Actor,
                path: actix_web::web::Path<uuid::Uuid>,
            ) -> $crate::inbound::http::ApiResult<actix_web::HttpResponse> {
                let restored = state.$state.restore(&actor, path.into_inner()).await?;
                Ok(actix_web::HttpResponse::Ok().json(restored))
            }

            /// Register the CRUD routes. Literal segments (`search`, `slug`,
            /// `restore`) are registered before the `{id}` matcher.
            pub fn configure_crud(cfg: &mut actix_web::web::ServiceConfig) {
                cfg.service([<$module _search>])
                    .service([<$module _get_by_slug>])
                    .service([<$module _restore>])
                    .service([<$module _create>])
                    .service([<$module _list>])
                    .service([<$module _get>])
                    .service([<$module _update>])
                    .service([<$module _delete>]);
            }
        }
    };
}

pub(crate) use crud_endpoints;

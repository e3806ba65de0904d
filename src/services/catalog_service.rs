use crate::{
    dto::{
        favorites::{FavoritePet, FavoritesPage},
        pages::{HomePage, PetDetailPage, SearchPage},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Favorite,
    petfinder::{
        AnimalsResponse, RemoteResponse,
        dto::{Animal, AnimalType},
    },
    response::Meta,
    services::favorite_service,
    state::AppState,
};

/// Stable partition: animals with at least one photo first, order otherwise kept.
pub fn photos_first(animals: Vec<Animal>) -> Vec<Animal> {
    let (with_photos, without): (Vec<_>, Vec<_>) =
        animals.into_iter().partition(Animal::has_photos);
    with_photos.into_iter().chain(without).collect()
}

fn animals_or_empty(response: RemoteResponse<AnimalsResponse>, lookup: &str) -> Vec<Animal> {
    match response {
        RemoteResponse::Found(found) => photos_first(found.animals),
        RemoteResponse::Problem(problem) => {
            tracing::warn!(lookup, status = problem.status, title = %problem.title, "listing lookup failed");
            Vec::new()
        }
    }
}

pub async fn home_page(state: &AppState) -> AppResult<HomePage> {
    let animal_types: Vec<AnimalType> = match state.listings.fetch_animal_types().await? {
        RemoteResponse::Found(found) => found.types,
        RemoteResponse::Problem(problem) => {
            tracing::warn!(status = problem.status, title = %problem.title, "animal types lookup failed");
            Vec::new()
        }
    };
    let featured_pets = animals_or_empty(state.listings.fetch_animals().await?, "animals");

    Ok(HomePage {
        animal_types,
        featured_pets,
        default_img: state.config.default_img(),
    })
}

/// Home context plus, for a non-empty `query`, the filtered results and
/// the previous/next page fragments.
pub async fn search_page(state: &AppState, query: Option<&str>) -> AppResult<(SearchPage, Meta)> {
    let home = home_page(state).await?;
    let mut page = SearchPage {
        home,
        search_results: None,
        search_error: None,
        prev_page: None,
        next_page: None,
    };

    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return Ok((page, Meta::empty()));
    };

    let mut meta = Meta::empty();
    match state.listings.fetch_filtered_animals(query).await? {
        RemoteResponse::Found(found) => {
            if let Some(pagination) = found.pagination.as_ref() {
                page.prev_page = pagination.previous_fragment();
                page.next_page = pagination.next_fragment();
                meta = Meta {
                    page: pagination.current_page,
                    per_page: pagination.count_per_page,
                    total: pagination.total_count,
                };
            }
            page.search_results = Some(photos_first(found.animals));
        }
        RemoteResponse::Problem(problem) => {
            tracing::warn!(query, status = problem.status, "filtered animals lookup failed");
            page.search_results = Some(Vec::new());
            page.search_error = Some(problem);
        }
    }

    Ok((page, meta))
}

/// Live data for each of the user's favorites. Favorites whose animal is no
/// longer adoptable, or no longer listed, are deleted instead of shown.
pub async fn favorites_page(state: &AppState, user: &AuthUser) -> AppResult<FavoritesPage> {
    let favorites = favorite_service::list_for_user(&state.orm, user).await?;

    let mut users_pets = Vec::with_capacity(favorites.len());
    for favorite in favorites {
        let prune = match state.listings.fetch_animal(&favorite.api_pet_id).await? {
            RemoteResponse::Found(found) if found.animal.is_adoptable() => {
                users_pets.push(FavoritePet {
                    animal: found.animal,
                    comment: favorite.comment,
                });
                false
            }
            RemoteResponse::Found(_) => true,
            RemoteResponse::Problem(problem) if problem.is_not_found() => true,
            RemoteResponse::Problem(problem) => {
                tracing::warn!(
                    api_pet_id = %favorite.api_pet_id,
                    status = problem.status,
                    "favorite lookup failed, keeping it"
                );
                false
            }
        };

        if prune {
            let removed = favorite_service::delete(&state.orm, user, &favorite.api_pet_id).await?;
            tracing::info!(
                user_id = %user.user_id,
                api_pet_id = %favorite.api_pet_id,
                removed,
                "pruned favorite that is no longer adoptable"
            );
        }
    }

    Ok(FavoritesPage { users_pets })
}

/// `None` when the service does not return the animal.
pub async fn pet_detail(
    state: &AppState,
    viewer: Option<&AuthUser>,
    api_pet_id: &str,
) -> AppResult<Option<PetDetailPage>> {
    let animal = match state.listings.fetch_animal(api_pet_id).await? {
        RemoteResponse::Found(found) => found.animal,
        RemoteResponse::Problem(problem) => {
            tracing::debug!(api_pet_id, status = problem.status, "animal lookup failed");
            return Ok(None);
        }
    };

    let pet = match viewer {
        Some(user) => favorite_service::find_for_user(&state.orm, user, api_pet_id)
            .await?
            .map(Favorite::from),
        None => None,
    };

    Ok(Some(PetDetailPage {
        animal,
        pet,
        default_img: state.config.default_img(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entity::favorites,
        petfinder::{
            dto::{Link, Pagination, PaginationLinks},
            fake::{FakeListings, test_state, transaction_log},
        },
    };
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use uuid::Uuid;

    fn viewer() -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            username: "jane".into(),
        }
    }

    fn favorite(user: &AuthUser, api_pet_id: &str, comment: &str) -> favorites::Model {
        favorites::Model {
            id: Uuid::new_v4(),
            user_id: user.user_id,
            api_pet_id: api_pet_id.into(),
            comment: comment.into(),
            created_at: Utc::now().fixed_offset(),
        }
    }

    fn animal(id: &str, photos: usize) -> Animal {
        Animal {
            id: id.into(),
            photos: vec![Default::default(); photos],
            ..Default::default()
        }
    }

    #[test]
    fn photo_bearing_animals_come_first_in_original_order() {
        let sorted = photos_first(vec![
            animal("a", 0),
            animal("b", 2),
            animal("c", 0),
            animal("d", 1),
            animal("e", 3),
        ]);
        let ids: Vec<_> = sorted.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["b", "d", "e", "a", "c"]);
    }

    #[test]
    fn partition_keeps_uniform_lists_untouched() {
        let sorted = photos_first(vec![animal("a", 0), animal("b", 0)]);
        let ids: Vec<_> = sorted.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(photos_first(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn favorites_page_prunes_animals_that_are_gone() {
        let user = viewer();
        let orm = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                favorite(&user, "1", "so fluffy"),
                favorite(&user, "2", ""),
                favorite(&user, "3", ""),
            ]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();
        let orm = Arc::new(orm);
        let listings = FakeListings::default()
            .with_animal("1", "adoptable", 1)
            .with_animal("2", "adopted", 1);
        let state = test_state(orm.clone(), listings);

        let page = favorites_page(&state, &user).await.unwrap();

        assert_eq!(page.users_pets.len(), 1);
        assert_eq!(page.users_pets[0].animal.id, "1");
        assert_eq!(page.users_pets[0].comment, "so fluffy");
        // one select, then one delete each for the adopted and the unlisted animal
        assert_eq!(transaction_log(state, orm).len(), 3);
    }

    #[tokio::test]
    async fn detail_for_anonymous_viewer_skips_storage() {
        let orm = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let orm = Arc::new(orm);
        let state = test_state(orm.clone(), FakeListings::default().with_animal("7", "adoptable", 0));

        let page = pet_detail(&state, None, "7").await.unwrap().expect("page");
        assert_eq!(page.animal.id, "7");
        assert!(page.pet.is_none());
        assert_eq!(page.default_img, "/static/images/dog-icon.png");

        assert!(pet_detail(&state, None, "8").await.unwrap().is_none());
        assert!(transaction_log(state, orm).is_empty());
    }

    #[tokio::test]
    async fn detail_includes_the_viewers_comment() {
        let user = viewer();
        let orm = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![favorite(&user, "7", "meet on saturday")]])
            .into_connection();
        let orm = Arc::new(orm);
        let state = test_state(orm, FakeListings::default().with_animal("7", "adoptable", 0));

        let page = pet_detail(&state, Some(&user), "7").await.unwrap().expect("page");
        let pet = page.pet.expect("favorite");
        assert_eq!(pet.comment, "meet on saturday");
    }

    #[tokio::test]
    async fn search_page_sorts_results_and_extracts_page_links() {
        let orm = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let orm = Arc::new(orm);
        let listings = FakeListings {
            filtered: Some(RemoteResponse::Found(AnimalsResponse {
                animals: vec![animal("a", 0), animal("b", 2)],
                pagination: Some(Pagination {
                    count_per_page: Some(20),
                    total_count: Some(41),
                    current_page: Some(2),
                    total_pages: Some(3),
                    links: Some(PaginationLinks {
                        previous: Some(Link {
                            href: "/v2/animals?type=dog&limit=20&page=1".into(),
                        }),
                        next: Some(Link {
                            href: "/v2/animals?type=dog&limit=20&page=3".into(),
                        }),
                    }),
                }),
            })),
            ..Default::default()
        };
        let state = test_state(orm, listings);

        let (page, meta) = search_page(&state, Some("type=dog&limit=20&page=2")).await.unwrap();
        let ids: Vec<_> = page
            .search_results
            .expect("results")
            .iter()
            .map(|a| a.id.clone())
            .collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(page.prev_page.as_deref(), Some("?type=dog&limit=20&page=1"));
        assert_eq!(page.next_page.as_deref(), Some("?type=dog&limit=20&page=3"));
        assert_eq!(meta.page, Some(2));
        assert_eq!(meta.total, Some(41));
    }

    #[tokio::test]
    async fn search_page_without_query_has_no_results() {
        let orm = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let orm = Arc::new(orm);
        let state = test_state(orm, FakeListings::default());

        let (page, _) = search_page(&state, Some("")).await.unwrap();
        assert!(page.search_results.is_none());
        assert!(page.next_page.is_none());
    }

    #[tokio::test]
    async fn search_problem_is_carried_to_the_page() {
        let orm = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let orm = Arc::new(orm);
        let listings = FakeListings {
            filtered: Some(RemoteResponse::Problem(crate::petfinder::ApiProblem::new(
                400,
                "Invalid Request",
                None,
            ))),
            ..Default::default()
        };
        let state = test_state(orm, listings);

        let (page, _) = search_page(&state, Some("location=nowhere")).await.unwrap();
        assert_eq!(page.search_error.expect("problem").status, 400);
        assert_eq!(page.search_results.map(|r| r.len()), Some(0));
    }
}

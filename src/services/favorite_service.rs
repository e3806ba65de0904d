use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::OnConflict,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    entity::favorites::{ActiveModel as FavoriteActive, Column as FavCol, Entity as Favorites, Model},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
};

/// The user's favorites, oldest first.
pub async fn list_for_user(db: &DatabaseConnection, user: &AuthUser) -> AppResult<Vec<Model>> {
    let favorites = Favorites::find()
        .filter(FavCol::UserId.eq(user.user_id))
        .order_by_asc(FavCol::CreatedAt)
        .all(db)
        .await?;
    Ok(favorites)
}

pub async fn find_for_user(
    db: &DatabaseConnection,
    user: &AuthUser,
    api_pet_id: &str,
) -> AppResult<Option<Model>> {
    let favorite = Favorites::find()
        .filter(FavCol::UserId.eq(user.user_id))
        .filter(FavCol::ApiPetId.eq(api_pet_id))
        .one(db)
        .await?;
    Ok(favorite)
}

/// Saves `api_pet_id` as a favorite of `user`. Saving it twice, even from two
/// concurrent requests, returns the existing row.
pub async fn create(db: &DatabaseConnection, user: &AuthUser, api_pet_id: &str) -> AppResult<Model> {
    let favorite = FavoriteActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        api_pet_id: Set(api_pet_id.to_string()),
        comment: Set(String::new()),
        created_at: NotSet,
    };

    let inserted = Favorites::insert(favorite)
        .on_conflict(
            OnConflict::columns([FavCol::UserId, FavCol::ApiPetId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    tracing::debug!(user_id = %user.user_id, api_pet_id, inserted, "favorite saved");

    find_for_user(db, user, api_pet_id)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn update_comment(
    db: &DatabaseConnection,
    user: &AuthUser,
    api_pet_id: &str,
    comment: String,
) -> AppResult<Model> {
    let favorite = find_for_user(db, user, api_pet_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: FavoriteActive = favorite.into();
    active.comment = Set(comment);
    Ok(active.update(db).await?)
}

/// Removes every favorite row `user` holds for `api_pet_id`.
pub async fn delete(db: &DatabaseConnection, user: &AuthUser, api_pet_id: &str) -> AppResult<u64> {
    let result = Favorites::delete_many()
        .filter(FavCol::UserId.eq(user.user_id))
        .filter(FavCol::ApiPetId.eq(api_pet_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{AccountPage, LoginForm, SignupForm},
        favorites::{FavoriteForm, FavoritePet, FavoritesPage},
        pages::{HomePage, PetDetailPage, SearchPage},
    },
    models::{Favorite, User},
    response::{ApiResponse, Meta},
    routes::{auth, favorites, health, pages, params, pets, types},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        pages::index,
        pages::search,
        pages::submit_search,
        favorites::favorites,
        pets::pets_show,
        pets::pets_create,
        pets::pets_update,
        pets::pets_delete,
        types::animal_type,
        types::animal_breeds,
        auth::signup_form,
        auth::signup,
        auth::login_form,
        auth::login,
        auth::logout
    ),
    components(
        schemas(
            User,
            Favorite,
            FavoriteForm,
            FavoritePet,
            FavoritesPage,
            HomePage,
            SearchPage,
            PetDetailPage,
            AccountPage,
            SignupForm,
            LoginForm,
            params::SearchForm,
            Meta,
            ApiResponse<HomePage>,
            ApiResponse<SearchPage>,
            ApiResponse<FavoritesPage>,
            ApiResponse<PetDetailPage>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Pages", description = "Home and search pages"),
        (name = "Favorites", description = "Saved animals of the signed-in user"),
        (name = "Pets", description = "Animal detail and favorite actions"),
        (name = "Types", description = "Species and breed lookups"),
        (name = "Auth", description = "Signup, login and logout"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

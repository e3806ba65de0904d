pub mod favorites;
pub mod users;

pub use favorites::Entity as Favorites;
pub use users::Entity as Users;

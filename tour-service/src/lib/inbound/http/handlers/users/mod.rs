pub mod delete_me;
pub mod delete_user;
pub mod get_me;
pub mod get_user;
pub mod list_users;
pub mod update_me;
pub mod update_user;

pub use delete_me::delete_me;
pub use delete_user::delete_user;
pub use get_me::get_me;
pub use get_user::get_user;
pub use list_users::list_users;
pub use update_me::update_me;
pub use update_user::update_user;

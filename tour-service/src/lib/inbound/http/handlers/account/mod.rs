pub mod forgot_password;
pub mod login;
pub mod reset_password;
pub mod signup;
pub mod update_password;

pub use forgot_password::forgot_password;
pub use login::login;
pub use reset_password::reset_password;
pub use signup::signup;
pub use update_password::update_password;

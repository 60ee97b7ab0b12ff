pub mod token;

pub use token::IssuedResetToken;
pub use token::ResetTokenIssuer;

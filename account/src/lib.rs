//! Account models: public accounts (key + derived address) and full
//! accounts able to sign data.

pub mod account;
pub mod error;
pub mod public_account;

pub use account::Account;
pub use error::AccountError;
pub use public_account::PublicAccount;

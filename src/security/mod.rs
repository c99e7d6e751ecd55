pub mod identity;
pub mod keyring;

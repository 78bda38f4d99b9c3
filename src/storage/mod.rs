mod credential_store;
#[cfg(test)]
pub(crate) mod test_flash;
#[cfg(test)]
mod tests;

pub use credential_store::{CredentialStore, StoreError};

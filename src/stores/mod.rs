pub mod activity_store;
pub mod credential_store;
pub mod profile_store;

pub use activity_store::ActivityStore;
pub use credential_store::CredentialStore;
pub use profile_store::ProfileStore;

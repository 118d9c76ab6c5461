pub mod activity;
pub mod bio_information;
pub mod emergency_contact;
pub mod user;

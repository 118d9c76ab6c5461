use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::activity;

/// One emergency contact as submitted by the client
///
/// Entries with an empty name or phone are dropped server-side rather
/// than rejected.
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContactRequest {
    /// Contact name
    #[oai(default)]
    pub name: String,

    /// Contact phone number
    #[oai(default)]
    pub phone: String,
}

/// Request model for the bio information upsert
///
/// Every field is optional on the wire; omitted fields overwrite the
/// stored value with an empty string, matching full-document semantics.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct BioInformationRequest {
    /// Legal full name
    #[oai(rename = "fullName", default)]
    pub full_name: String,

    /// Date of birth, free-form string as entered
    #[oai(rename = "dob", default)]
    pub date_of_birth: String,

    /// Gender
    #[oai(default)]
    pub gender: String,

    /// Home address
    #[oai(default)]
    pub address: String,

    /// Phone number
    #[oai(default)]
    pub phone: String,

    /// Contact email recorded in the audit trail
    #[oai(default)]
    pub email: String,

    /// Blood type
    #[oai(rename = "bloodType", default)]
    pub blood_type: String,

    /// Known allergies
    #[oai(default)]
    pub allergies: String,

    /// Current medications
    #[oai(default)]
    pub medications: String,

    /// Chronic conditions
    #[oai(rename = "chronic", default)]
    pub chronic_conditions: String,

    /// Insurance provider name
    #[oai(rename = "insuranceProvider", default)]
    pub insurance_provider: String,

    /// Insurance policy number
    #[oai(rename = "policyNumber", default)]
    pub policy_number: String,

    /// Emergency contacts, replaces the stored set wholesale
    #[oai(rename = "emergencyContacts", default)]
    pub emergency_contacts: Vec<EmergencyContactRequest>,

    /// Profile photo as a data URI or URL
    #[oai(rename = "profilePhoto", default)]
    pub profile_photo: String,

    /// Insurance card image as a data URI or URL
    #[oai(rename = "insuranceCard", default)]
    pub insurance_card: String,
}

/// One entry from the activity audit log
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ActivityResponse {
    /// Entry ID
    pub id: i64,

    /// Activity category, e.g. "login" or "profile_update"
    #[oai(rename = "type")]
    pub activity_type: String,

    /// Free-form details, JSON for profile updates
    pub details: String,

    /// When the entry was recorded (Unix timestamp)
    #[oai(rename = "createdAt")]
    pub created_at: i64,
}

impl From<activity::Model> for ActivityResponse {
    fn from(model: activity::Model) -> Self {
        Self {
            id: model.id,
            activity_type: model.activity_type,
            details: model.details,
            created_at: model.created_at,
        }
    }
}

/// Response model for the recent-activity listing
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ActivitiesResponse {
    /// Most recent entries first, at most ten
    pub activities: Vec<ActivityResponse>,
}

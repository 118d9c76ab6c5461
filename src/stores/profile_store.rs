use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionError, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::stores::ActivityStore;
use crate::types::db::bio_information::{self, Entity as BioInformation};
use crate::types::db::emergency_contact::{self, Entity as EmergencyContact};
use crate::types::internal::activity::ActivityType;

/// Caller-supplied bio fields; ids and row timestamps are managed here.
/// The email is only recorded in the audit trail, it is not a bio column.
#[derive(Debug, Clone, Default)]
pub struct BioFields {
    pub full_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub blood_type: String,
    pub allergies: String,
    pub medications: String,
    pub chronic_conditions: String,
    pub insurance_provider: String,
    pub policy_number: String,
    pub profile_photo: String,
    pub insurance_card: String,
}

#[derive(Debug, Clone)]
pub struct ContactInput {
    pub name: String,
    pub phone: String,
}

/// Applies bio updates as a single unit of work
///
/// The upsert, the contact replacement, and the audit append commit
/// together or not at all; the closure passed to `transaction` commits on
/// `Ok` and rolls back on `Err` or panic, so no exit path can leave a
/// partial write behind.
pub struct ProfileStore {
    db: DatabaseConnection,
}

impl ProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Atomically upsert bio information and replace emergency contacts
    ///
    /// Steps, all in one transaction:
    /// 1. update the user's bio row in place, or create it
    /// 2. delete every existing emergency contact for that bio row
    /// 3. insert the supplied contacts, silently skipping any with an
    ///    empty name or phone
    /// 4. append a `profile_update` activity entry
    ///
    /// # Errors
    ///
    /// Any step failing rolls the whole transaction back and surfaces a
    /// single `StoreError::Transaction`.
    pub async fn upsert_bio(
        &self,
        user_id: &str,
        bio: BioFields,
        contacts: Vec<ContactInput>,
    ) -> Result<(), StoreError> {
        let user_id = user_id.to_string();

        self.db
            .transaction::<_, (), StoreError>(move |txn| {
                Box::pin(async move {
                    let now = Utc::now().timestamp();

                    let existing = BioInformation::find()
                        .filter(bio_information::Column::UserId.eq(&user_id))
                        .one(txn)
                        .await?;

                    let bio_id = match existing {
                        Some(row) => {
                            let id = row.id.clone();
                            let mut active: bio_information::ActiveModel = row.into();
                            active.full_name = Set(bio.full_name.clone());
                            active.date_of_birth = Set(bio.date_of_birth.clone());
                            active.gender = Set(bio.gender.clone());
                            active.address = Set(bio.address.clone());
                            active.phone = Set(bio.phone.clone());
                            active.blood_type = Set(bio.blood_type.clone());
                            active.allergies = Set(bio.allergies.clone());
                            active.medications = Set(bio.medications.clone());
                            active.chronic_conditions = Set(bio.chronic_conditions.clone());
                            active.insurance_provider = Set(bio.insurance_provider.clone());
                            active.policy_number = Set(bio.policy_number.clone());
                            active.profile_photo = Set(bio.profile_photo.clone());
                            active.insurance_card = Set(bio.insurance_card.clone());
                            active.updated_at = Set(now);
                            active.update(txn).await?;
                            id
                        }
                        None => {
                            let id = Uuid::new_v4().to_string();
                            bio_information::ActiveModel {
                                id: Set(id.clone()),
                                user_id: Set(user_id.clone()),
                                full_name: Set(bio.full_name.clone()),
                                date_of_birth: Set(bio.date_of_birth.clone()),
                                gender: Set(bio.gender.clone()),
                                address: Set(bio.address.clone()),
                                phone: Set(bio.phone.clone()),
                                blood_type: Set(bio.blood_type.clone()),
                                allergies: Set(bio.allergies.clone()),
                                medications: Set(bio.medications.clone()),
                                chronic_conditions: Set(bio.chronic_conditions.clone()),
                                insurance_provider: Set(bio.insurance_provider.clone()),
                                policy_number: Set(bio.policy_number.clone()),
                                profile_photo: Set(bio.profile_photo.clone()),
                                insurance_card: Set(bio.insurance_card.clone()),
                                created_at: Set(now),
                                updated_at: Set(now),
                            }
                            .insert(txn)
                            .await?;
                            id
                        }
                    };

                    // Full replacement: no contact identity survives an update
                    EmergencyContact::delete_many()
                        .filter(emergency_contact::Column::BioInfoId.eq(&bio_id))
                        .exec(txn)
                        .await?;

                    for contact in &contacts {
                        if contact.name.is_empty() || contact.phone.is_empty() {
                            continue;
                        }
                        emergency_contact::ActiveModel {
                            id: sea_orm::ActiveValue::NotSet,
                            bio_info_id: Set(bio_id.clone()),
                            name: Set(contact.name.clone()),
                            phone: Set(contact.phone.clone()),
                            created_at: Set(now),
                            updated_at: Set(now),
                        }
                        .insert(txn)
                        .await?;
                    }

                    // Failure here aborts the whole update by design
                    let details = serde_json::json!({
                        "action": "bio_information_update",
                        "email": bio.email,
                    })
                    .to_string();
                    ActivityStore::append_with(txn, &user_id, ActivityType::ProfileUpdate, details)
                        .await?;

                    Ok(())
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(err) => StoreError::Transaction(err.to_string()),
                TransactionError::Transaction(err) => StoreError::Transaction(err.to_string()),
            })
    }

    /// Read a user's bio row together with its emergency contacts
    pub async fn get_bio(
        &self,
        user_id: &str,
    ) -> Result<(bio_information::Model, Vec<emergency_contact::Model>), StoreError> {
        let bio = BioInformation::find()
            .filter(bio_information::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(StoreError::BioNotFound)?;

        let contacts = EmergencyContact::find()
            .filter(emergency_contact::Column::BioInfoId.eq(&bio.id))
            .order_by_asc(emergency_contact::Column::Id)
            .all(&self.db)
            .await?;

        Ok((bio, contacts))
    }
}

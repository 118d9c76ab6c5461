use sea_orm::entity::prelude::*;

/// Patient bio information, at most one row per user.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bio_information")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub user_id: String,
    pub full_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
    pub phone: String,
    pub blood_type: String,
    pub allergies: String,
    pub medications: String,
    pub chronic_conditions: String,
    pub insurance_provider: String,
    pub policy_number: String,
    pub profile_photo: String,
    pub insurance_card: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

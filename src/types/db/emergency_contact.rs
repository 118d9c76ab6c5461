use sea_orm::entity::prelude::*;

/// Emergency contact owned by one bio_information row. The full set is
/// deleted and recreated on every bio update, so ids do not persist
/// across updates.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "emergency_contacts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub bio_info_id: String,
    pub name: String,
    pub phone: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create bio_information table (one row per user)
        manager
            .create_table(
                Table::create()
                    .table(BioInformation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BioInformation::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BioInformation::UserId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(BioInformation::FullName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BioInformation::DateOfBirth)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BioInformation::Gender)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BioInformation::Address)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BioInformation::Phone)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BioInformation::BloodType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BioInformation::Allergies)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BioInformation::Medications)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BioInformation::ChronicConditions)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BioInformation::InsuranceProvider)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BioInformation::PolicyNumber)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BioInformation::ProfilePhoto)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BioInformation::InsuranceCard)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BioInformation::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BioInformation::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bio_information_user_id")
                            .from(BioInformation::Table, BioInformation::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create emergency_contacts table (replaced wholesale on bio update)
        manager
            .create_table(
                Table::create()
                    .table(EmergencyContacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmergencyContacts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmergencyContacts::BioInfoId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmergencyContacts::Name)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmergencyContacts::Phone)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmergencyContacts::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmergencyContacts::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_emergency_contacts_bio_info_id")
                            .from(EmergencyContacts::Table, EmergencyContacts::BioInfoId)
                            .to(BioInformation::Table, BioInformation::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_emergency_contacts_bio_info")
                    .table(EmergencyContacts::Table)
                    .col(EmergencyContacts::BioInfoId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmergencyContacts::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(BioInformation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum BioInformation {
    Table,
    Id,
    UserId,
    FullName,
    DateOfBirth,
    Gender,
    Address,
    Phone,
    BloodType,
    Allergies,
    Medications,
    ChronicConditions,
    InsuranceProvider,
    PolicyNumber,
    ProfilePhoto,
    InsuranceCard,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EmergencyContacts {
    Table,
    Id,
    BioInfoId,
    Name,
    Phone,
    CreatedAt,
    UpdatedAt,
}

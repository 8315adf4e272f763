use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Job {
    Table,
    DepartmentId,
}

#[derive(DeriveIden)]
enum Department {
    Table,
    LeaderId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_job_department")
                    .table(Job::Table)
                    .col(Job::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_department_leader")
                    .table(Department::Table)
                    .col(Department::LeaderId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_department_leader")
                    .table(Department::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_job_department")
                    .table(Job::Table)
                    .to_owned(),
            )
            .await
    }
}

use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510020005_create_scheduled_checkouts"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("scheduled_checkouts"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("student_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("scheduled_by")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("scheduled_for")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("reason")).text().null())
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .enumeration(
                                Alias::new("scheduled_checkout_status"),
                                vec![
                                    Alias::new("pending"),
                                    Alias::new("processing"),
                                    Alias::new("executed"),
                                    Alias::new("cancelled"),
                                    Alias::new("failed"),
                                ],
                            )
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Alias::new("cancelled_at")).timestamp().null())
                    .col(ColumnDef::new(Alias::new("cancelled_by")).big_integer().null())
                    .col(ColumnDef::new(Alias::new("executed_at")).timestamp().null())
                    .col(ColumnDef::new(Alias::new("error_message")).text().null())
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .col(
                        ColumnDef::new(Alias::new("updated_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sched_checkout_student")
                            .from(Alias::new("scheduled_checkouts"), Alias::new("student_id"))
                            .to(Alias::new("students"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sched_checkout_staff")
                            .from(Alias::new("scheduled_checkouts"), Alias::new("scheduled_by"))
                            .to(Alias::new("staff"), Alias::new("id")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sched_checkout_due")
                    .table(Alias::new("scheduled_checkouts"))
                    .col(Alias::new("status"))
                    .col(Alias::new("scheduled_for"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("scheduled_checkouts")).to_owned())
            .await
    }
}

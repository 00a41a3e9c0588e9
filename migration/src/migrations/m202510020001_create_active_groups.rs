use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510020001_create_active_groups"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("active_groups"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("activity_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("room_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("start_time")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("end_time")).timestamp().null())
                    .col(ColumnDef::new(Alias::new("last_activity")).timestamp().not_null())
                    .col(
                        ColumnDef::new(Alias::new("timeout_minutes"))
                            .integer()
                            .not_null()
                            .default(30),
                    )
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
                            .name("fk_active_groups_activity")
                            .from(Alias::new("active_groups"), Alias::new("activity_id"))
                            .to(Alias::new("activities"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_active_groups_room")
                            .from(Alias::new("active_groups"), Alias::new("room_id"))
                            .to(Alias::new("rooms"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_active_groups_room")
                    .table(Alias::new("active_groups"))
                    .col(Alias::new("room_id"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("active_groups")).to_owned())
            .await
    }
}

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, Statement};
use std::env;
use tracing::info;

use crate::domain::{
    attachment::entity::attachment,
    auth::entity::user,
    capa::entity::capa,
    change_control::entity::{change_category, change_control, historical_check},
    department::entity::department,
    deviation::entity::{deviation, deviation_category},
    document::entity::{document, document_review, document_version},
    equipment::entity::equipment,
    impact::entity::{impact_answer, impact_assessment},
    investigation::entity::{investigation_team, team_member},
    location::entity::location,
    permission::entity::{permission, role_permission},
    question::entity::question,
    role::entity::role,
};

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    info!("Successfully connected to the database.");

    // Check if schema update is enabled
    let should_update_schema = env::var("DB_SCHEMA_UPDATE")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or_else(|_| {
            tracing::warn!(
                "Invalid DB_SCHEMA_UPDATE value, defaulting to false. Use 'true' or 'false'."
            );
            false
        });

    if should_update_schema {
        // Auto-create tables (Schema Sync)
        create_tables(&db).await?;
    } else {
        info!("Skipping database schema synchronization (DB_SCHEMA_UPDATE is not true).");
    }

    Ok(db)
}

async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    info!("Starting database schema synchronization...");

    // List of entities to create
    // Order matters for foreign keys! (Parent first, then Child)

    // 1. Independent Entities
    create_table_if_not_exists(db, &schema, role::Entity).await?;
    create_table_if_not_exists(db, &schema, department::Entity).await?;
    create_table_if_not_exists(db, &schema, permission::Entity).await?;
    create_table_if_not_exists(db, &schema, location::Entity).await?;
    create_table_if_not_exists(db, &schema, question::Entity).await?;
    create_table_if_not_exists(db, &schema, deviation_category::Entity).await?;
    create_table_if_not_exists(db, &schema, change_category::Entity).await?;

    // 2. Dependent Entities (Level 1)
    create_table_if_not_exists(db, &schema, user::Entity).await?;
    create_table_if_not_exists(db, &schema, role_permission::Entity).await?;
    create_table_if_not_exists(db, &schema, equipment::Entity).await?;
    create_table_if_not_exists(db, &schema, document::Entity).await?;

    // 3. Dependent Entities (Level 2)
    create_table_if_not_exists(db, &schema, document_version::Entity).await?;
    create_table_if_not_exists(db, &schema, deviation::Entity).await?;
    create_table_if_not_exists(db, &schema, change_control::Entity).await?;

    // 4. Dependent Entities (Level 3 & Sub-records)
    create_table_if_not_exists(db, &schema, document_review::Entity).await?;
    create_table_if_not_exists(db, &schema, capa::Entity).await?;
    create_table_if_not_exists(db, &schema, investigation_team::Entity).await?;
    create_table_if_not_exists(db, &schema, team_member::Entity).await?;
    create_table_if_not_exists(db, &schema, impact_assessment::Entity).await?;
    create_table_if_not_exists(db, &schema, impact_answer::Entity).await?;
    create_table_if_not_exists(db, &schema, historical_check::Entity).await?;
    create_table_if_not_exists(db, &schema, attachment::Entity).await?;

    // 부서+종류 범위 조회 최적화 인덱스
    create_index_if_not_exists(
        db,
        "idx_deviation_department",
        "deviation",
        &["department_id"],
    )
    .await?;
    create_index_if_not_exists(db, "idx_capa_deviation", "capa", &["deviation_id"]).await?;
    create_index_if_not_exists(
        db,
        "idx_change_control_department",
        "change_control",
        &["department_id"],
    )
    .await?;
    create_index_if_not_exists(
        db,
        "idx_attachment_parent",
        "attachment",
        &["parent_kind", "parent_id"],
    )
    .await?;

    info!("Database schema synchronization completed.");
    Ok(())
}

async fn create_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let cols = columns.join(", ");
    let sql = format!("CREATE INDEX {} ON {} ({})", index_name, table_name, cols);
    let stmt = Statement::from_string(backend, sql);
    match db.execute(stmt).await {
        Ok(_) => Ok(()),
        Err(e) => {
            // Ignore duplicate index errors for idempotency.
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("duplicate")
                || err_str.contains("already exists")
                || err_str.contains("exists")
            {
                Ok(())
            } else {
                tracing::error!("Failed to create index {}: {}", index_name, e);
                Err(e)
            }
        }
    }
}

async fn create_table_if_not_exists<E>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr>
where
    E: sea_orm::EntityTrait,
{
    let backend = db.get_database_backend();
    let create_stmt: Statement =
        backend.build(schema.create_table_from_entity(entity).if_not_exists());

    match db.execute(create_stmt).await {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!("Failed to create table: {}", e);
            Err(e)
        }
    }
}

use serde::{Deserialize, Serialize};
use tablecraft::*;
use tracing_subscriber::EnvFilter;

#[entity(table_name = "users")]
#[derive(Debug, Serialize, Deserialize)]
pub struct User {
    #[id]
    #[column(ty = "int")]
    pub id: i64,
    #[column(ty = "string", length = 100, unique)]
    pub email: String,
    #[column(ty = "bool", default = true)]
    pub active: bool,
}

#[entity(table_name = "posts")]
#[derive(Debug, Serialize, Deserialize)]
pub struct Post {
    #[id]
    #[column(ty = "int")]
    pub id: i64,
    #[column(ty = "int")]
    pub author_id: i64,
    #[column(ty = "string", length = 200)]
    pub title: String,
    #[column(ty = "text", nullable)]
    pub body: Option<String>,
    #[column(ty = "enum", options("draft", "published"), default = "draft")]
    pub state: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let config = match std::env::var("TABLECRAFT_DB") {
        Ok(raw) => DatabaseConfig::from_json(&raw)?,
        Err(_) => DatabaseConfig {
            database: "tablecraft_demo".into(),
            ..DatabaseConfig::default()
        },
    };

    println!("{}", serde_json::to_string_pretty(&*User::describe()?)?);

    let orm = Orm::new(Database::connect(config).await?)
        .register::<User>()
        .register::<Post>();

    println!("{}", orm.create_table_sql::<Post>()?);

    for result in orm.migrate().await? {
        println!("rows affected: {}", result.rows_affected());
    }

    Ok(())
}

use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use tracing::info;

use crate::config::TalentConfig;

/// Opens the configured database and selects the namespace and database.
pub async fn connect(config: &TalentConfig) -> Result<Surreal<Any>, surrealdb::Error> {
    let endpoint = config.db_endpoint();
    let db = any::connect(endpoint).await?;

    if !config.db_in_memory
        && let (Some(username), Some(password)) =
            (config.db_username.as_ref(), config.db_password.as_ref())
    {
        db.signin(Root {
            username: username.as_str(),
            password: password.as_str(),
        })
        .await?;
    }

    db.use_ns(config.db_namespace.as_str())
        .use_db(config.db_name.as_str())
        .await?;
    info!(
        endpoint,
        namespace = %config.db_namespace,
        database = %config.db_name,
        "database ready"
    );
    Ok(db)
}

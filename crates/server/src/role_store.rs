use shared_types::{AppError, Identity, Role, RoleStore, RoleTieBreak};
use sqlx::{Pool, Postgres};

use crate::repo::user_role;

/// Role store backed by the `user_roles` table.
#[derive(Clone)]
pub struct PgRoleStore {
    pool: Pool<Postgres>,
    tie_break: RoleTieBreak,
}

impl PgRoleStore {
    pub fn new(pool: Pool<Postgres>, tie_break: RoleTieBreak) -> Self {
        Self { pool, tie_break }
    }

    pub fn tie_break(&self) -> RoleTieBreak {
        self.tie_break
    }
}

impl RoleStore for PgRoleStore {
    #[tracing::instrument(skip(self), fields(tie_break = ?self.tie_break))]
    async fn fetch_role(&self, identity: &Identity) -> Result<Option<Role>, AppError> {
        match self.tie_break {
            RoleTieBreak::Lexical => {
                let first = user_role::first_role_lexical(&self.pool, identity.user_id).await?;
                Ok(first.and_then(|name| RoleTieBreak::Lexical.select(&[name])))
            }
            RoleTieBreak::HighestPrivilege => {
                let rows = user_role::list_roles(&self.pool, identity.user_id).await?;
                Ok(RoleTieBreak::HighestPrivilege.select(rows.as_slice()))
            }
        }
    }
}

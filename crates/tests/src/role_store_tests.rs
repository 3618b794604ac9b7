use server::repo::user_role;
use server::role_store::PgRoleStore;
use shared_types::{Identity, Role, RoleResolver, RoleStore, RoleTieBreak};
use uuid::Uuid;

use crate::common::{seed_roles, test_pool};

#[tokio::test]
async fn identity_without_rows_has_no_role() {
    let (pool, _guard) = test_pool().await;
    let store = PgRoleStore::new(pool, RoleTieBreak::Lexical);

    let role = store.fetch_role(&Identity::new(Uuid::new_v4())).await.unwrap();
    assert_eq!(role, None);
}

#[tokio::test]
async fn single_row_is_returned() {
    let (pool, _guard) = test_pool().await;
    let identity = seed_roles(&pool, &["moderator"]).await;

    for tie_break in [RoleTieBreak::Lexical, RoleTieBreak::HighestPrivilege] {
        let store = PgRoleStore::new(pool.clone(), tie_break);
        assert_eq!(
            store.fetch_role(&identity).await.unwrap(),
            Some(Role::Moderator)
        );
    }
}

#[tokio::test]
async fn lexical_order_picks_admin_over_super_admin() {
    let (pool, _guard) = test_pool().await;
    let identity = seed_roles(&pool, &["super_admin", "admin"]).await;
    let store = PgRoleStore::new(pool, RoleTieBreak::Lexical);

    assert_eq!(store.fetch_role(&identity).await.unwrap(), Some(Role::Admin));
}

#[tokio::test]
async fn lexical_order_picks_moderator_over_user() {
    let (pool, _guard) = test_pool().await;
    let identity = seed_roles(&pool, &["user", "moderator"]).await;
    let store = PgRoleStore::new(pool, RoleTieBreak::Lexical);

    assert_eq!(
        store.fetch_role(&identity).await.unwrap(),
        Some(Role::Moderator)
    );
}

#[tokio::test]
async fn highest_privilege_picks_super_admin() {
    let (pool, _guard) = test_pool().await;
    let identity = seed_roles(&pool, &["admin", "super_admin", "user"]).await;
    let store = PgRoleStore::new(pool, RoleTieBreak::HighestPrivilege);

    assert_eq!(
        store.fetch_role(&identity).await.unwrap(),
        Some(Role::SuperAdmin)
    );
}

#[tokio::test]
async fn rows_are_scoped_to_identity() {
    let (pool, _guard) = test_pool().await;
    let admin = seed_roles(&pool, &["admin"]).await;
    let other = seed_roles(&pool, &["moderator"]).await;

    let roles = user_role::list_roles(&pool, admin.user_id).await.unwrap();
    assert_eq!(roles, vec!["admin".to_string()]);
    let first = user_role::first_role_lexical(&pool, other.user_id)
        .await
        .unwrap();
    assert_eq!(first.as_deref(), Some("moderator"));
}

#[tokio::test]
async fn list_roles_is_sorted_by_name() {
    let (pool, _guard) = test_pool().await;
    let identity = seed_roles(&pool, &["user", "super_admin", "moderator", "admin"]).await;

    let roles = user_role::list_roles(&pool, identity.user_id).await.unwrap();
    assert_eq!(roles, vec!["admin", "moderator", "super_admin", "user"]);
}

#[tokio::test]
async fn unknown_role_rows_are_rejected_by_schema() {
    let (pool, _guard) = test_pool().await;
    let result = sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, 'owner')")
        .bind(Uuid::new_v4())
        .execute(&pool)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn resolver_over_postgres_defaults_to_user() {
    let (pool, _guard) = test_pool().await;
    let resolver = RoleResolver::new(PgRoleStore::new(pool, RoleTieBreak::Lexical));

    let role = resolver.resolve(Some(Identity::new(Uuid::new_v4()))).await;
    assert_eq!(role, Role::User);
    assert!(!resolver.is_loading());
}

#[tokio::test]
async fn resolver_over_closed_pool_defaults_to_user() {
    let (pool, _guard) = test_pool().await;
    let identity = seed_roles(&pool, &["admin"]).await;
    pool.close().await;

    let resolver = RoleResolver::new(PgRoleStore::new(pool, RoleTieBreak::Lexical));
    assert_eq!(resolver.resolve(Some(identity)).await, Role::User);
}

#[tokio::test]
async fn lexical_lookup_skips_unknown_role_names() {
    let (pool, _guard) = test_pool().await;
    let user_id = Uuid::new_v4();

    // Rolled back on drop, so the CHECK constraint is back for other tests.
    let mut tx = pool.begin().await.unwrap();
    sqlx::query("ALTER TABLE user_roles DROP CONSTRAINT user_roles_role_check")
        .execute(&mut *tx)
        .await
        .unwrap();
    for role in ["aardvark", "moderator"] {
        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
            .bind(user_id)
            .bind(role)
            .execute(&mut *tx)
            .await
            .unwrap();
    }

    let first = user_role::first_role_lexical(&mut *tx, user_id).await.unwrap();
    assert_eq!(first.as_deref(), Some("moderator"));

    let all = user_role::list_roles(&mut *tx, user_id).await.unwrap();
    assert_eq!(all, vec!["aardvark", "moderator"]);
    assert_eq!(
        RoleTieBreak::HighestPrivilege.select(all.as_slice()),
        Some(Role::Moderator)
    );
}

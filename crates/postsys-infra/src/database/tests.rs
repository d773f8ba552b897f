use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, Value};
use uuid::Uuid;

use postsys_core::domain::{NewUser, Pagination, Post, Role, User};
use postsys_core::error::RepoError;
use postsys_core::ports::BaseRepository;

use crate::database::entity::{post, user};
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn user_row(id: Uuid, role: user::RoleColumn) -> user::Model {
    let now = Utc::now();
    user::Model {
        id,
        name: "Ada".to_owned(),
        surname: "Lovelace".to_owned(),
        username: "ada".to_owned(),
        email: "ada@example.com".to_owned(),
        password_hash: "hash".to_owned(),
        role,
        active: true,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn find_post_by_id_maps_columns() {
    let post_id = Uuid::new_v4();
    let keeper = Uuid::new_v4();
    let category = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post::Model {
            id: post_id,
            title: "Test Post".to_owned(),
            category_id: category,
            content: "Content".to_owned(),
            keeper_id: keeper,
            active: false,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post: Post = repo.find_by_id(post_id).await.unwrap().unwrap();

    assert_eq!(post.title, "Test Post");
    assert_eq!(post.keeper, keeper);
    assert_eq!(post.category, category);
    assert!(!post.active);
}

#[tokio::test]
async fn insert_user_returns_stored_row() {
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(id, user::RoleColumn::Admin)]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let mut draft = User::new(NewUser {
        name: "Ada".to_owned(),
        surname: "Lovelace".to_owned(),
        username: "ada".to_owned(),
        email: "ada@example.com".to_owned(),
        password_hash: "hash".to_owned(),
        role: Role::Admin,
    });
    draft.id = id;

    let saved = repo.insert(draft).await.unwrap();

    assert_eq!(saved.id, id);
    assert_eq!(saved.role, Role::Admin);
}

#[tokio::test]
async fn update_of_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user::Model>::new()])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let user: User = user_row(Uuid::new_v4(), user::RoleColumn::User).into();

    let result = repo.update(user).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn list_active_breaks_created_at_ties_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![BTreeMap::from([(
            "num_items",
            Value::BigInt(Some(0)),
        )])]])
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let page: postsys_core::domain::Page<Post> =
        repo.list_active(Pagination::default()).await.unwrap();
    assert_eq!(page.total, 0);

    let log = format!("{:?}", repo.db.into_transaction_log());
    assert!(
        log.contains(r#"ORDER BY \"posts\".\"created_at\" ASC, \"posts\".\"id\" ASC"#),
        "{log}"
    );
}

mod common;

use common::setup_test_database;
use pressroom::error::ApiError;
use pressroom::orm::blog_activity_logs::{self, LogAction};
use pressroom::orm::blog_posts::{self, PublishStatus};
use pressroom::pagination::PageRequest;
use pressroom::posts::{self, PostFilters};
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, ConnectionTrait, DatabaseConnection};

async fn logs_for_post(db: &DatabaseConnection, post_id: &str) -> Vec<blog_activity_logs::Model> {
    blog_activity_logs::Entity::find()
        .filter(blog_activity_logs::Column::PostId.eq(post_id))
        .order_by_asc(blog_activity_logs::Column::CreatedAt)
        .all(db)
        .await
        .unwrap()
}

#[actix_rt::test]
async fn create_starts_a_draft_and_logs_it() {
    let db = setup_test_database().await;

    let post = posts::create(&db, 7).await.unwrap();

    assert_eq!(post.status, PublishStatus::Draft);
    assert_eq!(post.slug, post.id);
    assert_eq!(post.created_by, 7);
    assert_eq!(post.updated_by, Some(7));
    assert!(post.deleted_at.is_none());

    let logs = logs_for_post(&db, &post.id).await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, LogAction::Created);
    assert_eq!(logs[0].user_id, 7);
}

#[actix_rt::test]
async fn soft_delete_moves_the_post_to_the_trash() {
    let db = setup_test_database().await;
    let post = posts::create(&db, 7).await.unwrap();

    posts::soft_delete(&db, &post.id, 9).await.unwrap();

    let trashed = posts::find_by_id(&db, &post.id, true).await.unwrap().unwrap();
    assert!(trashed.deleted_at.is_some());
    assert_eq!(trashed.deleted_by, Some(9));

    // Gone from the active scope, present in the trash scope.
    assert!(posts::find_by_id(&db, &post.id, false).await.unwrap().is_none());

    let logs = logs_for_post(&db, &post.id).await;
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[1].action, LogAction::Deleted);
    assert_eq!(logs[1].user_id, 9);
    assert_eq!(
        logs[1].details,
        Some(serde_json::json!({ "action": "Soft Delete" }))
    );
}

#[actix_rt::test]
async fn soft_delete_twice_is_rejected_without_a_second_log() {
    let db = setup_test_database().await;
    let post = posts::create(&db, 7).await.unwrap();
    posts::soft_delete(&db, &post.id, 7).await.unwrap();

    let err = posts::soft_delete(&db, &post.id, 7).await.unwrap_err();
    assert!(matches!(err, ApiError::AlreadyDeleted(_)));

    assert_eq!(logs_for_post(&db, &post.id).await.len(), 2);
}

#[actix_rt::test]
async fn soft_delete_of_a_missing_post_is_not_found() {
    let db = setup_test_database().await;
    let err = posts::soft_delete(&db, "no-such-id", 7).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[actix_rt::test]
async fn force_delete_requires_a_prior_soft_delete() {
    let db = setup_test_database().await;
    let post = posts::create(&db, 7).await.unwrap();

    let err = posts::permanently_delete(&db, &post.id, 7).await.unwrap_err();
    assert!(matches!(err, ApiError::PreconditionFailed(_)));

    // The post is untouched and nothing extra was logged.
    assert!(posts::find_by_id(&db, &post.id, false).await.unwrap().is_some());
    assert_eq!(logs_for_post(&db, &post.id).await.len(), 1);
}

#[actix_rt::test]
async fn force_delete_snapshots_the_row_into_the_log() {
    let db = setup_test_database().await;
    let post = posts::create(&db, 7).await.unwrap();
    posts::soft_delete(&db, &post.id, 7).await.unwrap();
    let id = post.id.clone();

    posts::permanently_delete(&db, &id, 11).await.unwrap();

    assert!(posts::find_by_id(&db, &id, true).await.unwrap().is_none());

    // Three entries: created, deleted, permanently_deleted. The subject
    // reference was nulled by the FK, so fetch by action.
    let logs = blog_activity_logs::Entity::find()
        .order_by_asc(blog_activity_logs::Column::CreatedAt)
        .all(&db)
        .await
        .unwrap();
    assert_eq!(logs.len(), 3);

    let last = &logs[2];
    assert_eq!(last.action, LogAction::PermanentlyDeleted);
    assert_eq!(last.user_id, 11);
    let snapshot = last.details.as_ref().unwrap();
    assert_eq!(snapshot["id"], serde_json::json!(id));
    assert!(snapshot["deleted_at"].is_string());
}

#[actix_rt::test]
async fn trash_listing_orders_by_deletion_time() {
    let db = setup_test_database().await;
    let first = posts::create(&db, 1).await.unwrap();
    let second = posts::create(&db, 1).await.unwrap();
    posts::soft_delete(&db, &first.id, 1).await.unwrap();
    posts::soft_delete(&db, &second.id, 1).await.unwrap();

    // Push the first deletion into the past for a deterministic order.
    blog_posts::Entity::update_many()
        .col_expr(
            blog_posts::Column::DeletedAt,
            Expr::value(Some(chrono::Utc::now() - chrono::Duration::hours(1))),
        )
        .filter(blog_posts::Column::Id.eq(first.id.clone()))
        .exec(&db)
        .await
        .unwrap();

    let page = posts::list_trashed(&db, &PostFilters::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].id, second.id);
    assert_eq!(page.items[1].id, first.id);

    let active = posts::list(&db, &PostFilters::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(active.total, 0);
}

#[actix_rt::test]
async fn restore_returns_the_post_to_the_active_scope() {
    let db = setup_test_database().await;
    let post = posts::create(&db, 7).await.unwrap();
    posts::soft_delete(&db, &post.id, 7).await.unwrap();

    posts::restore(&db, &post.id).await.unwrap();

    let restored = posts::find_by_id(&db, &post.id, false).await.unwrap().unwrap();
    assert!(restored.deleted_at.is_none());
    assert!(restored.deleted_by.is_none());
}

#[actix_rt::test]
async fn status_filter_narrows_the_active_listing() {
    let db = setup_test_database().await;
    let draft = posts::create(&db, 1).await.unwrap();
    let published = posts::create(&db, 1).await.unwrap();

    let mut active: blog_posts::ActiveModel = published.clone().into();
    active.status = Set(PublishStatus::Published);
    active.update(&db).await.unwrap();

    let filters = PostFilters {
        status: Some(PublishStatus::Published),
        ..Default::default()
    };
    let page = posts::list(&db, &filters, PageRequest::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, published.id);

    let all = posts::list(&db, &PostFilters::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.total, 2);
    assert!(all.items.iter().any(|p| p.id == draft.id));
}

#[actix_rt::test]
async fn search_matches_titles_and_summaries() {
    let db = setup_test_database().await;
    let hit = posts::create(&db, 1).await.unwrap();
    let miss = posts::create(&db, 1).await.unwrap();

    let mut active: blog_posts::ActiveModel = hit.clone().into();
    active.title_en = Set(Some("Rust memory model deep dive".to_owned()));
    active.update(&db).await.unwrap();
    let mut active: blog_posts::ActiveModel = miss.clone().into();
    active.title_en = Set(Some("Weekend cooking notes".to_owned()));
    active.update(&db).await.unwrap();

    let filters = PostFilters {
        search: Some("memory".to_owned()),
        ..Default::default()
    };
    let page = posts::list(&db, &filters, PageRequest::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, hit.id);
}

#[actix_rt::test]
async fn a_failed_log_write_rolls_back_the_soft_delete() {
    let db = setup_test_database().await;
    let post = posts::create(&db, 7).await.unwrap();

    let backend = db.get_database_backend();
    db.execute(sea_orm::Statement::from_string(
        backend,
        "DROP TABLE blog_activity_logs".to_owned(),
    ))
    .await
    .unwrap();

    let err = posts::soft_delete(&db, &post.id, 7).await.unwrap_err();
    assert!(matches!(err, ApiError::Internal(_)));

    let row = posts::find_by_id(&db, &post.id, true).await.unwrap().unwrap();
    assert!(row.deleted_at.is_none());
    assert!(row.deleted_by.is_none());
}

mod common;

use common::setup_test_database;
use pressroom::articles;
use pressroom::error::ApiError;
use pressroom::orm::blog_activity_logs::{self, LogAction};
use pressroom::orm::blog_articles::PublishStatus;
use sea_orm::{entity::*, query::*};

#[actix_rt::test]
async fn article_lifecycle_logs_each_step_under_article_id() {
    let db = setup_test_database().await;

    let article = articles::create(&db, 3).await.unwrap();
    assert_eq!(article.status, PublishStatus::Draft);
    assert_eq!(article.slug, article.id);

    articles::soft_delete(&db, &article.id, 3).await.unwrap();
    let err = articles::soft_delete(&db, &article.id, 3).await.unwrap_err();
    assert!(matches!(err, ApiError::AlreadyDeleted(_)));

    articles::permanently_delete(&db, &article.id, 3).await.unwrap();
    assert!(articles::find_by_id(&db, &article.id, true)
        .await
        .unwrap()
        .is_none());

    let logs = blog_activity_logs::Entity::find()
        .order_by_asc(blog_activity_logs::Column::CreatedAt)
        .all(&db)
        .await
        .unwrap();
    assert_eq!(logs.len(), 3);
    assert_eq!(logs[0].action, LogAction::Created);
    assert_eq!(logs[1].action, LogAction::Deleted);
    assert_eq!(logs[2].action, LogAction::PermanentlyDeleted);
    assert!(logs.iter().all(|l| l.post_id.is_none()));
}

#[actix_rt::test]
async fn article_force_delete_requires_prior_soft_delete() {
    let db = setup_test_database().await;
    let article = articles::create(&db, 3).await.unwrap();

    let err = articles::permanently_delete(&db, &article.id, 3)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::PreconditionFailed(_)));
    assert!(articles::find_by_id(&db, &article.id, false)
        .await
        .unwrap()
        .is_some());
}

#[actix_rt::test]
async fn article_restore_clears_the_trash_state() {
    let db = setup_test_database().await;
    let article = articles::create(&db, 3).await.unwrap();
    articles::soft_delete(&db, &article.id, 3).await.unwrap();

    articles::restore(&db, &article.id).await.unwrap();

    let restored = articles::find_by_id(&db, &article.id, false)
        .await
        .unwrap()
        .unwrap();
    assert!(restored.deleted_at.is_none());
    assert!(restored.deleted_by.is_none());
}

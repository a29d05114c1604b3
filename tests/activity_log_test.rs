mod common;

use chrono::{Duration, Utc};
use common::setup_test_database;
use pressroom::activity_log::{self, LogFilters, Subject};
use pressroom::articles;
use pressroom::orm::blog_activity_logs::{self, LogAction};
use pressroom::pagination::PageRequest;
use pressroom::posts;
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*};

#[actix_rt::test]
async fn post_and_article_trails_stay_separate() {
    let db = setup_test_database().await;
    let post = posts::create(&db, 1).await.unwrap();
    let article = articles::create(&db, 2).await.unwrap();

    let post_filters = LogFilters {
        post_id: Some(post.id.clone()),
        ..Default::default()
    };
    let page = activity_log::list(&db, &post_filters, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].post_id, Some(post.id.clone()));
    assert!(page.items[0].article_id.is_none());

    let article_filters = LogFilters {
        article_id: Some(article.id.clone()),
        ..Default::default()
    };
    let page = activity_log::list(&db, &article_filters, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].article_id, Some(article.id));
    assert!(page.items[0].post_id.is_none());
}

#[actix_rt::test]
async fn user_filter_selects_that_actors_entries() {
    let db = setup_test_database().await;
    let post = posts::create(&db, 1).await.unwrap();
    posts::soft_delete(&db, &post.id, 2).await.unwrap();

    let filters = LogFilters {
        user_id: Some(2),
        ..Default::default()
    };
    let page = activity_log::list(&db, &filters, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].action, LogAction::Deleted);
}

#[actix_rt::test]
async fn date_range_bounds_are_whole_days_inclusive() {
    let db = setup_test_database().await;
    activity_log::log_activity(&db, 1, Subject::None, LogAction::Updated, None)
        .await
        .unwrap();
    activity_log::log_activity(&db, 1, Subject::None, LogAction::Published, None)
        .await
        .unwrap();

    // Move the second entry two days back.
    let old = blog_activity_logs::Entity::find()
        .filter(blog_activity_logs::Column::Action.eq(LogAction::Published))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    blog_activity_logs::Entity::update_many()
        .col_expr(
            blog_activity_logs::Column::CreatedAt,
            Expr::value(Utc::now() - Duration::days(2)),
        )
        .filter(blog_activity_logs::Column::Id.eq(old.id))
        .exec(&db)
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let filters = LogFilters {
        start_date: Some(today),
        end_date: Some(today),
        ..Default::default()
    };
    let page = activity_log::list(&db, &filters, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].action, LogAction::Updated);
}

#[actix_rt::test]
async fn zero_page_values_are_clamped_not_underflowed() {
    let db = setup_test_database().await;
    activity_log::log_activity(&db, 1, Subject::None, LogAction::Updated, None)
        .await
        .unwrap();

    let page = activity_log::list(
        &db,
        &LogFilters::default(),
        PageRequest {
            page: 0,
            per_page: 0,
        },
    )
    .await
    .unwrap();

    assert_eq!(page.current_page, 1);
    assert_eq!(page.per_page, 1);
    assert_eq!(page.items.len(), 1);
}

#[actix_rt::test]
async fn listing_is_newest_first_and_paginates() {
    let db = setup_test_database().await;
    for _ in 0..3 {
        activity_log::log_activity(&db, 1, Subject::None, LogAction::Updated, None)
            .await
            .unwrap();
    }

    let page = activity_log::list(
        &db,
        &LogFilters::default(),
        PageRequest {
            page: 1,
            per_page: 2,
        },
    )
    .await
    .unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.last_page, 2);
    assert_eq!(page.items.len(), 2);
    assert!(page.items[0].created_at >= page.items[1].created_at);

    let page2 = activity_log::list(
        &db,
        &LogFilters::default(),
        PageRequest {
            page: 2,
            per_page: 2,
        },
    )
    .await
    .unwrap();
    assert_eq!(page2.items.len(), 1);
    assert_eq!(page2.current_page, 2);
}

mod common;

use chrono::Utc;
use common::setup_test_database;
use pressroom::error::ApiError;
use pressroom::orm::{blog_categories, blog_post_categories, blog_post_tags};
use pressroom::pagination::PageRequest;
use pressroom::posts;
use pressroom::taxonomy::{self, TaxonomyFilters};
use sea_orm::{entity::*, query::*, DatabaseConnection};

async fn link_post_to_category(db: &DatabaseConnection, post_id: &str, category_id: &str) {
    blog_post_categories::ActiveModel {
        post_id: Set(post_id.to_owned()),
        category_id: Set(category_id.to_owned()),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .unwrap();
}

#[actix_rt::test]
async fn category_create_generates_a_slug() {
    let db = setup_test_database().await;

    let category = taxonomy::create_category(&db, "ข่าวเทคโนโลยี", "Tech News")
        .await
        .unwrap();
    assert_eq!(category.slug, "tech-news");
    assert_eq!(category.name_th, "ข่าวเทคโนโลยี");
}

#[actix_rt::test]
async fn duplicate_category_names_are_rejected() {
    let db = setup_test_database().await;
    taxonomy::create_category(&db, "ข่าว", "News").await.unwrap();

    let err = taxonomy::create_category(&db, "อื่น", "News")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    // Updating a category to its own names is not a collision.
    let other = taxonomy::create_category(&db, "กีฬา", "Sports").await.unwrap();
    let updated = taxonomy::update_category(&db, &other.id, "กีฬา", "Sports")
        .await
        .unwrap();
    assert_eq!(updated.id, other.id);

    // But taking another category's name is.
    let err = taxonomy::update_category(&db, &other.id, "ข่าว", "Other")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[actix_rt::test]
async fn referenced_category_cannot_be_deleted() {
    let db = setup_test_database().await;
    let category = taxonomy::create_category(&db, "ข่าว", "News").await.unwrap();
    let post = posts::create(&db, 1).await.unwrap();
    link_post_to_category(&db, &post.id, &category.id).await;

    let err = taxonomy::delete_category(&db, &category.id).await.unwrap_err();
    assert!(matches!(err, ApiError::PreconditionFailed(_)));

    // The category survived the refused delete.
    assert!(blog_categories::Entity::find_by_id(category.id.clone())
        .one(&db)
        .await
        .unwrap()
        .is_some());

    // After unlinking, deletion goes through.
    blog_post_categories::Entity::delete_many()
        .filter(blog_post_categories::Column::CategoryId.eq(category.id.clone()))
        .exec(&db)
        .await
        .unwrap();
    taxonomy::delete_category(&db, &category.id).await.unwrap();
    assert!(blog_categories::Entity::find_by_id(category.id)
        .one(&db)
        .await
        .unwrap()
        .is_none());
}

#[actix_rt::test]
async fn deleting_a_missing_category_is_not_found() {
    let db = setup_test_database().await;
    let err = taxonomy::delete_category(&db, "no-such-id").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[actix_rt::test]
async fn tags_delete_even_when_referenced() {
    let db = setup_test_database().await;
    let tag = taxonomy::create_tag(&db, "สนุก", "Fun").await.unwrap();
    let post = posts::create(&db, 1).await.unwrap();
    blog_post_tags::ActiveModel {
        post_id: Set(post.id.clone()),
        tag_id: Set(tag.id.clone()),
        created_at: Set(Utc::now()),
    }
    .insert(&db)
    .await
    .unwrap();

    taxonomy::delete_tag(&db, &tag.id).await.unwrap();

    let err = taxonomy::delete_tag(&db, &tag.id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[actix_rt::test]
async fn category_posts_lists_only_active_linked_posts() {
    let db = setup_test_database().await;
    let category = taxonomy::create_category(&db, "ข่าว", "News").await.unwrap();
    let linked = posts::create(&db, 1).await.unwrap();
    let trashed = posts::create(&db, 1).await.unwrap();
    let _unlinked = posts::create(&db, 1).await.unwrap();
    link_post_to_category(&db, &linked.id, &category.id).await;
    link_post_to_category(&db, &trashed.id, &category.id).await;
    posts::soft_delete(&db, &trashed.id, 1).await.unwrap();

    let page = taxonomy::category_posts(&db, &category.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, linked.id);

    let err = taxonomy::category_posts(&db, "no-such-id", PageRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[actix_rt::test]
async fn category_search_spans_both_languages() {
    let db = setup_test_database().await;
    taxonomy::create_category(&db, "ข่าวเทคโนโลยี", "Tech").await.unwrap();
    taxonomy::create_category(&db, "กีฬา", "Sports").await.unwrap();

    let filters = TaxonomyFilters {
        search: Some("เทคโนโลยี".to_owned()),
        ..Default::default()
    };
    let page = taxonomy::list_categories(&db, &filters, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name_en, "Tech");
}

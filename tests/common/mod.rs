//! Shared harness for integration tests: an in-memory SQLite database with
//! the full schema derived from the entities.

use pressroom::orm::{
    blog_activity_logs, blog_article_authors, blog_articles, blog_authors, blog_categories,
    blog_post_categories, blog_post_tags, blog_posts, blog_tags, members,
};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};

/// Fresh database per test. The pool is capped at one connection because
/// every pooled `sqlite::memory:` connection would otherwise be its own
/// empty database.
pub async fn setup_test_database() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    // Parents before children so the log table's foreign keys resolve.
    db.execute(backend.build(&schema.create_table_from_entity(blog_posts::Entity)))
        .await
        .expect("create blog_posts");
    db.execute(backend.build(&schema.create_table_from_entity(blog_articles::Entity)))
        .await
        .expect("create blog_articles");
    db.execute(backend.build(&schema.create_table_from_entity(blog_categories::Entity)))
        .await
        .expect("create blog_categories");
    db.execute(backend.build(&schema.create_table_from_entity(blog_tags::Entity)))
        .await
        .expect("create blog_tags");
    db.execute(backend.build(&schema.create_table_from_entity(blog_authors::Entity)))
        .await
        .expect("create blog_authors");
    db.execute(backend.build(&schema.create_table_from_entity(blog_post_categories::Entity)))
        .await
        .expect("create blog_post_categories");
    db.execute(backend.build(&schema.create_table_from_entity(blog_post_tags::Entity)))
        .await
        .expect("create blog_post_tags");
    db.execute(backend.build(&schema.create_table_from_entity(blog_article_authors::Entity)))
        .await
        .expect("create blog_article_authors");
    db.execute(backend.build(&schema.create_table_from_entity(blog_activity_logs::Entity)))
        .await
        .expect("create blog_activity_logs");
    db.execute(backend.build(&schema.create_table_from_entity(members::Entity)))
        .await
        .expect("create members");

    db
}

pub mod blog_activity_logs;
pub mod blog_article_authors;
pub mod blog_articles;
pub mod blog_authors;
pub mod blog_categories;
pub mod blog_post_categories;
pub mod blog_post_tags;
pub mod blog_posts;
pub mod blog_tags;
pub mod members;

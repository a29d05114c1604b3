pub mod activity_log;
pub mod authors;
pub mod blog_articles;
pub mod blog_posts;
pub mod categories_tags;
pub mod index;
pub mod members;
pub mod params;
pub mod response;

use actix_web::web::ServiceConfig;

/// Mount every route. Literal paths (like `/trashed`) are registered
/// before their `{id}` siblings inside each module.
pub fn configure(conf: &mut ServiceConfig) {
    index::configure(conf);
    activity_log::configure(conf);
    authors::configure(conf);
    blog_articles::configure(conf);
    blog_posts::configure(conf);
    categories_tags::configure(conf);
    members::configure(conf);
}

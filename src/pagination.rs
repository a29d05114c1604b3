//! Offset pagination shared by every listing query.
//!
//! Pages are 1-based on the wire; `fetch_page` translates to the 0-based
//! pages sea-orm's paginator expects.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, Select};

pub const DEFAULT_PER_PAGE: u64 = 10;

#[derive(Clone, Copy, Debug)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Build from raw query parameters, clamping zeroes up to 1.
    pub fn new(page: Option<u64>, per_page: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).max(1),
        }
    }
}

/// One page of results plus the counters the response envelope needs.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
}

/// Run a filtered select as one page. `last_page` is never below 1 so an
/// empty result still renders a sane pagination block. A zero `page` is
/// clamped here too, so a literally-built request cannot underflow.
pub async fn fetch_page<C, E>(
    conn: &C,
    select: Select<E>,
    request: PageRequest,
) -> Result<Page<E::Model>, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: Send + Sync,
{
    let page = request.page.max(1);
    let paginator = select.paginate(conn, request.per_page.max(1));
    let counts = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(page - 1).await?;

    Ok(Page {
        items,
        current_page: page,
        per_page: request.per_page.max(1),
        total: counts.number_of_items,
        last_page: counts.number_of_pages.max(1),
    })
}

pub mod advocate;
pub mod page;
pub mod time_serde;

pub use advocate::{Advocate, AdvocatePage};
pub use page::{PageLimits, PageQuery, RawPageParams, total_pages};

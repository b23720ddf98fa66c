pub mod client;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod rss;
mod retry;
pub mod types;

pub use client::FeedClient;
pub use error::FeedError;
pub use extract::extract_content;
pub use normalize::{normalize_article, normalize_game};
pub use rss::{parse_rss, DEFAULT_IMAGE_URL};
pub use types::RawItem;

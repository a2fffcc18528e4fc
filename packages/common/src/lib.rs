//! Domain core of the bloglist service: blog records, aggregate statistics,
//! the ownership rule for deletion, and the workflows that apply it against
//! an injected [`store::BlogStore`].

pub mod id;
pub mod ownership;
pub mod record;
pub mod service;
pub mod stats;
pub mod store;

pub use id::{BlogId, MalformedId, UserId};
pub use record::{BlogRecord, BlogUpdate, BlogWithOwner, NewBlog, OwnerSummary};
pub use service::BlogError;
pub use stats::{AuthorBlogs, AuthorLikes, BlogStats};

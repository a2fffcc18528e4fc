mod error;
mod traits;

pub mod memory;

pub use error::StoreError;
pub use memory::InMemoryBlogStore;
pub use traits::BlogStore;

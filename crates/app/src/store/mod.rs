//! Document Store
//!
//! The hosted document database that owns order documents. Everything the service knows about
//! orders comes from [`DocumentStore::fetch_orders`]; the two mutations are applied remotely
//! first and mirrored locally only once they succeed.

use async_trait::async_trait;
use mockall::automock;
use orderdesk::orders::{ImageRef, Order, OrderId, OrderStatus};

mod errors;
pub mod images;
mod memory;
mod records;
pub mod sanity;

pub use errors::DocumentStoreError;
pub use memory::InMemoryDocumentStore;
pub use sanity::{DEFAULT_API_VERSION, SanityClient, SanityConfig};

#[automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read every order document, cart items expanded, in store order.
    async fn fetch_orders(&self) -> Result<Vec<Order>, DocumentStoreError>;

    /// Set the status field of one order document.
    async fn set_order_status(
        &self,
        order: &OrderId,
        status: OrderStatus,
    ) -> Result<(), DocumentStoreError>;

    /// Delete one order document. Referenced documents are left alone.
    async fn delete_order(&self, order: &OrderId) -> Result<(), DocumentStoreError>;

    /// Displayable URL for an image asset, when the reference can be resolved.
    fn image_url(&self, image: &ImageRef) -> Option<String>;
}

//! In-memory document store, seeded from fixtures.

use std::path::Path;

use async_trait::async_trait;
use orderdesk::{
    fixtures::{FixtureError, OrdersFixture},
    orders::{ImageRef, Order, OrderId, OrderStatus},
};
use tokio::sync::RwLock;

use crate::store::{DocumentStore, DocumentStoreError, images};

#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    orders: RwLock<Vec<Order>>,
    images: Option<(String, String)>,
}

impl InMemoryDocumentStore {
    #[must_use]
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
            images: None,
        }
    }

    /// Seed the store from a YAML orders fixture.
    ///
    /// # Errors
    ///
    /// Returns an error when the fixture cannot be read or contains invalid orders.
    pub fn from_fixture(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let orders = OrdersFixture::from_path(path)?.into_orders()?;

        Ok(Self::new(orders))
    }

    /// Resolve image references against a project's CDN.
    #[must_use]
    pub fn with_images(
        mut self,
        project_id: impl Into<String>,
        dataset: impl Into<String>,
    ) -> Self {
        self.images = Some((project_id.into(), dataset.into()));
        self
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn fetch_orders(&self) -> Result<Vec<Order>, DocumentStoreError> {
        Ok(self.orders.read().await.clone())
    }

    async fn set_order_status(
        &self,
        order: &OrderId,
        status: OrderStatus,
    ) -> Result<(), DocumentStoreError> {
        let mut orders = self.orders.write().await;

        let document = orders
            .iter_mut()
            .find(|document| document.id == *order)
            .ok_or(DocumentStoreError::NotFound)?;

        document.status = Some(status);

        Ok(())
    }

    async fn delete_order(&self, order: &OrderId) -> Result<(), DocumentStoreError> {
        let mut orders = self.orders.write().await;
        let before = orders.len();

        orders.retain(|document| document.id != *order);

        if orders.len() == before {
            return Err(DocumentStoreError::NotFound);
        }

        Ok(())
    }

    fn image_url(&self, image: &ImageRef) -> Option<String> {
        let (project_id, dataset) = self.images.as_ref()?;

        images::cdn_url(project_id, dataset, image)
    }
}

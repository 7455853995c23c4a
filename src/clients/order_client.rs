//! # Order Client
//!
//! Checkout, kitchen workflow and the admin dashboard.
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{
    CartId, DashboardStats, Order, OrderCreate, OrderId, OrderStatus, OrderType, OrderUpdate,
};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Checkout logic (reading the cart, checking the menu, clearing the cart)
/// runs in the Order actor's `on_create` hook.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> OrderError {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .downcast_entity::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Turns the cart's current contents into a pending order and empties it.
    #[instrument(skip(self))]
    pub async fn checkout(
        &self,
        cart_id: CartId,
        order_type: OrderType,
    ) -> Result<OrderId, OrderError> {
        info!("Sending checkout to actor");
        self.inner
            .create(OrderCreate { cart_id, order_type })
            .await
            .map_err(Self::map_error)
    }

    /// Moves the order to the next kitchen status and returns it.
    #[instrument(skip(self))]
    pub async fn advance(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, OrderAction::Advance)
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::Advance(status) => Ok(status),
        }
    }

    /// Sets the status directly, bypassing the workflow.
    #[instrument(skip(self))]
    pub async fn set_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        let update = OrderUpdate {
            status: Some(status),
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<DashboardStats, OrderError> {
        let orders = self.list().await?;
        Ok(DashboardStats::from_orders(&orders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;

    #[tokio::test]
    async fn advance_past_served_reports_transition() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_action(OrderId(1))
            .return_err(FrameworkError::EntityError(Box::new(
                OrderError::InvalidTransition(OrderStatus::Served),
            )));
        let orders = OrderClient::new(mock.client());

        assert_eq!(
            orders.advance(OrderId(1)).await,
            Err(OrderError::InvalidTransition(OrderStatus::Served))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn dashboard_aggregates_listed_orders() {
        let mut served = Order::new(OrderId(1), CartId(1), OrderType::DineIn);
        served.total = 250.0;
        served.status = OrderStatus::Served;
        let mut pending = Order::new(OrderId(2), CartId(1), OrderType::Takeaway);
        pending.total = 90.0;

        let mut mock = MockClient::<Order>::new();
        mock.expect_list().return_ok(vec![served, pending]);
        let orders = OrderClient::new(mock.client());

        let stats = orders.dashboard().await.unwrap();
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_revenue, 340.0);
        assert_eq!(stats.active_orders, 1);
        assert_eq!(stats.completed_orders, 1);
        mock.verify();
    }
}

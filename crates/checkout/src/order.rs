//! Order submission: payload, service contract and the submitting holder.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use kiosk_core::{OrderId, ProductId};
use kiosk_events::{EventBus, names};

use crate::form::FormData;

/// What gets sent to the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    #[serde(flatten)]
    pub details: FormData,
    pub items: Vec<ProductId>,
    pub total: u64,
}

/// What the order service answers with on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub id: OrderId,
    pub total: u64,
}

/// Failure submitting an order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderServiceError {
    #[error("order service unreachable: {0}")]
    Network(String),

    #[error("order rejected: {0}")]
    Rejected(String),
}

impl OrderServiceError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }
}

/// Submits an order over the network (or wherever the host points it).
///
/// From the core's point of view this is the only suspension point in the
/// system: the mediator fires a submission and learns the outcome from the
/// `order:success` / `order:error` events, never from a return value.
pub trait OrderGateway {
    fn submit(&self, payload: &OrderPayload) -> Result<OrderReceipt, OrderServiceError>;
}

/// State holder for order submission.
///
/// Owns no data beyond the gateway handle; its observable state *is* the
/// pair of completion events it emits.
pub struct OrderSubmitter {
    gateway: Rc<dyn OrderGateway>,
    bus: Rc<EventBus>,
}

impl OrderSubmitter {
    pub fn new(bus: Rc<EventBus>, gateway: Rc<dyn OrderGateway>) -> Self {
        Self { gateway, bus }
    }

    /// Hand the payload to the gateway and announce the outcome.
    ///
    /// Emits `order:success` with the receipt, or `order:error` with
    /// `{"message": …}`. Never panics, never retries.
    pub fn submit_order(&self, payload: OrderPayload) {
        match self.gateway.submit(&payload) {
            Ok(receipt) => {
                tracing::info!(order_id = %receipt.id, total = receipt.total, "order confirmed");
                self.bus.emit_serialized(names::ORDER_SUCCESS, &receipt);
            }
            Err(err) => {
                tracing::warn!(error = %err, "order submission failed");
                self.bus.emit(
                    names::ORDER_ERROR,
                    &serde_json::json!({ "message": err.to_string() }),
                );
            }
        }
    }
}

impl core::fmt::Debug for OrderSubmitter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OrderSubmitter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    struct StubGateway {
        response: Result<OrderReceipt, OrderServiceError>,
        calls: RefCell<Vec<OrderPayload>>,
    }

    impl OrderGateway for StubGateway {
        fn submit(&self, payload: &OrderPayload) -> Result<OrderReceipt, OrderServiceError> {
            self.calls.borrow_mut().push(payload.clone());
            self.response.clone()
        }
    }

    fn payload() -> OrderPayload {
        OrderPayload {
            details: FormData {
                payment: "card".to_string(),
                address: "Main St 5".to_string(),
                email: "a@b.co".to_string(),
                phone: "+79991234567".to_string(),
            },
            items: vec![ProductId::new("p-1")],
            total: 100,
        }
    }

    #[test]
    fn success_emits_the_receipt() {
        let bus = Rc::new(EventBus::with_journal(8));
        let gateway = Rc::new(StubGateway {
            response: Ok(OrderReceipt {
                id: OrderId::new("order-1"),
                total: 100,
            }),
            calls: RefCell::new(Vec::new()),
        });
        let submitter =
            OrderSubmitter::new(Rc::clone(&bus), Rc::clone(&gateway) as Rc<dyn OrderGateway>);

        submitter.submit_order(payload());

        let journal = bus.journal().unwrap();
        assert_eq!(journal.names(), vec![names::ORDER_SUCCESS.to_string()]);
        let receipt: OrderReceipt =
            serde_json::from_value(journal.recent()[0].payload.clone()).unwrap();
        assert_eq!(receipt.total, 100);
        assert_eq!(gateway.calls.borrow().len(), 1);
    }

    #[test]
    fn failure_emits_the_message_and_nothing_else() {
        let bus = Rc::new(EventBus::with_journal(8));
        let gateway = Rc::new(StubGateway {
            response: Err(OrderServiceError::network("connection refused")),
            calls: RefCell::new(Vec::new()),
        });
        let submitter = OrderSubmitter::new(Rc::clone(&bus), gateway);

        submitter.submit_order(payload());

        let journal = bus.journal().unwrap();
        assert_eq!(journal.names(), vec![names::ORDER_ERROR.to_string()]);
        let message = journal.recent()[0].payload["message"].as_str().unwrap().to_string();
        assert!(message.contains("connection refused"));
    }

    #[test]
    fn payload_serializes_with_flattened_details() {
        let value = serde_json::to_value(payload()).unwrap();
        assert_eq!(value["payment"], "card");
        assert_eq!(value["items"][0], "p-1");
        assert_eq!(value["total"], 100);
    }
}

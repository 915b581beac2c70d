//! Payments
//!
//! A simulated payment processor. No funds move and nothing leaves the process; a
//! successful payment only records a freshly issued transaction identifier.

use std::fmt;

use mockall::automock;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

/// Opaque identifier of a completed payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Issue a new, random transaction identifier.
    pub fn new() -> Self {
        TransactionId(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        TransactionId(uuid)
    }

    /// The underlying UUID.
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for TransactionId {
    fn from(value: Uuid) -> Self {
        Self::from_uuid(value)
    }
}

/// Accepts payments.
#[automock]
pub trait PaymentService {
    /// Attempt to take a payment of `amount`, returning whether it was accepted.
    ///
    /// Declined payments are not errors and leave the last transaction id untouched.
    fn process_payment(&mut self, amount: Decimal) -> bool;

    /// Identifier of the most recent accepted payment, if there has been one.
    fn last_transaction_id(&self) -> Option<TransactionId>;
}

/// In-memory payment processor that accepts any positive amount.
#[derive(Debug, Default)]
pub struct SimulatedPaymentService {
    last_transaction_id: Option<TransactionId>,
}

impl SimulatedPaymentService {
    /// Create a processor with no payment history.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PaymentService for SimulatedPaymentService {
    #[tracing::instrument(name = "payments.process_payment", skip_all, fields(%amount))]
    fn process_payment(&mut self, amount: Decimal) -> bool {
        if amount <= Decimal::ZERO {
            warn!("declined non-positive payment amount");

            return false;
        }

        let transaction_id = TransactionId::new();

        self.last_transaction_id = Some(transaction_id);

        info!(%transaction_id, "payment accepted");

        true
    }

    fn last_transaction_id(&self) -> Option<TransactionId> {
        self.last_transaction_id
    }
}

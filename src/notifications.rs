//! Notifications
//!
//! Marketplace notifications as a tagged union, one variant per kind, plus an
//! inbox tracking read state. Serialised form carries an explicit `type` field.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

new_key_type! {
    /// Notification Key
    pub struct NotificationKey;
}

/// What a notification is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// A buyer placed an order with the supplier.
    OrderPlaced {
        /// Order identifier
        order_id: String,
        /// Buyer display name
        buyer_name: String,
        /// Order grand total
        total: Decimal,
    },

    /// An order left the warehouse.
    OrderShipped {
        /// Order identifier
        order_id: String,
        /// Logistics partner
        carrier: String,
        /// Carrier tracking number, once issued
        #[serde(default)]
        tracking_number: Option<String>,
    },

    /// A supplier answered a request for quotation.
    QuoteReceived {
        /// Request for quotation identifier
        rfq_id: String,
        /// Quoting supplier
        supplier_name: String,
        /// Offered unit price
        unit_price: Decimal,
    },

    /// A referral earned a commission.
    CommissionEarned {
        /// Referral identifier
        referral_id: String,
        /// Commission amount
        amount: Decimal,
    },

    /// A variant's price changed.
    PriceChanged {
        /// Product variant identifier
        product_variant_id: String,
        /// Price before the change
        previous: Decimal,
        /// Price after the change
        current: Decimal,
    },

    /// A new chat message.
    Message {
        /// Conversation identifier
        conversation_id: String,
        /// Sender display name
        sender_name: String,
        /// First line of the message
        preview: String,
    },
}

/// Errors raised by [`Inbox`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InboxError {
    /// No notification has the key.
    #[error("notification {0:?} not found")]
    NotFound(NotificationKey),
}

#[derive(Debug, Clone)]
struct Entry {
    notification: Notification,
    read: bool,
}

/// Notifications in arrival order with per-notification read state.
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    entries: SlotMap<NotificationKey, Entry>,
    order: Vec<NotificationKey>,
}

impl Inbox {
    /// Create an empty inbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unread notification.
    pub fn push(&mut self, notification: Notification) -> NotificationKey {
        let key = self.entries.insert(Entry {
            notification,
            read: false,
        });

        self.order.push(key);

        key
    }

    /// Look up a notification.
    pub fn get(&self, key: NotificationKey) -> Option<&Notification> {
        self.entries.get(key).map(|entry| &entry.notification)
    }

    /// Whether a notification has been read.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::NotFound`] if no notification has the key.
    pub fn is_read(&self, key: NotificationKey) -> Result<bool, InboxError> {
        self.entries
            .get(key)
            .map(|entry| entry.read)
            .ok_or(InboxError::NotFound(key))
    }

    /// Mark one notification read.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::NotFound`] if no notification has the key.
    pub fn mark_read(&mut self, key: NotificationKey) -> Result<(), InboxError> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or(InboxError::NotFound(key))?;

        entry.read = true;

        Ok(())
    }

    /// Mark everything read, returning how many were unread.
    pub fn mark_all_read(&mut self) -> usize {
        let mut marked = 0;

        for entry in self.entries.values_mut().filter(|entry| !entry.read) {
            entry.read = true;
            marked += 1;
        }

        marked
    }

    /// Remove a notification.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::NotFound`] if no notification has the key.
    pub fn remove(&mut self, key: NotificationKey) -> Result<Notification, InboxError> {
        let entry = self.entries.remove(key).ok_or(InboxError::NotFound(key))?;

        self.order.retain(|existing| *existing != key);

        Ok(entry.notification)
    }

    /// Number of unread notifications.
    pub fn unread_count(&self) -> usize {
        self.entries.values().filter(|entry| !entry.read).count()
    }

    /// Unread notifications in arrival order.
    pub fn unread(&self) -> impl Iterator<Item = (NotificationKey, &Notification)> {
        self.iter()
            .filter(|(key, _)| self.entries.get(*key).is_some_and(|entry| !entry.read))
    }

    /// All notifications in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = (NotificationKey, &Notification)> {
        self.order
            .iter()
            .filter_map(|&key| self.get(key).map(|notification| (key, notification)))
    }

    /// Number of notifications.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the inbox is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

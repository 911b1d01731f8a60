//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! domain and the outside world. Adapters implement these ports.
//!
//! - `SnapshotStore` - device-local persistence for the session snapshot
//! - `PreviewProvider` - the playlist catalog collaborator
//! - `PaymentGateway` - the payment collaborator
//! - `ConfirmationPrompt` - blocking yes/no interaction before reset
//! - `ClientNotifier` - fire-and-forget upgrade notification
//! - `ChangeListener` - observer the presentation layer subscribes to

mod change_listener;
mod client_notifier;
mod confirmation;
mod payment_gateway;
mod preview_provider;
mod snapshot_store;

pub use change_listener::{ChangeListener, FlowView, ReviewLine};
pub use client_notifier::{ClientNotifier, NotifyError, UpgradeRequest};
pub use confirmation::ConfirmationPrompt;
pub use payment_gateway::{PaymentError, PaymentGateway};
pub use preview_provider::{PreviewError, PreviewProvider};
pub use snapshot_store::{SnapshotStore, SnapshotStoreError, SNAPSHOT_KEY};

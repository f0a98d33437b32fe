//! Types shared across port boundaries.

use futures_channel::mpsc;
use rolegate_domain::Session;

/// One session transition: `Some` after sign-in, sign-up or restore, `None`
/// after sign-out or revocation.
pub type SessionChange = Option<Session>;

/// Receiving end of a credential store subscription. Dropping it
/// unsubscribes.
pub type SessionChanges = mpsc::UnboundedReceiver<SessionChange>;

/// Sending end held by credential store adapters.
pub type SessionChangeSender = mpsc::UnboundedSender<SessionChange>;

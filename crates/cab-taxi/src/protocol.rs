//! Dispatcher message handling.
//!
//! Each inbound [`Message`] is folded into the ledger and the account.  The
//! returned [`Applied`] says what happened; the taxi uses it for logging and
//! tests use it to check idempotence.

use cab_core::{Coord, Credits, Tick};
use cab_world::Message;

use crate::duty::Account;
use crate::ledger::{FareKey, FareLedger, FareOffer};

/// Effect of one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    /// A new offer was recorded under this key.
    Recorded(FareKey),
    /// An offer with the same key was already known.
    Duplicate(FareKey),
    /// The offer under this key is (now) allocated to this taxi.
    Allocated(FareKey),
    /// The balance was credited.
    Paid(Credits),
    /// The allocated offer under this key was dropped.
    Cancelled(FareKey),
    /// The message referred to nothing the taxi knows about.
    Ignored,
}

/// Apply `message`, received at `now`.
pub fn apply(message: Message, now: Tick, ledger: &mut FareLedger, account: &mut Account) -> Applied {
    match message {
        Message::FareAdvice { origin, destination, price } => {
            let key = FareKey::new(now, origin);
            if ledger.record(key, FareOffer::new(destination, price)) {
                Applied::Recorded(key)
            } else {
                Applied::Duplicate(key)
            }
        }
        Message::FareAllocated { origin, destination } => allocated(ledger, origin, destination),
        Message::FarePaid { amount } => {
            account.credit(amount);
            Applied::Paid(amount)
        }
        Message::FareCancelled { origin } => match ledger.cancel(origin) {
            Some((key, _)) => Applied::Cancelled(key),
            None => Applied::Ignored,
        },
    }
}

fn allocated(ledger: &mut FareLedger, origin: Coord, destination: Coord) -> Applied {
    ledger
        .confirm_allocation(origin, destination)
        .map_or(Applied::Ignored, Applied::Allocated)
}

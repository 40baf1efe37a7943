//! `cab-taxi`: the decision engine of one autonomous taxi.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`taxi`]       | `Taxi<P>`: the agent; tick loop and decision sweep            |
//! | [`ledger`]     | `FareLedger`, `FareKey`, `FareOffer`, `Decision`               |
//! | [`bid`]        | `assess`, `BidInput`, `BidAssessment`, `leg_cost`              |
//! | [`movement`]   | `MovementController`, `MovementState`                          |
//! | [`protocol`]   | `apply`: dispatcher messages into ledger and account          |
//! | [`duty`]       | `Account`, `DutyRoster`                                        |
//! | [`config`]     | `TaxiConfig`                                                   |
//! | [`error`]      | `TaxiError`, `TaxiResult<T>`                                   |
//!
//! # Tick order
//!
//! 1. Off duty: nothing.
//! 2. Read dispatcher messages.  Balance still exhausted: go off duty,
//!    debit one credit, nothing else.
//! 3. Drive (commit a granted move, consume waypoints, request the next exit).
//! 4. If stopped with no route: drop off, then sweep the ledger (pick up,
//!    head for an allocated fare, expire stale offers, bid).
//! 5. Read messages again, so a payment for this tick's drop-off is credited.
//! 6. Debit one credit.
//!
//! A taxi holds at most one allocated fare or one passenger when bidding:
//! the bid criteria refuse new work while either is present.

pub mod bid;
pub mod config;
pub mod duty;
pub mod error;
pub mod ledger;
pub mod movement;
pub mod protocol;
pub mod taxi;


pub use bid::{BidAssessment, BidInput};
pub use config::TaxiConfig;
pub use duty::{Account, DutyRoster};
pub use error::{TaxiError, TaxiResult};
pub use ledger::{Decision, FareKey, FareLedger, FareOffer};
pub use movement::{MovementController, MovementState};
pub use protocol::Applied;
pub use taxi::{Taxi, entry_point};

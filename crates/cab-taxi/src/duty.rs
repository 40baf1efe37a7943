//! Revenue account and duty window.

use cab_core::{Credits, Tick};

use crate::TaxiConfig;

// ── Account ───────────────────────────────────────────────────────────────────

/// The taxi's running balance.  Debited one credit per on-duty tick,
/// credited on payment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Account {
    balance: Credits,
}

impl Account {
    pub fn new(balance: Credits) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> Credits {
        self.balance
    }

    pub fn credit(&mut self, amount: Credits) {
        self.balance = self.balance.saturating_add(amount);
    }

    pub fn debit(&mut self, amount: Credits) {
        self.balance = self.balance.saturating_sub(amount);
    }

    /// `true` once the balance has run down to zero or below.
    pub fn is_exhausted(&self) -> bool {
        self.balance <= 0
    }

    /// Restore the balance to `allowance` if it is exhausted.
    pub fn replenish(&mut self, allowance: Credits) {
        if self.is_exhausted() {
            self.balance = allowance;
        }
    }
}

// ── DutyRoster ────────────────────────────────────────────────────────────────

/// On/off duty status plus the window in which the taxi may start a shift.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DutyRoster {
    on_duty:       bool,
    on_duty_time:  Tick,
    off_duty_time: Option<Tick>,
    went_off_at:   Option<Tick>,
}

impl DutyRoster {
    pub fn new(on_duty_time: Tick, off_duty_time: Option<Tick>) -> Self {
        Self { on_duty: false, on_duty_time, off_duty_time, went_off_at: None }
    }

    pub fn from_config(config: &TaxiConfig) -> Self {
        Self::new(config.on_duty_time, config.off_duty_time)
    }

    pub fn is_on_duty(&self) -> bool {
        self.on_duty
    }

    /// Tick at which the taxi last went off duty.
    pub fn went_off_at(&self) -> Option<Tick> {
        self.went_off_at
    }

    /// With no window every tick qualifies; otherwise
    /// `on_duty_time <= now < off_duty_time`.
    pub fn may_come_on_duty(&self, now: Tick) -> bool {
        match self.off_duty_time {
            None => true,
            Some(off) => self.on_duty_time <= now && now < off,
        }
    }

    pub fn go_on_duty(&mut self) {
        self.on_duty = true;
    }

    /// Go off duty at `now`.  The window closes at `now`, so a later
    /// attempt to come back on duty fails.
    pub fn go_off_duty(&mut self, now: Tick) {
        self.on_duty = false;
        self.off_duty_time = Some(now);
        self.went_off_at = Some(now);
    }
}

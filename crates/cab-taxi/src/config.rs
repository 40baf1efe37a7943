//! Per-taxi configuration.

use cab_core::{Coord, Credits, Tick};
use cab_map::KnowledgeMap;

use crate::{TaxiError, TaxiResult};

/// The named parameters a taxi is created with.
///
/// Typically filled in by the application (or deserialized with the `serde`
/// feature) and handed to [`Taxi::new`][crate::Taxi::new].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TaxiConfig {
    /// Loss the taxi is prepared to absorb before going off duty; also the
    /// balance it restarts with when coming on duty exhausted.  256 gives
    /// about four hours of idling at one credit per tick.
    pub idle_loss: Credits,

    /// Estimate of how many ticks a fare will wait to be collected.  Offers
    /// older than this are stale.
    pub max_wait: u64,

    /// Start of the on-duty window.
    pub on_duty_time: Tick,

    /// End of the on-duty window.  `None` disables the window: the taxi may
    /// come on duty at any time.
    pub off_duty_time: Option<Tick>,

    /// Where the taxi enters the world.  `None` picks the map's first entry
    /// point.
    pub home: Option<Coord>,

    /// Pre-supplied map of the service area.  `None` asks the world for one.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub service_area: Option<KnowledgeMap>,
}

impl Default for TaxiConfig {
    fn default() -> Self {
        Self {
            idle_loss:     256,
            max_wait:      50,
            on_duty_time:  Tick::ZERO,
            off_duty_time: None,
            home:          None,
            service_area:  None,
        }
    }
}

impl TaxiConfig {
    pub fn validate(&self) -> TaxiResult<()> {
        if self.idle_loss <= 0 {
            return Err(TaxiError::Config(format!(
                "idle_loss must be positive, got {}",
                self.idle_loss
            )));
        }
        if self.max_wait == 0 {
            return Err(TaxiError::Config("max_wait must be at least one tick".into()));
        }
        if let Some(off) = self.off_duty_time {
            if off <= self.on_duty_time {
                return Err(TaxiError::Config(format!(
                    "off_duty_time {off} must be after on_duty_time {}",
                    self.on_duty_time
                )));
            }
        }
        Ok(())
    }
}

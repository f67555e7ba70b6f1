//! Capability profile resolution
//!
//! Turns device and accessibility signals, sampled once at startup,
//! into the concrete session parameters: how many instances to run and
//! whether the simulation advances at all. The profile is an immutable
//! snapshot; preferences are not re-evaluated live.

use crate::config::BackdropConfig;

/// Viewport width below which the mobile tier applies, in CSS pixels
pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// Tier overrides under prefers-reduced-motion
const REDUCED_MOTION_COUNT: usize = 50;
const REDUCED_MOTION_COUNT_MOBILE: usize = 30;

/// Count ceilings under prefers-reduced-data
const DATA_CAP: usize = 100;
const DATA_CAP_MOBILE: usize = 60;

/// Environment signals sampled at startup
#[derive(Debug, Clone, Copy, Default)]
pub struct Signals {
    /// Viewport width in CSS pixels
    pub viewport_width: f32,
    /// prefers-reduced-motion: reduce
    pub reduced_motion: bool,
    /// prefers-reduced-data: reduce
    pub reduced_data: bool,
}

/// Resolved session parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityProfile {
    /// Number of bodies/instances for the session
    pub instance_count: usize,
    /// Whether the world is stepped and the force field applied.
    /// False under reduced motion: bodies still render, statically,
    /// at their initial pose. A degraded mode, not a disabled feature.
    pub simulate: bool,
    /// Whether the reduced-data ceiling lowered the count
    pub data_capped: bool,
}

impl CapabilityProfile {
    /// Resolve signals into session parameters.
    ///
    /// Policy order: tier by viewport width, reduced-motion override,
    /// reduced-data clamp. The clamps compound.
    pub fn resolve(signals: &Signals, config: &BackdropConfig) -> Self {
        let mobile = signals.viewport_width < MOBILE_BREAKPOINT;

        let base = if signals.reduced_motion {
            if mobile {
                REDUCED_MOTION_COUNT_MOBILE
            } else {
                REDUCED_MOTION_COUNT
            }
        } else if mobile {
            config.instance_count_mobile
        } else {
            config.instance_count
        };

        let cap = if mobile { DATA_CAP_MOBILE } else { DATA_CAP };
        let (count, data_capped) = if signals.reduced_data && base > cap {
            (cap, true)
        } else {
            (base, false)
        };

        Self {
            instance_count: count,
            simulate: !signals.reduced_motion,
            data_capped,
        }
    }
}

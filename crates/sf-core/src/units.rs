// sf-core/src/units.rs

use uom::si::f64::{Frequency as UomFrequency, Ratio as UomRatio, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type Flow = UomFrequency;
pub type Ratio = UomRatio;
pub type Time = UomTime;

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

/// Vehicle flow expressed in vehicles per hour.
#[inline]
pub fn veh_per_hour(v: f64) -> Flow {
    use uom::si::frequency::hertz;
    Flow::new::<hertz>(v / 3600.0)
}

/// Number of vehicles a flow discharges over a duration.
#[inline]
pub fn vehicles_discharged(flow: Flow, duration: Time) -> f64 {
    use uom::si::ratio::ratio;
    let count: Ratio = flow * duration;
    count.get::<ratio>()
}

pub mod constants {
    use super::*;

    /// Maximum discharge rate of a continuously green lane.
    pub const SAT_FLOW_VEH_PER_HOUR: f64 = 1800.0;

    /// Flow penalty applied to turning lanes by the optimizer and cycle estimator.
    pub const TURN_PENALTY: f64 = 1.15;

    /// Intergreen loss per phase used by the optimizer.
    pub const LOST_TIME_PER_PHASE_S: f64 = 3.0;
    /// Lost time per phase used by the optimal-cycle estimate.
    pub const CYCLE_LOST_TIME_PER_PHASE_S: f64 = 3.5;

    pub const MIN_GREEN_S: f64 = 8.0;
    pub const MIN_USABLE_GREEN_S: f64 = 20.0;

    pub const MAX_VC_RATIO: f64 = 1.99;
    pub const MAX_DELAY_RATIO: f64 = 0.999;
    pub const MAX_DELAY_S: f64 = 300.0;
    pub const CONGESTION_SCALE: f64 = 65.0;

    /// Window the per-cycle demand is scaled from when estimating hourly flow.
    pub const REFERENCE_CYCLE_S: f64 = 90.0;
    pub const MIN_OPTIMAL_CYCLE_S: u32 = 40;
    pub const MAX_OPTIMAL_CYCLE_S: u32 = 180;
    pub const MIN_CYCLE_DENOMINATOR: f64 = 0.05;

    /// Cycle lengths outside this range are unusual in practice.
    pub const PRACTICAL_CYCLE_RANGE_S: (f64, f64) = (30.0, 180.0);

    #[inline]
    pub fn saturation_flow() -> Flow {
        veh_per_hour(SAT_FLOW_VEH_PER_HOUR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _dt = s(0.1);
        let _q = veh_per_hour(900.0);
        let _sat = constants::saturation_flow();
    }

    #[test]
    fn saturation_flow_over_green_gives_vehicle_count() {
        let n = vehicles_discharged(constants::saturation_flow(), s(10.0));
        assert!((n - 5.0).abs() < 1e-9);

        let n = vehicles_discharged(constants::saturation_flow(), s(3600.0));
        assert!((n - 1800.0).abs() < 1e-9);
    }
}

use sf_core::{DensityLevel, Lane, LaneType};
use sf_model::{estimate_optimal_cycle, evaluate, optimize, project};

fn five_lane_intersection() -> Vec<Lane> {
    vec![
        Lane::new(1, "North Straight", LaneType::Straight, DensityLevel::High, 8.0, 15.0),
        Lane::new(2, "South Straight", LaneType::Straight, DensityLevel::High, 7.0, 15.0),
        Lane::new(3, "East Left Turn", LaneType::Turn, DensityLevel::Low, 4.0, 25.0),
        Lane::new(4, "West Left Turn", LaneType::Turn, DensityLevel::Medium, 3.0, 20.0),
        Lane::new(5, "East-West Through", LaneType::Straight, DensityLevel::Medium, 5.0, 15.0),
    ]
}

fn mean_delay(lanes: &[Lane], cycle: f64) -> f64 {
    let total: f64 = lanes
        .iter()
        .map(|l| evaluate(l, cycle).unwrap().average_delay_s)
        .sum();
    total / lanes.len() as f64
}

#[test]
fn reallocation_favours_undertimed_straight_lanes() {
    let lanes = five_lane_intersection();
    let optimized = optimize(&lanes, 90.0).unwrap();

    let greens: Vec<u32> = optimized.iter().map(|o| o.optimized_green_time_s).collect();
    assert_eq!(greens, vec![26, 23, 8, 8, 11]);

    assert!(optimized[0].green_delta_s() > 0.0);
    assert!(optimized[1].green_delta_s() > 0.0);
    assert!(optimized[2].green_delta_s() < 0.0);
    assert!(optimized[3].green_delta_s() < 0.0);
}

#[test]
fn reallocation_lowers_mean_delay() {
    let lanes = five_lane_intersection();
    let before = mean_delay(&lanes, 90.0);

    let after_lanes: Vec<Lane> = optimize(&lanes, 90.0)
        .unwrap()
        .iter()
        .map(|o| o.to_lane())
        .collect();
    let after = mean_delay(&after_lanes, 90.0);

    assert!(after < before, "after {after} should be below before {before}");
    // Both straight lanes were oversaturated and are now under capacity.
    for lane in &after_lanes[..2] {
        let m = evaluate(lane, 90.0).unwrap();
        assert!(m.volume_capacity_ratio < 1.0);
        assert_eq!(m.queue_length, 0);
    }
}

#[test]
fn default_intersection_optimal_cycle() {
    // Y = (12 + 10.5 + 2.3 + 3.45 + 5) * 40 / 1800 = 0.7389
    // (1.5 * 17.5 + 5) / 0.2611 = 119.7
    assert_eq!(estimate_optimal_cycle(&five_lane_intersection()).unwrap(), 120);
}

#[test]
fn projection_ends_near_base_queue() {
    let lanes = five_lane_intersection();
    let projection = project(&lanes, 90.0, 20).unwrap();
    let last = projection.last_step().unwrap();
    for (sample, lane) in last.iter().zip(&lanes) {
        let base = evaluate(lane, 90.0).unwrap();
        let upper = (f64::from(base.queue_length) * 1.1).round() as u32;
        assert!(sample.queue <= upper);
        assert!(sample.wait_s <= base.average_delay_s * 1.05 + 1e-9);
    }
}

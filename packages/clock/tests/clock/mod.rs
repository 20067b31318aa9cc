use std::time::Duration;

use torrust_tracker_monitor_clock::clock::stopped::Stopped as _;
use torrust_tracker_monitor_clock::clock::Time;

use crate::CurrentClock;

#[test]
fn it_should_use_stopped_time_for_testing() {
    assert_eq!(CurrentClock::dbg_clock_type(), "Stopped".to_owned());

    let time = CurrentClock::now();
    std::thread::sleep(Duration::from_millis(50));
    let time_2 = CurrentClock::now();

    assert_eq!(time, time_2);
}

#[test]
fn it_should_measure_a_downtime_with_the_stopped_clock() {
    let went_down_at = Duration::from_secs(1_000_000);

    CurrentClock::local_set(&went_down_at);
    CurrentClock::local_add(&Duration::from_secs(3_600)).unwrap();

    assert_eq!(CurrentClock::seconds_since(went_down_at), 3_600);

    CurrentClock::local_reset();
}

//! Unit tests for the earliest-arrival search.

use super::*;
use crate::domain::ServiceTime;
use crate::schedule::{Schedule, StopRecord, StopTimeRecord, TripRecord};
use std::sync::Arc;

fn t(s: &str) -> ServiceTime {
    ServiceTime::parse(s).unwrap()
}

/// Build a schedule from `(stop, parent)` pairs and `(trip, [(stop, arr, dep)])`
/// call lists. Stop sequences are numbered 10, 20, 30, ...
fn build(stops: &[(&str, Option<&str>)], trips: &[(&str, &[(&str, &str, &str)])]) -> Schedule {
    let stop_records = stops
        .iter()
        .map(|(id, parent)| StopRecord::new(id, &id.to_uppercase(), *parent));
    let trip_records = trips
        .iter()
        .map(|(id, _)| TripRecord::new(id, "R", "Somewhere"));
    let stop_time_records = trips.iter().flat_map(|(id, calls)| {
        calls.iter().enumerate().map(move |(i, (stop, arr, dep))| {
            StopTimeRecord::new(id, arr, dep, stop, &((i + 1) * 10).to_string())
        })
    });
    Schedule::from_records(stop_records, trip_records, stop_time_records).unwrap()
}

/// Central has two platforms; trips fan out north, then west and on to a
/// two-platform hub.
fn network() -> Schedule {
    build(
        &[
            ("central", None),
            ("p1", Some("central")),
            ("p2", Some("central")),
            ("north", None),
            ("east", None),
            ("west", None),
            ("hub", None),
            ("h1", Some("hub")),
            ("h2", Some("hub")),
            ("south", None),
            ("far", None),
            ("island", None),
        ],
        &[
            (
                "T1",
                &[("p1", "08:00:00", "08:00:00"), ("north", "08:15:00", "08:15:00")],
            ),
            (
                "T2",
                &[
                    ("p2", "08:05:00", "08:05:00"),
                    ("north", "08:10:00", "08:10:00"),
                    ("east", "08:20:00", "08:20:00"),
                ],
            ),
            (
                "T3",
                &[("north", "08:25:00", "08:25:00"), ("west", "08:40:00", "08:40:00")],
            ),
            (
                "T4",
                &[("east", "09:30:00", "09:30:00"), ("far", "09:45:00", "09:45:00")],
            ),
            (
                "T5",
                &[("west", "08:45:00", "08:45:00"), ("h1", "08:55:00", "08:55:00")],
            ),
            (
                "T6",
                &[("h2", "09:00:00", "09:00:00"), ("south", "09:20:00", "09:20:00")],
            ),
        ],
    )
}

fn trip_ids(settled: &Settled<'_>, journey: &Journey) -> Vec<String> {
    let schedule = settled.schedule();
    journey
        .legs()
        .iter()
        .map(|leg| schedule.trip(leg.trip).id.to_string())
        .collect()
}

fn planner(schedule: &Schedule) -> Planner<'_> {
    Planner::new(schedule, SearchConfig::default())
}

#[test]
fn faster_platform_wins_within_window() {
    // T1 leaves p1 at 08:00 and reaches North at 08:15; T2 leaves p2 at
    // 08:05 and reaches North at 08:10.
    let schedule = network();
    let settled = search(&schedule, "central", t("08:00:00"), 600, None).unwrap();

    assert_eq!(settled.arrival_time("north"), Some(t("08:10:00")));
    let journey = settled.journey_to("north").unwrap();
    assert_eq!(trip_ids(&settled, &journey), vec!["T2"]);
}

#[test]
fn earlier_arrival_beats_earlier_departure() {
    // Both T1 (08:00) and T2 (08:05) are in the window; T2 still wins.
    let schedule = network();
    let settled = search(&schedule, "central", t("07:59:00"), 600, None).unwrap();

    assert_eq!(settled.arrival_time("north"), Some(t("08:10:00")));
    let journey = settled.journey_to("north").unwrap();
    assert_eq!(trip_ids(&settled, &journey), vec!["T2"]);

    // T1's later arrival at North was discarded as dominated
    assert!(settled.pruned() >= 1);
}

#[test]
fn origin_settled_at_start_time() {
    let schedule = network();
    let settled = planner(&schedule)
        .search(&SearchRequest::new("p1", t("08:00:00")))
        .unwrap();

    // Searching from a platform settles its station
    assert_eq!(settled.arrival_time("central"), Some(t("08:00:00")));
    assert_eq!(settled.arrival_time("p2"), Some(t("08:00:00")));

    let journey = settled.journey_to("central").unwrap();
    assert!(journey.is_empty());
    assert_eq!(journey.transfers(), 0);
    assert_eq!(journey.departure(&schedule), t("08:00:00"));
}

#[test]
fn rides_to_every_downstream_stop() {
    let schedule = network();
    let settled = planner(&schedule)
        .search(&SearchRequest::new("central", t("08:00:00")))
        .unwrap();

    // East is two stops down T2, reached in a single ride
    assert_eq!(settled.arrival_time("east"), Some(t("08:20:00")));
    let journey = settled.journey_to("east").unwrap();
    assert_eq!(trip_ids(&settled, &journey), vec!["T2"]);
    assert_eq!(journey.transfers(), 0);
}

#[test]
fn transfers_follow_back_pointers() {
    let schedule = network();
    let settled = planner(&schedule)
        .search(&SearchRequest::new("central", t("08:00:00")))
        .unwrap();

    let journey = settled.journey_to("west").unwrap();
    assert_eq!(trip_ids(&settled, &journey), vec!["T2", "T3"]);
    assert_eq!(journey.transfers(), 1);
    assert_eq!(journey.departure(&schedule), t("08:05:00"));
    assert_eq!(journey.arrival(), t("08:40:00"));
    assert_eq!(journey.duration(), chrono::Duration::minutes(40));

    let legs = journey.legs();
    assert_eq!(
        schedule.stop(legs[0].board_stop(&schedule)).id.as_str(),
        "p2"
    );
    assert_eq!(
        schedule.stop(legs[0].alight_stop(&schedule)).id.as_str(),
        "north"
    );
    assert_eq!(
        schedule.stop(legs[1].board_stop(&schedule)).id.as_str(),
        "north"
    );
    assert_eq!(legs[1].departure(&schedule), t("08:25:00"));
    assert_eq!(legs[1].arrival(&schedule), t("08:40:00"));
}

#[test]
fn transfers_between_platforms_of_a_station() {
    let schedule = network();
    let settled = planner(&schedule)
        .search(&SearchRequest::new("central", t("08:00:00")))
        .unwrap();

    // Arrive at h1, leave from h2
    let journey = settled.journey_to("south").unwrap();
    assert_eq!(trip_ids(&settled, &journey), vec!["T2", "T3", "T5", "T6"]);
    assert_eq!(journey.arrival(), t("09:20:00"));

    let legs = journey.legs();
    assert_eq!(schedule.stop(legs[2].alight_stop(&schedule)).id.as_str(), "h1");
    assert_eq!(schedule.stop(legs[3].board_stop(&schedule)).id.as_str(), "h2");
}

#[test]
fn departures_beyond_wait_window_not_taken() {
    let schedule = network();
    let settled = planner(&schedule)
        .search(&SearchRequest::new("central", t("08:00:00")))
        .unwrap();

    // East is reached at 08:20 but T4 only leaves at 09:30
    assert!(settled.contains("east"));
    assert!(!settled.contains("far"));
    assert!(settled.journey_to("far").is_none());
}

#[test]
fn longer_wait_window_reaches_more() {
    let schedule = network();
    let settled = Planner::new(&schedule, SearchConfig::new(2 * 3600))
        .search(&SearchRequest::new("central", t("08:00:00")))
        .unwrap();

    assert_eq!(settled.arrival_time("far"), Some(t("09:45:00")));
}

#[test]
fn unreachable_target_is_not_an_error() {
    let schedule = network();
    let settled = planner(&schedule)
        .search(&SearchRequest::new("central", t("08:00:00")).with_target("island"))
        .unwrap();

    assert!(!settled.contains("island"));
    assert_eq!(settled.termination(), Termination::Exhausted);
}

#[test]
fn nothing_to_board_settles_only_origin() {
    let schedule = network();
    let settled = planner(&schedule)
        .search(&SearchRequest::new("island", t("08:00:00")))
        .unwrap();

    assert_eq!(settled.len(), 1);
    assert!(settled.contains("island"));
    assert_eq!(settled.termination(), Termination::Exhausted);
}

#[test]
fn unknown_stops_rejected() {
    let schedule = network();

    let result = planner(&schedule).search(&SearchRequest::new("nowhere", t("08:00:00")));
    assert_eq!(
        result.unwrap_err(),
        SearchError::UnknownStop("nowhere".into())
    );

    let result = planner(&schedule)
        .search(&SearchRequest::new("central", t("08:00:00")).with_target("nowhere"));
    assert!(matches!(result, Err(SearchError::UnknownStop(_))));
}

#[test]
fn stops_once_target_settled() {
    let schedule = network();
    let settled = planner(&schedule)
        .search(&SearchRequest::new("central", t("08:00:00")).with_target("north"))
        .unwrap();

    assert_eq!(settled.termination(), Termination::TargetReached);
    assert_eq!(settled.arrival_time("north"), Some(t("08:10:00")));
    // West needs a ride from North, which was never expanded
    assert!(!settled.contains("west"));
}

#[test]
fn target_given_as_platform() {
    let schedule = network();
    let settled = planner(&schedule)
        .search(&SearchRequest::new("central", t("08:00:00")).with_target("h2"))
        .unwrap();

    assert_eq!(settled.termination(), Termination::TargetReached);
    assert_eq!(settled.arrival_time("hub"), Some(t("08:55:00")));
}

#[test]
fn round_limit_stops_search() {
    let schedule = network();
    let settled = Planner::new(&schedule, SearchConfig::default().with_max_rounds(1))
        .search(&SearchRequest::new("central", t("08:00:00")))
        .unwrap();

    assert_eq!(settled.termination(), Termination::RoundLimit);
    assert_eq!(settled.rounds(), 1);
    assert_eq!(settled.len(), 1);
}

#[test]
fn expired_deadline_stops_search() {
    let schedule = network();
    let settled = Planner::new(
        &schedule,
        SearchConfig::default().with_deadline(std::time::Duration::ZERO),
    )
    .search(&SearchRequest::new("central", t("08:00:00")))
    .unwrap();

    assert_eq!(settled.termination(), Termination::DeadlineExceeded);
    assert!(settled.is_empty());
}

#[test]
fn overnight_service_has_no_wraparound() {
    let schedule = build(
        &[("a", None), ("b", None), ("c", None), ("d", None)],
        &[
            (
                "N1",
                &[("a", "23:40:00", "23:40:00"), ("b", "23:45:00", "23:45:00")],
            ),
            (
                "N2",
                &[("b", "23:55:00", "23:55:00"), ("c", "25:30:00", "25:30:00")],
            ),
            (
                "N3",
                &[("b", "24:05:00", "24:05:00"), ("d", "24:20:00", "24:20:00")],
            ),
        ],
    );
    let settled = search(&schedule, "a", t("23:30:00"), 1200, None).unwrap();

    assert_eq!(settled.arrival_time("b"), Some(t("23:45:00")));
    assert_eq!(settled.arrival_time("c"), Some(t("25:30:00")));
    assert_eq!(settled.arrival_time("d"), Some(t("24:20:00")));
    assert!(settled.arrival_time("c").unwrap() > settled.arrival_time("b").unwrap());
}

#[test]
fn sequence_gaps_accepted() {
    let schedule = Schedule::from_records(
        [
            StopRecord::new("a", "A", None),
            StopRecord::new("b", "B", None),
            StopRecord::new("c", "C", None),
        ],
        [TripRecord::new("G", "R", "C")],
        [
            StopTimeRecord::new("G", "08:00:00", "08:00:00", "a", "1"),
            StopTimeRecord::new("G", "08:05:00", "08:05:00", "b", "2"),
            StopTimeRecord::new("G", "08:10:00", "08:10:00", "c", "4"),
        ],
    )
    .unwrap();
    let settled = search(&schedule, "a", t("07:55:00"), 600, Some("c")).unwrap();

    assert_eq!(settled.arrival_time("c"), Some(t("08:10:00")));
}

#[test]
fn repeated_search_is_identical() {
    let schedule = network();
    let planner = planner(&schedule);
    let request = SearchRequest::new("central", t("07:59:00"));

    let first = planner.search(&request).unwrap();
    let second = planner.search(&request).unwrap();

    let a: Vec<_> = first.iter().map(|(s, m)| (s, *m)).collect();
    let b: Vec<_> = second.iter().map(|(s, m)| (s, *m)).collect();
    assert_eq!(a, b);

    for stop in schedule.stops() {
        assert_eq!(
            first.journey_to(stop.id.as_str()),
            second.journey_to(stop.id.as_str())
        );
    }
}

#[test]
fn concurrent_searches_share_schedule() {
    let schedule = Arc::new(network());
    let expected = planner(&schedule)
        .search(&SearchRequest::new("central", t("08:00:00")))
        .unwrap()
        .iter()
        .map(|(s, m)| (s, *m))
        .collect::<Vec<_>>();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let schedule = Arc::clone(&schedule);
                scope.spawn(move || {
                    let settled = planner(&schedule)
                        .search(&SearchRequest::new("central", t("08:00:00")))
                        .unwrap();
                    let found: Vec<_> = settled.iter().map(|(s, m)| (s, *m)).collect();
                    found
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    const STATIONS: usize = 6;

    /// Strategy: random trips over six stations, two of which have an extra
    /// platform each. Times are monotone along every trip.
    fn random_schedule() -> impl Strategy<Value = Schedule> {
        let trip = (
            prop::collection::vec(0..STATIONS + 2, 2..6),
            (6 * 3600u32)..(7 * 3600u32),
            prop::collection::vec((1u32..900, 0u32..120), 6),
        );
        prop::collection::vec(trip, 1..15).prop_map(|trips| {
            let mut stops: Vec<StopRecord> = (0..STATIONS)
                .map(|i| StopRecord::new(&format!("s{i}"), &format!("S{i}"), None))
                .collect();
            stops.push(StopRecord::new("s0a", "S0 platform a", Some("s0")));
            stops.push(StopRecord::new("s1a", "S1 platform a", Some("s1")));
            let stop_id = |i: usize| match i {
                i if i < STATIONS => format!("s{i}"),
                i if i == STATIONS => "s0a".to_string(),
                _ => "s1a".to_string(),
            };

            let mut trip_records = Vec::new();
            let mut stop_times = Vec::new();
            for (n, (visits, start, steps)) in trips.into_iter().enumerate() {
                let trip_id = format!("T{n}");
                trip_records.push(TripRecord::new(&trip_id, "R", "Anywhere"));
                let mut clock = start;
                for (seq, (stop, (travel, dwell))) in visits.iter().zip(steps).enumerate() {
                    let arrival = ServiceTime::from_secs(clock);
                    clock += dwell;
                    let departure = ServiceTime::from_secs(clock);
                    clock += travel;
                    stop_times.push(StopTimeRecord::new(
                        &trip_id,
                        &arrival.to_string(),
                        &departure.to_string(),
                        &stop_id(*stop),
                        &(seq + 1).to_string(),
                    ));
                }
            }
            Schedule::from_records(stops, trip_records, stop_times).unwrap()
        })
    }

    proptest! {
        /// Every reconstructed journey is a chain of rideable legs within
        /// the wait window, ending at the settled arrival time
        #[test]
        fn journeys_are_consistent(
            schedule in random_schedule(),
            origin in 0..STATIONS,
            start in (6 * 3600u32)..(7 * 3600u32),
            wait in 60i64..1800,
        ) {
            let start = ServiceTime::from_secs(start);
            let origin_id = format!("s{origin}");
            let settled = search(&schedule, &origin_id, start, wait, None).unwrap();
            let stations = schedule.stations();

            for (station, moment) in settled.iter() {
                let id = schedule.stop(station).id.as_str();
                let journey = settled.journey_to(id).unwrap();
                prop_assert_eq!(journey.arrival(), moment.time);

                let mut here = stations.canonical(settled.origin());
                let mut now = start;
                for leg in journey.legs() {
                    let board = schedule.stop_time(leg.board);
                    let alight = schedule.stop_time(leg.alight);
                    prop_assert_eq!(stations.canonical(board.stop), here);
                    prop_assert!(board.departure > now);
                    prop_assert!(i64::from(board.departure.as_secs()) <= i64::from(now.as_secs()) + wait);
                    prop_assert_eq!(board.trip, alight.trip);
                    prop_assert!(alight.position > board.position);
                    prop_assert!(alight.arrival > board.departure);
                    here = stations.canonical(alight.stop);
                    now = alight.arrival;
                }
                prop_assert_eq!(here, station);
                prop_assert_eq!(now, moment.time);
            }
        }

        /// No arrival generated from a settled moment beats the settled
        /// label of the station it reaches
        #[test]
        fn never_discards_an_earlier_arrival(
            schedule in random_schedule(),
            origin in 0..STATIONS,
            start in (6 * 3600u32)..(7 * 3600u32),
            wait in 60i64..1800,
        ) {
            let start = ServiceTime::from_secs(start);
            let origin_id = format!("s{origin}");
            let config = SearchConfig::new(wait);
            let settled = Planner::new(&schedule, config.clone())
                .search(&SearchRequest::new(origin_id, start))
                .unwrap();
            prop_assert_eq!(settled.termination(), Termination::Exhausted);
            let stations = schedule.stations();

            for (station, moment) in settled.iter() {
                for departure in leaves_from_station(&schedule, station, moment.time, config.max_wait()) {
                    for arrival in arrivals_from_departure(&schedule, &departure, MomentIdx(0)) {
                        let reached = stations.canonical(arrival.stop);
                        let best = settled
                            .iter()
                            .find(|(s, _)| *s == reached)
                            .map(|(_, m)| m.time);
                        prop_assert!(best.is_some_and(|b| b <= arrival.time));
                    }
                }
            }
        }

        /// Identical inputs give identical results
        #[test]
        fn search_is_deterministic(
            schedule in random_schedule(),
            origin in 0..STATIONS,
            start in (6 * 3600u32)..(7 * 3600u32),
        ) {
            let start = ServiceTime::from_secs(start);
            let origin_id = format!("s{origin}");
            let first = search(&schedule, &origin_id, start, 1200, None).unwrap();
            let second = search(&schedule, &origin_id, start, 1200, None).unwrap();

            let a: Vec<_> = first.iter().map(|(s, m)| (s, *m)).collect();
            let b: Vec<_> = second.iter().map(|(s, m)| (s, *m)).collect();
            prop_assert_eq!(a, b);
        }
    }
}

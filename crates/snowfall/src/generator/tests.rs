use crate::{Error, GeneratorConfig, LockSnowflakeGenerator, MonotonicClock, Snowflake, TimeSource};
use core::time::Duration;
use std::collections::HashSet;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU64, Ordering},
};
use std::thread::scope;
use std::time::UNIX_EPOCH;

/// 2020-01-01T01:00:00Z
const EPOCH: Duration = Duration::from_millis(1_577_840_400_000);

#[derive(Debug)]
struct MockTime {
    millis: u64,
}

impl TimeSource for MockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

#[derive(Clone, Debug)]
struct SharedMockStepTime {
    millis: Arc<AtomicU64>,
}

impl SharedMockStepTime {
    fn at(millis: u64) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(millis)),
        }
    }

    fn set(&self, millis: u64) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl TimeSource for SharedMockStepTime {
    fn current_millis(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

fn epoch_plus(ms: u64) -> u64 {
    EPOCH.as_millis() as u64 + ms
}

fn config(worker_id: u64, process_id: u64) -> GeneratorConfig {
    GeneratorConfig::try_new(EPOCH, worker_id, process_id).unwrap()
}

#[test]
fn first_ids_match_reference_scenario() {
    let generator =
        LockSnowflakeGenerator::new(config(1, 1), MockTime { millis: epoch_plus(5) }).unwrap();

    let id1 = generator.generate().to_raw();
    assert_eq!(id1 >> 22, 5);
    assert_eq!((id1 >> 17) & 0x1F, 1);
    assert_eq!((id1 >> 12) & 0x1F, 1);
    assert_eq!(id1 & 0xFFF, 0);

    let id2 = generator.generate().to_raw();
    assert_eq!(id2 & 0xFFF, 1);
    assert_eq!(id2 >> 12, id1 >> 12);
}

#[test]
fn sequence_increments_within_same_tick_for_every_pair() {
    for worker_id in 0..=Snowflake::MAX_WORKER_ID {
        for process_id in 0..=Snowflake::MAX_PROCESS_ID {
            let generator = LockSnowflakeGenerator::new(
                config(worker_id, process_id),
                MockTime {
                    millis: epoch_plus(42),
                },
            )
            .unwrap();

            let id1 = generator.generate();
            let id2 = generator.generate();

            assert_eq!(id2.sequence(), id1.sequence() + 1);
            assert_eq!(id1.timestamp(), 42);
            assert_eq!(id2.timestamp(), 42);
            for id in [id1, id2] {
                assert_eq!((id.to_raw() >> 17) & 0x1F, worker_id);
                assert_eq!((id.to_raw() >> 12) & 0x1F, process_id);
            }
            assert!(id1 < id2);
        }
    }
}

#[test]
fn sequence_is_not_reset_when_the_clock_ticks() {
    let time = SharedMockStepTime::at(epoch_plus(42));
    let generator = LockSnowflakeGenerator::new(config(2, 3), time.clone()).unwrap();

    assert_eq!(generator.generate().sequence(), 0);
    assert_eq!(generator.generate().sequence(), 1);

    time.set(epoch_plus(43));
    let id = generator.generate();
    assert_eq!(id.timestamp(), 43);
    assert_eq!(id.sequence(), 2);
}

#[test]
fn sequence_wraps_without_touching_neighbours() {
    let generator =
        LockSnowflakeGenerator::new(config(4, 5), MockTime { millis: epoch_plus(7) }).unwrap();

    for expected in 0..=Snowflake::MAX_SEQUENCE {
        assert_eq!(generator.generate().sequence(), expected);
    }

    let wrapped = generator.generate();
    assert_eq!(wrapped.sequence(), 0);
    assert_eq!(wrapped.process_id(), 5);
    assert_eq!(wrapped.worker_id(), 4);
    assert_eq!(wrapped.timestamp(), 7);
}

#[test]
fn timestamp_round_trips_through_created_at() {
    let time = SharedMockStepTime::at(epoch_plus(0));
    let generator = LockSnowflakeGenerator::new(config(0, 0), time.clone()).unwrap();

    for elapsed in [0, 1, 5, 999, 86_400_000, 3_155_760_000_000] {
        time.set(epoch_plus(elapsed));
        let id = generator.generate();
        assert_eq!(
            id.created_at(EPOCH),
            Some(UNIX_EPOCH + EPOCH + Duration::from_millis(elapsed))
        );
        assert_eq!(id.unix_millis(EPOCH), epoch_plus(elapsed));
    }
}

#[test]
fn clock_before_epoch_yields_zero_timestamp() {
    let generator =
        LockSnowflakeGenerator::new(config(1, 1), MockTime { millis: epoch_plus(0) - 10 })
            .unwrap();
    assert_eq!(generator.generate().timestamp(), 0);
}

#[test]
fn unconfigured_generator_measures_from_unix_epoch() {
    let generator = LockSnowflakeGenerator::new(
        GeneratorConfig::default(),
        MockTime {
            millis: 1_700_000_000_000,
        },
    )
    .unwrap();
    let id = generator.generate();
    assert_eq!(id.timestamp(), 1_700_000_000_000);
    assert_eq!(id.worker_id(), 0);
    assert_eq!(id.process_id(), 0);
}

#[test]
fn init_replaces_config_and_resets_sequence() {
    let time = SharedMockStepTime::at(epoch_plus(100));
    let generator = LockSnowflakeGenerator::new(config(1, 1), time.clone()).unwrap();
    generator.generate();
    generator.generate();

    let new_epoch = EPOCH + Duration::from_millis(60);
    generator
        .init(GeneratorConfig::try_new(new_epoch, 9, 10).unwrap())
        .unwrap();

    let id = generator.generate();
    assert_eq!(id.sequence(), 0);
    assert_eq!(id.worker_id(), 9);
    assert_eq!(id.process_id(), 10);
    assert_eq!(id.timestamp(), 40);
    assert_eq!(generator.config().epoch, new_epoch);
}

#[test]
fn rejected_init_keeps_previous_state() {
    let generator =
        LockSnowflakeGenerator::new(config(1, 2), MockTime { millis: epoch_plus(1) }).unwrap();
    generator.generate();

    let bad = GeneratorConfig {
        epoch: EPOCH,
        worker_id: 1,
        process_id: 32,
    };
    assert_eq!(
        generator.init(bad),
        Err(Error::ProcessIdOverflow { process_id: 32 })
    );

    let id = generator.generate();
    assert_eq!(id.sequence(), 1);
    assert_eq!(id.process_id(), 2);
}

#[test]
fn new_rejects_out_of_range_ids() {
    let bad = GeneratorConfig {
        epoch: EPOCH,
        worker_id: 32,
        process_id: 0,
    };
    let err = LockSnowflakeGenerator::new(bad, MockTime { millis: 0 }).unwrap_err();
    assert_eq!(err, Error::WorkerIdOverflow { worker_id: 32 });
}

#[test]
fn clones_share_state() {
    let generator =
        LockSnowflakeGenerator::new(config(1, 1), MockTime { millis: epoch_plus(1) }).unwrap();
    let other = generator.clone();

    assert_eq!(generator.generate().sequence(), 0);
    assert_eq!(other.generate().sequence(), 1);
    assert_eq!(generator.generate().sequence(), 2);
}

#[test]
fn monotonic_clock_ids_strictly_increase() {
    let generator =
        LockSnowflakeGenerator::new(GeneratorConfig::default(), MonotonicClock::new()).unwrap();

    // Stays below one sequence wrap, so ordering is strict.
    let mut last = generator.generate();
    for _ in 0..Snowflake::MAX_SEQUENCE {
        let id = generator.generate();
        assert!(id > last, "{id:?} <= {last:?}");
        last = id;
    }
}

#[test]
fn concurrent_calls_observe_distinct_sequences() {
    let threads = num_cpus::get().clamp(2, 8);
    let per_thread = (Snowflake::MAX_SEQUENCE as usize + 1) / threads;
    let total = threads * per_thread;

    let generator = Arc::new(
        LockSnowflakeGenerator::new(config(3, 4), MockTime { millis: epoch_plus(9) }).unwrap(),
    );
    let seen = Arc::new(Mutex::new(HashSet::with_capacity(total)));

    scope(|s| {
        for _ in 0..threads {
            let generator = Arc::clone(&generator);
            let seen = Arc::clone(&seen);

            s.spawn(move || {
                for _ in 0..per_thread {
                    let id = generator.generate();
                    assert!(seen.lock().unwrap().insert(id.sequence()));
                }
            });
        }
    });

    let final_count = seen.lock().unwrap().len();
    assert_eq!(final_count, total, "Expected {total} distinct sequences");
}

//! End-to-end cleanup tests through the public API.

use cachesweep::cleanup::CacheCleanup;
use cachesweep::clock::FixedClock;
use cachesweep::config::{parse_config, validate};
use cachesweep::finder::{ReservedFileFilter, SingleDepthFilesFinder};
use cachesweep::store::CacheStore;
use cachesweep::strategy::{CleanupStrategy, FixedAgeStrategy};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;

fn day(n: i64) -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + TimeDelta::days(n)
}

fn touch(path: &Path, modified: DateTime<Utc>) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "data").unwrap();
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::from(modified)).unwrap();
}

#[test]
fn age_scenario_selects_only_entries_past_cutoff() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a");
    let b = temp.path().join("b");
    let c = temp.path().join("c");
    touch(&a, day(90));
    touch(&b, day(93) - TimeDelta::hours(2));
    touch(&c, day(100));

    let store = CacheStore::new("scenario", temp.path());
    let finder = Box::new(SingleDepthFilesFinder::new(1).unwrap());
    let strategy = FixedAgeStrategy::new(finder, 7, &FixedClock::new(day(100)));

    let candidates: Vec<PathBuf> = vec![a.clone(), b.clone(), c];
    let selected = strategy.find_files_to_delete(&store, &candidates);

    assert_eq!(strategy.threshold().instant(), day(93));
    assert_eq!(selected, vec![a, b]);
}

#[test]
fn reserved_files_survive_a_full_pass() {
    let temp = TempDir::new().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let old = now - TimeDelta::days(90);
    touch(&temp.path().join("modules/entry-1/blob"), old);
    touch(&temp.path().join("modules/entry-2/blob"), now);
    touch(&temp.path().join("modules/modules.lock"), old);
    for entry in ["modules/entry-1", "modules/modules.lock"] {
        fs::File::open(temp.path().join(entry))
            .unwrap()
            .set_modified(SystemTime::from(old))
            .unwrap();
    }

    let depth = Box::new(SingleDepthFilesFinder::new(2).unwrap());
    let finder = Box::new(ReservedFileFilter::with_defaults(depth).unwrap());
    let strategy = FixedAgeStrategy::new(finder, 30, &FixedClock::new(now));
    let store = CacheStore::new("modules", temp.path());

    let report = CacheCleanup::new(Box::new(strategy)).clean(&store).unwrap();

    assert_eq!(report.candidates, 2);
    assert_eq!(report.deleted, 1);
    assert!(!temp.path().join("modules/entry-1").exists());
    assert!(temp.path().join("modules/entry-2").exists());
    assert!(temp.path().join("modules/modules.lock").exists());
}

#[test]
fn configured_store_runs_end_to_end() {
    let temp = TempDir::new().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let root = temp.path().join("cache");
    touch(&root.join("stale.bin"), now - TimeDelta::days(8));
    touch(&root.join("fresh.bin"), now - TimeDelta::days(6));

    let yaml = format!("stores:\n  - name: build\n    path: {}\n", root.display());
    let config = parse_config(&yaml, Path::new("config.yml")).unwrap();
    validate(&config).unwrap();

    let store_config = config.store("build").unwrap();
    let strategy = store_config
        .build_strategy(&FixedClock::new(now), None)
        .unwrap();
    let report = CacheCleanup::new(Box::new(strategy))
        .clean(&store_config.to_store())
        .unwrap();

    assert_eq!(report.deleted, 1);
    assert!(!root.join("stale.bin").exists());
    assert!(root.join("fresh.bin").exists());
}

#[test]
fn second_pass_finds_nothing() {
    let temp = TempDir::new().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    touch(&temp.path().join("stale.bin"), now - TimeDelta::days(40));
    let store = CacheStore::new("twice", temp.path());

    let run = || {
        let finder = Box::new(SingleDepthFilesFinder::new(1).unwrap());
        let strategy = FixedAgeStrategy::new(finder, 30, &FixedClock::new(now));
        CacheCleanup::new(Box::new(strategy)).clean(&store).unwrap()
    };

    assert_eq!(run().deleted, 1);
    let second = run();
    assert_eq!(second.candidates, 0);
    assert_eq!(second.deleted, 0);
}

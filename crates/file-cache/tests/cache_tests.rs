//! Behavioural tests for the file-handle cache.

use std::path::PathBuf;

use egads_common::ToolboxConfig;
use file_cache::{CacheError, FileHandleCache, OpenMode, DEFAULT_FILE_LIMIT};
use test_utils::{assert_approx_eq, MockHandle, MockOpener};

fn cache_with_limit(limit: usize) -> FileHandleCache<MockHandle> {
    FileHandleCache::with_limit(limit).unwrap()
}

fn open_all(cache: &mut FileHandleCache<MockHandle>, opener: &MockOpener, names: &[&str]) {
    for name in names {
        cache.open(opener.opener(), name).unwrap();
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_default_limit_is_one_thousand() {
    let cache: FileHandleCache<MockHandle> = FileHandleCache::default();
    assert_eq!(cache.limit(), DEFAULT_FILE_LIMIT);
    assert_eq!(DEFAULT_FILE_LIMIT, 1000);
}

#[test]
fn test_from_config() {
    let config = ToolboxConfig {
        file_cache_limit: 7,
        ..ToolboxConfig::default()
    };
    let cache: FileHandleCache<MockHandle> = FileHandleCache::from_config(&config).unwrap();
    assert_eq!(cache.limit(), 7);
}

// ============================================================================
// Eviction order
// ============================================================================

#[test]
fn test_fifth_open_evicts_first() {
    let opener = MockOpener::new();
    let mut cache = cache_with_limit(4);

    open_all(&mut cache, &opener, &["f1.nc", "f2.nc", "f3.nc", "f4.nc", "f5.nc"]);

    assert!(opener.is_closed("f1.nc"));
    assert!(!cache.contains("f1.nc"));
    for name in ["f2.nc", "f3.nc", "f4.nc", "f5.nc"] {
        assert!(cache.contains(name), "{} should still be cached", name);
        assert!(!opener.is_closed(name), "{} should still be open", name);
    }
    assert_eq!(cache.len(), 4);
}

#[test]
fn test_size_never_exceeds_limit() {
    let opener = MockOpener::new();
    let mut cache = cache_with_limit(3);

    for i in 0..20 {
        cache.open(opener.opener(), format!("file_{i}.nc")).unwrap();
        assert!(cache.len() <= 3);
    }
    assert_eq!(cache.stats().evictions, 17);
    assert_eq!(opener.closed().len(), 17);
}

#[test]
fn test_evicted_handle_is_the_oldest_insertion() {
    let opener = MockOpener::new();
    let mut cache = cache_with_limit(3);
    open_all(&mut cache, &opener, &["a.nc", "b.nc", "c.nc"]);

    let oldest = cache
        .paths()
        .into_iter()
        .min_by_key(|p| cache.ordinal(p))
        .unwrap();
    assert_eq!(oldest, PathBuf::from("a.nc"));

    cache.open(opener.opener(), "d.nc").unwrap();
    assert_eq!(opener.closed(), vec![oldest]);
}

#[test]
fn test_reopen_does_not_refresh_order() {
    let opener = MockOpener::new();
    let mut cache = cache_with_limit(3);
    open_all(&mut cache, &opener, &["a.nc", "b.nc", "c.nc", "a.nc", "a.nc"]);

    assert_eq!(opener.open_count(), 3);
    cache.open(opener.opener(), "d.nc").unwrap();

    assert!(opener.is_closed("a.nc"));
    assert_eq!(
        cache.paths(),
        vec![
            PathBuf::from("b.nc"),
            PathBuf::from("c.nc"),
            PathBuf::from("d.nc")
        ]
    );
}

#[test]
fn test_evicted_path_can_be_reopened() {
    let opener = MockOpener::new();
    let mut cache = cache_with_limit(1);
    open_all(&mut cache, &opener, &["a.nc", "b.nc", "a.nc"]);

    assert_eq!(opener.open_count_for("a.nc"), 2);
    assert!(opener.is_closed("b.nc"));
    let handle = cache.get("a.nc").unwrap();
    assert_eq!(handle.id(), 3);
    assert!(!handle.is_closed());
}

#[test]
fn test_lowering_limit_applies_on_next_insert() {
    let opener = MockOpener::new();
    let mut cache = cache_with_limit(5);
    open_all(&mut cache, &opener, &["a.nc", "b.nc", "c.nc", "d.nc"]);

    cache.set_limit(2).unwrap();
    assert_eq!(cache.len(), 4);

    cache.open(opener.opener(), "e.nc").unwrap();
    assert_eq!(cache.len(), 2);
    assert_eq!(
        opener.closed(),
        vec![
            PathBuf::from("a.nc"),
            PathBuf::from("b.nc"),
            PathBuf::from("c.nc")
        ]
    );
}

#[test]
fn test_set_limit_rejects_zero() {
    let mut cache = cache_with_limit(2);
    assert!(matches!(cache.set_limit(0), Err(CacheError::InvalidLimit(0))));
    assert_eq!(cache.limit(), 2);
}

// ============================================================================
// Handle identity and keys
// ============================================================================

#[test]
fn test_same_path_returns_same_handle() {
    let opener = MockOpener::new();
    let mut cache = cache_with_limit(4);

    let first = cache.open(opener.opener(), "flight.nc").unwrap().id();
    let second = cache.open(opener.opener(), "flight.nc").unwrap().id();

    assert_eq!(first, second);
    assert_eq!(opener.open_count(), 1);
    let stats = cache.stats();
    assert_eq!((stats.hits, stats.misses, stats.opens), (1, 1, 1));
}

#[test]
fn test_equivalent_paths_share_a_key() {
    let opener = MockOpener::new();
    let mut cache = cache_with_limit(4);

    cache.open(opener.opener(), "/data/run/./b.nc").unwrap();
    cache.open(opener.opener(), "/data/run/sub/../b.nc").unwrap();

    assert_eq!(opener.open_count(), 1);
    assert_eq!(opener.opened(), vec![PathBuf::from("/data/run/b.nc")]);
    assert!(cache.contains("/data/run/b.nc"));
}

#[test]
fn test_cached_handle_keeps_first_mode() {
    let opener = MockOpener::new();
    let mut cache = cache_with_limit(4);

    cache
        .open_with_mode(opener.opener(), "out.nc", OpenMode::Write)
        .unwrap();
    let handle = cache.open(opener.opener(), "out.nc").unwrap();

    assert_eq!(handle.mode(), OpenMode::Write);
    assert_eq!(opener.last_mode("out.nc"), Some(OpenMode::Write));
}

#[test]
fn test_get_mut_does_not_promote() {
    let opener = MockOpener::new();
    let mut cache = cache_with_limit(2);
    open_all(&mut cache, &opener, &["a.nc", "b.nc"]);

    assert!(cache.get_mut("a.nc").is_some());
    cache.open(opener.opener(), "c.nc").unwrap();

    assert!(!cache.contains("a.nc"));
}

// ============================================================================
// Close
// ============================================================================

#[test]
fn test_close_unknown_path() {
    let mut cache = cache_with_limit(2);
    match cache.close("never_opened.nc") {
        Err(CacheError::NotCached(path)) => assert_eq!(path, PathBuf::from("never_opened.nc")),
        other => panic!("expected NotCached, got {:?}", other),
    }
}

#[test]
fn test_close_twice_reports_not_cached() {
    let opener = MockOpener::new();
    let mut cache = cache_with_limit(2);
    cache.open(opener.opener(), "a.nc").unwrap();

    cache.close("a.nc").unwrap();
    assert!(opener.is_closed("a.nc"));
    assert!(matches!(cache.close("a.nc"), Err(CacheError::NotCached(_))));
}

#[test]
fn test_close_failure_still_removes_entry() {
    let opener = MockOpener::new();
    opener.fail_close_for("bad.nc");
    let mut cache = cache_with_limit(2);
    cache.open(opener.opener(), "bad.nc").unwrap();

    let err = cache.close("bad.nc").unwrap_err();
    assert!(matches!(err, CacheError::CloseFailed { .. }));
    assert!(!cache.contains("bad.nc"));
}

#[test]
fn test_close_all_empties_and_is_idempotent() {
    let opener = MockOpener::new();
    let mut cache = cache_with_limit(4);
    open_all(&mut cache, &opener, &["a.nc", "b.nc", "c.nc"]);

    cache.close_all().unwrap();
    assert!(cache.is_empty());
    for name in ["a.nc", "b.nc", "c.nc"] {
        assert!(opener.is_closed(name));
    }

    cache.close_all().unwrap();
    assert!(cache.is_empty());
    assert_eq!(opener.closed().len(), 3);
}

#[test]
fn test_close_all_continues_past_failures() {
    let opener = MockOpener::new();
    opener.fail_close_for("b.nc");
    opener.fail_close_for("d.nc");
    let mut cache = cache_with_limit(4);
    open_all(&mut cache, &opener, &["a.nc", "b.nc", "c.nc", "d.nc"]);

    match cache.close_all() {
        Err(CacheError::CloseAllFailed(failures)) => {
            let paths: Vec<_> = failures.into_iter().map(|f| f.path).collect();
            assert_eq!(paths, vec![PathBuf::from("b.nc"), PathBuf::from("d.nc")]);
        }
        other => panic!("expected CloseAllFailed, got {:?}", other),
    }
    assert!(cache.is_empty());
    assert_eq!(opener.closed().len(), 4);
}

#[test]
fn test_eviction_close_failure_is_not_fatal() {
    let opener = MockOpener::new();
    opener.fail_close_for("a.nc");
    let mut cache = cache_with_limit(1);

    cache.open(opener.opener(), "a.nc").unwrap();
    cache.open(opener.opener(), "b.nc").unwrap();

    assert!(opener.is_closed("a.nc"));
    assert!(cache.contains("b.nc"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_drop_closes_everything() {
    let opener = MockOpener::new();
    {
        let mut cache = cache_with_limit(4);
        open_all(&mut cache, &opener, &["a.nc", "b.nc"]);
    }
    assert!(opener.is_closed("a.nc"));
    assert!(opener.is_closed("b.nc"));
}

// ============================================================================
// Opener failures
// ============================================================================

#[test]
fn test_open_failure_caches_nothing() {
    let opener = MockOpener::new();
    opener.fail_open_for("missing.nc");
    let mut cache = cache_with_limit(4);

    let err = cache.open(opener.opener(), "missing.nc").unwrap_err();
    assert!(matches!(err, CacheError::OpenFailed { .. }));
    assert!(!cache.contains("missing.nc"));
    assert!(cache.is_empty());
}

#[test]
fn test_open_failure_at_limit_has_already_evicted() {
    let opener = MockOpener::new();
    opener.fail_open_for("missing.nc");
    let mut cache = cache_with_limit(2);
    open_all(&mut cache, &opener, &["a.nc", "b.nc"]);

    assert!(cache.open(opener.opener(), "missing.nc").is_err());

    assert!(opener.is_closed("a.nc"));
    assert_eq!(cache.paths(), vec![PathBuf::from("b.nc")]);
}

#[test]
fn test_stats_hit_rate() {
    let opener = MockOpener::new();
    let mut cache = cache_with_limit(4);
    open_all(&mut cache, &opener, &["a.nc", "a.nc", "a.nc", "b.nc"]);

    let stats = cache.stats();
    assert_eq!(stats.entries, 2);
    assert_approx_eq!(stats.hit_rate(), 0.5, 1e-12);
}

//! Integration tests for memoization and cache clearing

use std::rc::Rc;

use nasin_combinator::{Cache, CacheRegistry, Cursor, Memo, Parser, choice, literal, many, sequence2};

fn ambiguous() -> Parser<str, Vec<&'static str>> {
    many(&choice(vec![literal("ab"), literal("a"), literal("b")]))
}

// =============================================================================
// Memo
// =============================================================================

#[test]
fn warm_memo_gives_same_result() {
    let parser = sequence2(&ambiguous(), &literal("!"));
    let input = "ababab!";
    let fresh = parser.parse(Cursor::new(input), &Memo::new());

    let memo = Memo::new();
    let first = parser.parse(Cursor::new(input), &memo);
    let second = parser.parse(Cursor::new(input), &memo);
    assert_eq!(first, fresh);
    assert_eq!(second, fresh);
    assert!(memo.stats().hits > 0);
}

#[test]
fn memo_entries_are_per_position() {
    let memo = Memo::new();
    let parser = literal("a");
    let _ = parser.parse(Cursor::new("aa"), &memo);
    let _ = parser.parse(Cursor::new("aa").at(1), &memo);
    assert_eq!(memo.len(), 2);
    memo.clear();
    assert!(memo.is_empty());
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn registry_clears_every_live_cache() {
    let registry = CacheRegistry::new();
    let memo = registry.memo();
    let cache: Rc<Cache<String, usize>> = Rc::new(Cache::new("lengths"));
    registry.register(&cache);

    let _ = ambiguous().parse(Cursor::new("abab"), &memo);
    cache.insert("abab".to_string(), 4);
    assert!(!memo.is_empty());

    assert_eq!(registry.clear_all(), 2);
    assert!(memo.is_empty());
    assert!(cache.is_empty());
}

#[test]
fn registry_does_not_keep_caches_alive() {
    let registry = CacheRegistry::new();
    let memo = registry.memo();
    {
        let _short_lived = registry.memo();
        assert_eq!(registry.live_count(), 2);
    }
    assert_eq!(registry.live_count(), 1);
    assert_eq!(registry.clear_all(), 1);
    drop(memo);
    assert_eq!(registry.clear_all(), 0);
}

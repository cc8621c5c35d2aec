use watchpanel::application::watchlist::WatchlistUseCase;
use watchpanel::domain::values::watchlist::Watchlist;

fn names(w: &Watchlist) -> Vec<String> {
    w.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_add_normalizes_and_appends() {
    let mut uc = WatchlistUseCase::new(Watchlist::from_raw(&["PLTR"]));
    assert!(uc.add("  tmus "));
    assert_eq!(names(uc.current()), vec!["PLTR", "TMUS"]);
}

#[test]
fn test_add_ignores_blank_and_duplicates() {
    let mut uc = WatchlistUseCase::new(Watchlist::from_raw(&["PLTR"]));
    assert!(!uc.add(""));
    assert!(!uc.add("   "));
    assert!(!uc.add("pltr"));
    assert_eq!(names(uc.current()), vec!["PLTR"]);
}

#[test]
fn test_remove_absent_is_noop() {
    let mut uc = WatchlistUseCase::new(Watchlist::from_raw(&["PLTR", "TMUS"]));
    assert!(!uc.remove("NVDA"));
    assert!(uc.remove("PLTR"));
    assert!(!uc.remove("PLTR"));
    assert_eq!(names(uc.current()), vec!["TMUS"]);
}

#[test]
fn test_symbols_stay_unique_over_any_sequence() {
    let mut uc = WatchlistUseCase::new(Watchlist::default());
    let ops: [(bool, &str); 10] = [
        (true, "a"),
        (true, "B"),
        (true, "A"),
        (false, "c"),
        (true, "c"),
        (false, "a"),
        (true, " a "),
        (true, "b"),
        (false, "zz"),
        (true, "C"),
    ];
    for (add, s) in ops {
        if add {
            uc.add(s);
        } else {
            uc.remove(s);
        }
        let current = names(uc.current());
        let mut deduped = current.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), current.len(), "{current:?}");
    }
    assert_eq!(names(uc.current()), vec!["B", "C", "A"]);
}

#[test]
fn test_update_leaves_previous_value_untouched() {
    let before = Watchlist::from_raw(&["PLTR"]);
    let mut uc = WatchlistUseCase::new(before.clone());
    uc.add("TMUS");
    assert_eq!(names(&before), vec!["PLTR"]);
    assert_ne!(&before, uc.current());
}

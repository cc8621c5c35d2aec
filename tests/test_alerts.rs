mod common;

use common::{sym, table};
use watchpanel::application::alerts::evaluate;
use watchpanel::domain::entities::alert_rule::AlertRule;
use watchpanel::domain::values::alert_direction::AlertDirection;

#[test]
fn test_upward_rule_fires_at_threshold() {
    let rules = vec![AlertRule::new(sym("PLTR"), 2.0)];

    let fired = evaluate(&table(&[("PLTR", 2.0)]), &rules);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].symbol, sym("PLTR"));
    assert_eq!(fired[0].observed_pct, 2.0);
    assert_eq!(fired[0].observed_price, 102.0);

    assert!(evaluate(&table(&[("PLTR", 1.99)]), &rules).is_empty());
}

#[test]
fn test_downward_rule_fires_below_threshold() {
    let rules = vec![AlertRule::new(sym("BP-TR"), -1.0)];
    assert_eq!(rules[0].direction(), AlertDirection::Downward);

    assert_eq!(evaluate(&table(&[("BP-TR", -1.5)]), &rules).len(), 1);
    assert!(evaluate(&table(&[("BP-TR", -0.5)]), &rules).is_empty());
}

#[test]
fn test_zero_threshold_fires_on_flat_quote() {
    let rules = vec![AlertRule::new(sym("TMUS"), 0.0)];
    assert_eq!(evaluate(&table(&[("TMUS", 0.0)]), &rules).len(), 1);
    assert!(evaluate(&table(&[("TMUS", -0.01)]), &rules).is_empty());
}

#[test]
fn test_rule_without_quote_is_inert() {
    let rules = vec![
        AlertRule::new(sym("NVDA"), 1.0),
        AlertRule::new(sym("PLTR"), 1.0),
    ];
    let fired = evaluate(&table(&[("PLTR", 3.0)]), &rules);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].symbol, sym("PLTR"));
}

#[test]
fn test_output_follows_rule_order_without_dedup() {
    let rules = vec![
        AlertRule::new(sym("TMUS"), 0.5),
        AlertRule::new(sym("PLTR"), 1.0),
        AlertRule::new(sym("TMUS"), 0.1),
    ];
    let quotes = table(&[("PLTR", 1.2), ("TMUS", 0.8)]);
    let fired = evaluate(&quotes, &rules);

    let ids: Vec<&str> = fired.iter().map(|t| t.rule_id.as_str()).collect();
    let expected: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, expected);
    assert_eq!(fired[0].threshold_pct, 0.5);
    assert_eq!(fired[2].threshold_pct, 0.1);
}

#[test]
fn test_evaluate_is_pure() {
    let rules = vec![
        AlertRule::new(sym("PLTR"), 2.0),
        AlertRule::new(sym("BP-TR"), -1.0),
    ];
    let quotes = table(&[("PLTR", 2.4), ("BP-TR", -1.2)]);
    let first = evaluate(&quotes, &rules);
    let second = evaluate(&quotes, &rules);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_empty_inputs() {
    assert!(evaluate(&table(&[]), &[AlertRule::new(sym("PLTR"), 1.0)]).is_empty());
    assert!(evaluate(&table(&[("PLTR", 5.0)]), &[]).is_empty());
}

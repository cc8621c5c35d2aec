use crate::domain::entities::alert_rule::{AlertRule, TriggeredAlert};
use crate::domain::entities::quote::QuoteTable;
use crate::domain::values::ack_policy::AckPolicy;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Rules whose condition holds against `quotes`, in rule order.
///
/// Rules without a quote are skipped. Two rules on the same symbol can both
/// fire; nothing is deduplicated.
pub fn evaluate(quotes: &QuoteTable, rules: &[AlertRule]) -> Vec<TriggeredAlert> {
    rules
        .iter()
        .filter_map(|rule| quotes.get(&rule.symbol).and_then(|quote| rule.check(quote)))
        .collect()
}

/// Owns the alert rule set and the triggered alerts currently on display.
///
/// The display set is recomputed from scratch whenever a new quote table is
/// published. Acknowledging removes one entry from the display set; under
/// [`AckPolicy::Latch`] the rule also stays quiet until its condition stops
/// holding for at least one table.
pub struct AlertDesk {
    policy: AckPolicy,
    rules: Vec<AlertRule>,
    source: Option<Arc<QuoteTable>>,
    display: Vec<TriggeredAlert>,
    latched: HashSet<String>,
}

impl AlertDesk {
    pub fn new(rules: Vec<AlertRule>, policy: AckPolicy) -> Self {
        Self {
            policy,
            rules,
            source: None,
            display: Vec::new(),
            latched: HashSet::new(),
        }
    }

    pub fn rules(&self) -> &[AlertRule] {
        &self.rules
    }

    pub fn add_rule(&mut self, rule: AlertRule) -> &AlertRule {
        self.rules.push(rule);
        self.recompute();
        &self.rules[self.rules.len() - 1]
    }

    pub fn remove_rule(&mut self, id: &str) -> Option<AlertRule> {
        let pos = self.rules.iter().position(|r| r.id == id)?;
        let removed = self.rules.remove(pos);
        self.latched.remove(id);
        self.recompute();
        Some(removed)
    }

    /// Bring the display set up to date with `table`. A table already seen
    /// leaves the display set (and any acknowledgements) untouched.
    pub fn sync(&mut self, table: &Arc<QuoteTable>) -> &[TriggeredAlert] {
        let seen = self
            .source
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, table));
        if !seen {
            self.source = Some(table.clone());
            self.recompute();
        }
        &self.display
    }

    /// Triggered alerts currently on display.
    pub fn active(&self) -> &[TriggeredAlert] {
        &self.display
    }

    /// Dismiss the alert at `index` of the display set.
    pub fn acknowledge(&mut self, index: usize) -> Option<TriggeredAlert> {
        if index >= self.display.len() {
            return None;
        }
        let alert = self.display.remove(index);
        if self.policy == AckPolicy::Latch {
            self.latched.insert(alert.rule_id.clone());
        }
        debug!(symbol = %alert.symbol, policy = %self.policy, "alert acknowledged");
        Some(alert)
    }

    fn recompute(&mut self) {
        let Some(table) = self.source.as_ref() else {
            self.display.clear();
            return;
        };
        let triggered = evaluate(table, &self.rules);
        self.display = match self.policy {
            AckPolicy::Cosmetic => triggered,
            AckPolicy::Latch => {
                self.latched
                    .retain(|id| triggered.iter().any(|t| &t.rule_id == id));
                triggered
                    .into_iter()
                    .filter(|t| !self.latched.contains(&t.rule_id))
                    .collect()
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::quote::Quote;
    use crate::domain::values::symbol::Symbol;

    fn sym(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    fn table(moves: &[(&str, f64)]) -> Arc<QuoteTable> {
        Arc::new(
            moves
                .iter()
                .map(|(s, pct)| {
                    (
                        sym(s),
                        Quote {
                            price: 100.0 + pct,
                            change: *pct,
                            pct: *pct,
                        },
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_cosmetic_ack_lasts_until_next_table() {
        let mut desk = AlertDesk::new(vec![AlertRule::new(sym("PLTR"), 2.0)], AckPolicy::Cosmetic);
        assert_eq!(desk.sync(&table(&[("PLTR", 2.5)])).len(), 1);
        assert!(desk.acknowledge(0).is_some());
        assert!(desk.active().is_empty());
        assert_eq!(desk.sync(&table(&[("PLTR", 2.5)])).len(), 1);
    }

    #[test]
    fn test_same_table_keeps_ack() {
        let mut desk = AlertDesk::new(vec![AlertRule::new(sym("PLTR"), 2.0)], AckPolicy::Cosmetic);
        let t = table(&[("PLTR", 2.5)]);
        desk.sync(&t);
        desk.acknowledge(0);
        assert!(desk.sync(&t).is_empty());
    }

    #[test]
    fn test_latch_rearms_after_condition_clears() {
        let mut desk = AlertDesk::new(vec![AlertRule::new(sym("PLTR"), 2.0)], AckPolicy::Latch);
        desk.sync(&table(&[("PLTR", 2.5)]));
        desk.acknowledge(0);
        assert!(desk.sync(&table(&[("PLTR", 3.0)])).is_empty());
        assert!(desk.sync(&table(&[("PLTR", 1.0)])).is_empty());
        assert_eq!(desk.sync(&table(&[("PLTR", 2.1)])).len(), 1);
    }

    #[test]
    fn test_acknowledge_out_of_range() {
        let mut desk = AlertDesk::new(vec![], AckPolicy::Cosmetic);
        assert!(desk.acknowledge(0).is_none());
    }

    #[test]
    fn test_rule_changes_recompute_against_current_table() {
        let mut desk = AlertDesk::new(vec![], AckPolicy::Cosmetic);
        desk.sync(&table(&[("TMUS", -3.0)]));
        let id = desk.add_rule(AlertRule::new(sym("TMUS"), -2.0)).id.clone();
        assert_eq!(desk.active().len(), 1);
        assert!(desk.remove_rule(&id).is_some());
        assert!(desk.active().is_empty());
        assert!(desk.remove_rule(&id).is_none());
    }
}

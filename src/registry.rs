use std::collections::HashMap;

use crate::types::Rule;

/// Rules by name. Redeclaring a name replaces the rule but keeps its
/// position in the listing order.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, Rule>,
    order: Vec<String>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite by `rule.name`. Returns the rule that was replaced, if any.
    pub fn declare(&mut self, rule: Rule) -> Option<Rule> {
        let previous = self.rules.insert(rule.name.clone(), rule.clone());
        if previous.is_none() {
            self.order.push(rule.name);
        }
        previous
    }

    pub fn resolve(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Rule> {
        let removed = self.rules.remove(name)?;
        self.order.retain(|n| n != name);
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.rules.clear();
        self.order.clear();
    }

    /// Rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.order.iter().filter_map(|name| self.rules.get(name))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

//! Store methods for recurrence rules. One document per rule.

use crate::{
    error::DeskResult,
    recurrence::RecurrenceRule,
    types::RuleId,
};

use super::{DeskStore, RULE_COLLECTION};

impl DeskStore {
    /// Insert or overwrite a rule in place. A rule without an id gets a
    /// fresh one. Invalid rules are rejected before anything is written.
    pub fn save_rule(&self, rule: &RecurrenceRule) -> DeskResult<RuleId> {
        let mut rule = rule.clone();
        if rule.id.trim().is_empty() {
            rule.id = uuid::Uuid::new_v4().to_string();
        }
        rule.validate()?;
        self.set_doc(RULE_COLLECTION, &rule.id, &rule)?;
        log::info!(
            "Saved rule {} for {} ({} on days {:?})",
            rule.id, rule.technician_id, rule.status, rule.days
        );
        Ok(rule.id)
    }

    /// Returns false when no rule had this id.
    pub fn delete_rule(&self, rule_id: &str) -> DeskResult<bool> {
        let deleted = self.delete_doc(RULE_COLLECTION, rule_id)?;
        if deleted {
            log::info!("Deleted rule {rule_id}");
        }
        Ok(deleted)
    }

    /// Every valid rule in stored order. Malformed documents are skipped.
    pub fn load_rules(&self) -> DeskResult<Vec<RecurrenceRule>> {
        let mut rules = Vec::new();
        for (doc_id, body) in self.list_raw(RULE_COLLECTION)? {
            let parsed = serde_json::from_str::<RecurrenceRule>(&body)
                .map_err(|e| e.to_string())
                .and_then(|mut rule| {
                    rule.id = doc_id.clone();
                    rule.validate().map_err(|e| e.to_string())?;
                    Ok(rule)
                });
            match parsed {
                Ok(rule) => rules.push(rule),
                Err(reason) => log::warn!("Skipping malformed rule document {doc_id}: {reason}"),
            }
        }
        Ok(rules)
    }

    pub fn rule_count(&self) -> DeskResult<i64> {
        self.doc_count(RULE_COLLECTION)
    }
}

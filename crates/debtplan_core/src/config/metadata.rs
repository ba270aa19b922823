//! Plan metadata for human-readable names and descriptions
//!
//! `PlanMetadata` provides bidirectional mappings between debt names and IDs,
//! enabling the builder DSL and the CLI to refer to debts by name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::DebtId;

/// Metadata entry for a plan entity
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EntityMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlanMetadata {
    /// Debt ID to metadata mapping
    pub debts: HashMap<DebtId, EntityMetadata>,

    /// Name to Debt ID reverse lookup
    #[serde(default)]
    pub debt_names: HashMap<String, DebtId>,
}

impl PlanMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a debt with optional name and description
    pub fn register_debt(&mut self, id: DebtId, name: Option<String>, description: Option<String>) {
        if let Some(ref n) = name {
            self.debt_names.insert(n.clone(), id);
        }
        self.debts.insert(id, EntityMetadata { name, description });
    }

    pub fn debt_id(&self, name: &str) -> Option<DebtId> {
        self.debt_names.get(name).copied()
    }

    pub fn debt_name(&self, id: DebtId) -> Option<&str> {
        self.debts.get(&id).and_then(|m| m.name.as_deref())
    }
}

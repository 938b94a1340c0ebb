//! Instance Store
//!
//! Persists authored Tabs instances: container attributes as JSON and the
//! ordered tab entries. Activation state is never persisted; only the
//! default tab is, through the container's `activeTab` index.

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension;
use serde::Serialize;
use std::collections::HashMap;

use blocktabs_activation::{TabDescriptor, TabRegistry};
use blocktabs_block::TabsAttributes;
use blocktabs_storage::{Database, StorageError};

use crate::error::CoreError;
use crate::instance::TabsInstance;
use crate::Result;

/// Listing entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceSummary {
    pub id: String,
    pub name: String,
    pub tab_count: usize,
    pub updated_at: DateTime<Utc>,
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[derive(Clone)]
pub struct InstanceStore {
    db: Database,
}

impl InstanceStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert or replace an instance and all of its tab entries.
    pub fn save(&self, instance: &TabsInstance) -> Result<()> {
        let attributes = serde_json::to_string(&instance.attributes)?;

        self.db.transaction(|conn| {
            conn.execute(
                "INSERT INTO tabs_instances (id, name, attributes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    attributes = excluded.attributes,
                    updated_at = excluded.updated_at",
                rusqlite::params![
                    instance.id,
                    instance.name,
                    attributes,
                    instance.created_at.to_rfc3339(),
                    instance.updated_at.to_rfc3339(),
                ],
            )?;

            conn.execute(
                "DELETE FROM tab_entries WHERE instance_id = ?1",
                [&instance.id],
            )?;

            let mut stmt = conn.prepare(
                "INSERT INTO tab_entries (instance_id, position, tab_id, label, icon, content)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for (position, tab) in instance.registry().iter().enumerate() {
                stmt.execute(rusqlite::params![
                    instance.id,
                    position as i64,
                    tab.id,
                    tab.label,
                    tab.icon,
                    instance.panel(&tab.id),
                ])?;
            }

            Ok(())
        })?;

        tracing::info!(
            instance_id = %instance.id,
            tab_count = instance.registry().len(),
            "Saved tabs instance"
        );

        Ok(())
    }

    /// Load an instance; its controller starts on the default tab.
    pub fn load(&self, id: &str) -> Result<TabsInstance> {
        let row = self.db.with_connection(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, name, attributes, created_at, updated_at
                     FROM tabs_instances WHERE id = ?1",
                    [id],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, String>(3)?,
                            row.get::<_, String>(4)?,
                        ))
                    },
                )
                .optional()?;
            Ok(row)
        })?;

        let Some((id, name, attributes_json, created, updated)) = row else {
            return Err(CoreError::InstanceNotFound(id.to_string()));
        };

        let attributes: TabsAttributes =
            serde_json::from_str(&attributes_json).map_err(StorageError::from)?;

        let entries = self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT tab_id, label, icon, content FROM tab_entries
                 WHERE instance_id = ?1 ORDER BY position",
            )?;

            let entries = stmt
                .query_map([&id], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(entries)
        })?;

        let mut tabs = Vec::with_capacity(entries.len());
        let mut panels = HashMap::with_capacity(entries.len());
        for (position, (tab_id, label, icon, content)) in entries.into_iter().enumerate() {
            let is_default = attributes.active_tab == Some(position as i64);
            tabs.push(
                TabDescriptor::new(tab_id.clone())?
                    .with_label(label)
                    .with_icon(icon.unwrap_or_default())
                    .with_default(is_default),
            );
            panels.insert(tab_id, content);
        }

        let registry = TabRegistry::new(tabs)?;

        Ok(TabsInstance::restore(
            id,
            name,
            attributes,
            registry,
            panels,
            parse_timestamp(&created),
            parse_timestamp(&updated),
        ))
    }

    pub fn list(&self) -> Result<Vec<InstanceSummary>> {
        let summaries = self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT i.id, i.name, i.updated_at, COUNT(e.tab_id)
                 FROM tabs_instances i
                 LEFT JOIN tab_entries e ON e.instance_id = i.id
                 GROUP BY i.id
                 ORDER BY i.updated_at DESC",
            )?;

            let summaries = stmt
                .query_map([], |row| {
                    let updated: String = row.get(2)?;
                    Ok(InstanceSummary {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        updated_at: parse_timestamp(&updated),
                        tab_count: row.get::<_, i64>(3)? as usize,
                    })
                })?
                .filter_map(|r| r.ok())
                .collect();

            Ok(summaries)
        })?;

        Ok(summaries)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let removed = self.db.with_connection(|conn| {
            Ok(conn.execute("DELETE FROM tabs_instances WHERE id = ?1", [id])?)
        })?;

        if removed == 0 {
            return Err(CoreError::InstanceNotFound(id.to_string()));
        }

        tracing::info!(instance_id = %id, "Deleted tabs instance");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocktabs_block::ParsedBlock;
    use serde_json::json;

    fn store() -> InstanceStore {
        InstanceStore::new(Database::open_in_memory().unwrap())
    }

    fn instance() -> TabsInstance {
        let tab = |id: &str, icon: &str| ParsedBlock {
            attrs: json!({ "tabId": id, "tabname": id.to_uppercase(), "tabIcon": icon }),
            inner_blocks: vec![ParsedBlock::default()],
            inner_html: format!("<p>{id}</p>"),
            ..Default::default()
        };
        let block = ParsedBlock {
            attrs: json!({ "activeTab": 2, "orientation": "vertical" }),
            inner_blocks: vec![tab("a", ""), tab("b", "<svg/>"), tab("c", "")],
            ..Default::default()
        };
        TabsInstance::from_block("pricing", &block).unwrap()
    }

    #[test]
    fn test_save_and_load() {
        let store = store();
        let original = instance();
        store.save(&original).unwrap();

        let loaded = store.load(&original.id).unwrap();
        assert_eq!(loaded.name, "pricing");
        assert_eq!(loaded.registry(), original.registry());
        assert_eq!(loaded.attributes, original.attributes);
        assert_eq!(loaded.active_id(), Some("tab-c"));
        assert_eq!(loaded.panel("tab-b"), "<p>b</p>");
        assert_eq!(loaded.registry().at(1).unwrap().icon.as_deref(), Some("<svg/>"));
    }

    #[test]
    fn test_activation_is_not_persisted() {
        let store = store();
        let mut original = instance();
        original.click("tab-a");
        store.save(&original).unwrap();

        let loaded = store.load(&original.id).unwrap();
        assert_eq!(loaded.active_id(), Some("tab-c"));
    }

    #[test]
    fn test_save_replaces_entries() {
        let store = store();
        let mut original = instance();
        store.save(&original).unwrap();

        original.remove_tab("tab-a").unwrap();
        store.save(&original).unwrap();

        let loaded = store.load(&original.id).unwrap();
        let ids: Vec<_> = loaded.registry().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["tab-b", "tab-c"]);
        assert_eq!(loaded.registry().default_id(), Some("tab-c"));

        let summaries = store.list().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].tab_count, 2);
    }

    #[test]
    fn test_load_missing_instance() {
        let result = store().load("nope");
        assert!(matches!(result, Err(CoreError::InstanceNotFound(id)) if id == "nope"));
    }

    #[test]
    fn test_delete() {
        let store = store();
        let original = instance();
        store.save(&original).unwrap();
        store.delete(&original.id).unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(store.delete(&original.id).is_err());
    }
}

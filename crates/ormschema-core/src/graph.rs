use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::entity::EntityCatalog;

/// Summary of relationship graph structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationGraphSummary {
    pub entities: usize,
    pub relationships: usize,
}

/// Relationship dependency report for a catalog.
///
/// Exactly one of `order` and `cycle` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationGraphReport {
    pub summary: RelationGraphSummary,
    /// Entities ordered so that every relationship target precedes its owner.
    pub order: Option<Vec<String>>,
    /// Entities that sit on, or depend on, a relationship cycle.
    pub cycle: Option<Vec<String>>,
}

impl RelationGraphReport {
    pub fn has_cycle(&self) -> bool {
        self.cycle.is_some()
    }
}

/// Build a deterministic relationship dependency report for a catalog.
pub fn build_relation_graph_report(catalog: &EntityCatalog) -> RelationGraphReport {
    let graph = build_adjacency(catalog);
    let summary = RelationGraphSummary {
        entities: graph.len(),
        relationships: catalog
            .entities
            .iter()
            .map(|entity| entity.relationships.len())
            .sum(),
    };

    match toposort(&graph) {
        Ok(order) => RelationGraphReport {
            summary,
            order: Some(order),
            cycle: None,
        },
        Err(cycle) => RelationGraphReport {
            summary,
            order: None,
            cycle: Some(cycle),
        },
    }
}

/// Edges point from a relationship target to the entities that reference it.
fn build_adjacency(catalog: &EntityCatalog) -> BTreeMap<&str, BTreeSet<&str>> {
    let mut graph: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

    for entity in &catalog.entities {
        graph.entry(entity.name.as_str()).or_default();
        for relationship in &entity.relationships {
            graph
                .entry(relationship.target.as_str())
                .or_default()
                .insert(entity.name.as_str());
        }
    }

    graph
}

fn toposort(graph: &BTreeMap<&str, BTreeSet<&str>>) -> Result<Vec<String>, Vec<String>> {
    let mut indegree: BTreeMap<&str, usize> = graph.keys().map(|node| (*node, 0)).collect();
    for targets in graph.values() {
        for target in targets {
            *indegree.entry(*target).or_insert(0) += 1;
        }
    }

    let mut ready: BTreeSet<&str> = indegree
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(node, _)| *node)
        .collect();
    let mut order = Vec::with_capacity(graph.len());

    while let Some(node) = ready.pop_first() {
        order.push(node.to_string());
        for target in graph.get(node).into_iter().flatten() {
            if let Some(count) = indegree.get_mut(target) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    ready.insert(*target);
                }
            }
        }
    }

    if order.len() == graph.len() {
        Ok(order)
    } else {
        Err(indegree
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(node, _)| node.to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ColumnDescriptor, EntityDescriptor, RelationshipDescriptor};
    use crate::types::PrimitiveType;

    fn entity(name: &str) -> EntityDescriptor {
        EntityDescriptor::new(name)
            .with_column(ColumnDescriptor::new("id", PrimitiveType::Integer).primary_key())
    }

    #[test]
    fn reports_back_populated_cycle() {
        let catalog = EntityCatalog::new(vec![
            entity("User").with_relationship(RelationshipDescriptor::many("addresses", "Address")),
            entity("Address").with_relationship(RelationshipDescriptor::one("user", "User")),
        ]);

        let report = build_relation_graph_report(&catalog);
        assert!(report.order.is_none());
        assert_eq!(
            report.cycle.as_deref(),
            Some(&["Address".to_string(), "User".to_string()][..])
        );
        assert_eq!(report.summary.relationships, 2);
    }

    #[test]
    fn reports_self_reference_as_cycle() {
        let catalog = EntityCatalog::new(vec![
            entity("Node").with_relationship(RelationshipDescriptor::one("parent", "Node")),
        ]);

        assert!(build_relation_graph_report(&catalog).has_cycle());
    }

    #[test]
    fn orders_targets_before_owners() {
        let catalog = EntityCatalog::new(vec![
            entity("Order").with_relationship(RelationshipDescriptor::one("customer", "Customer")),
            entity("Customer"),
        ]);

        let report = build_relation_graph_report(&catalog);
        let order = report.order.expect("expected toposort");
        let customer_idx = order.iter().position(|item| item == "Customer").unwrap();
        let order_idx = order.iter().position(|item| item == "Order").unwrap();
        assert!(customer_idx < order_idx);
        assert_eq!(report.summary.entities, 2);
    }
}

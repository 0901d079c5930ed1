//! Serial mesh: one element store and one node store on a single partition.
//!
//! [`Mesh`] owns both stores and keeps their local processor id in sync. Views
//! are taken from the stores directly:
//!
//! ```
//! use mesh_select::prelude::*;
//!
//! let mut mesh = Mesh::serial();
//! let a = mesh.add_node(Node::new([0.0, 0.0, 0.0]));
//! let b = mesh.add_node(Node::new([1.0, 0.0, 0.0]));
//! mesh.add_elem(Elem::new(CellType::Segment, vec![a, b]).unwrap()).unwrap();
//!
//! assert_eq!(mesh.elements().active().count(), 1);
//! assert_eq!(mesh.nodes().all().count(), 2);
//! ```

use crate::data::storage::EntityStore;
use crate::debug_invariants::DebugInvariants;
use crate::entity::{Elem, MeshEntity, Node, RefinableEntity};
use crate::mesh_error::MeshSelectError;
use crate::topology::ownership::ProcessorId;
use crate::topology::point::EntityId;

/// Runtime configuration for a [`Mesh`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MeshConfig {
    /// Rank of the local partition.
    pub processor_id: ProcessorId,
    /// Number of partitions in the communicator.
    pub n_processors: u32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            processor_id: ProcessorId::new(0),
            n_processors: 1,
        }
    }
}

impl MeshConfig {
    /// Check that `processor_id` is a real rank in `[0, n_processors)`.
    pub fn validate(&self) -> Result<(), MeshSelectError> {
        if self.processor_id.is_unpartitioned() || self.processor_id.get() >= self.n_processors {
            return Err(MeshSelectError::InvalidProcessorId {
                processor_id: self.processor_id,
                n_processors: self.n_processors,
            });
        }
        Ok(())
    }
}

/// Deserialized meshes are checked with [`DebugInvariants::validate_invariants`]
/// before they are handed out.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "MeshParts")]
pub struct Mesh {
    config: MeshConfig,
    elements: EntityStore<Elem>,
    nodes: EntityStore<Node>,
}

/// Unchecked wire form of a [`Mesh`].
#[derive(serde::Deserialize)]
struct MeshParts {
    config: MeshConfig,
    elements: EntityStore<Elem>,
    nodes: EntityStore<Node>,
}

impl TryFrom<MeshParts> for Mesh {
    type Error = MeshSelectError;

    fn try_from(parts: MeshParts) -> Result<Self, Self::Error> {
        let mesh = Mesh {
            config: parts.config,
            elements: parts.elements,
            nodes: parts.nodes,
        };
        mesh.validate_invariants()?;
        Ok(mesh)
    }
}

impl Mesh {
    /// A single-partition mesh: processor 0 of 1.
    pub fn serial() -> Self {
        Self::build(MeshConfig::default())
    }

    pub fn with_config(config: MeshConfig) -> Result<Self, MeshSelectError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: MeshConfig) -> Self {
        log::trace!(
            "new mesh on processor {} of {}",
            config.processor_id,
            config.n_processors
        );
        Self {
            config,
            elements: EntityStore::new(config.processor_id),
            nodes: EntityStore::new(config.processor_id),
        }
    }

    pub fn processor_id(&self) -> ProcessorId {
        self.config.processor_id
    }

    pub fn n_processors(&self) -> u32 {
        self.config.n_processors
    }

    pub fn elements(&self) -> &EntityStore<Elem> {
        &self.elements
    }

    /// Mutable element store. While the borrow is live no node can be added or
    /// removed, so connectivity checks stay valid.
    pub fn elements_mut(&mut self) -> &mut EntityStore<Elem> {
        &mut self.elements
    }

    pub fn nodes(&self) -> &EntityStore<Node> {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut EntityStore<Node> {
        &mut self.nodes
    }

    pub fn add_node(&mut self, node: Node) -> EntityId {
        self.nodes.push(node)
    }

    /// Add an element; every node it references must be live.
    pub fn add_elem(&mut self, elem: Elem) -> Result<EntityId, MeshSelectError> {
        let next = EntityId::from_index(self.elements.len());
        if let Some(&node) = elem.nodes().iter().find(|&&n| self.nodes.get(n).is_none()) {
            return Err(MeshSelectError::DanglingNode { elem: next, node });
        }
        Ok(self.elements.push(elem))
    }

    /// Tombstone an element. Its id is never reused.
    pub fn delete_elem(&mut self, id: EntityId) -> Result<Elem, MeshSelectError> {
        self.elements.tombstone(id)
    }

    /// Tombstone a node. Live elements that still reference it are reported
    /// with a warning and left in place.
    pub fn delete_node(&mut self, id: EntityId) -> Result<Node, MeshSelectError> {
        let node = self.nodes.tombstone(id)?;
        for elem in self.elements.all().filter(|e| e.nodes().contains(&id)) {
            log::warn!("deleted node {id} is still referenced by element {}", elem.id());
        }
        Ok(node)
    }

    /// Assign every element an owner, then give each node the smallest owner
    /// among the elements touching it. Nodes with no element stay as they are.
    pub fn partition_with<F>(&mut self, mut owner_of: F)
    where
        F: FnMut(&Elem) -> ProcessorId,
    {
        let mut node_owner: Vec<Option<ProcessorId>> = vec![None; self.nodes.len()];
        for elem in self.elements.all_mut() {
            let owner = owner_of(&*elem);
            elem.set_processor_id(owner);
            for node in elem.nodes() {
                if let Some(slot) = node_owner.get_mut(node.index()) {
                    *slot = Some(slot.map_or(owner, |o| o.min(owner)));
                }
            }
        }
        let slots = self.nodes.raw_slots_mut().iter_mut();
        for (node, owner) in slots.zip(node_owner) {
            if let (Some(node), Some(owner)) = (node, owner) {
                node.set_processor_id(owner);
            }
        }
    }

    /// Drop all tombstones and renumber nodes and elements contiguously.
    ///
    /// Fails without changing anything if a live element references a
    /// tombstoned node.
    pub fn compact(&mut self) -> Result<(), MeshSelectError> {
        self.validate_invariants()?;
        let node_map = self.nodes.compact();
        self.elements.compact();
        for elem in self.elements.all_mut() {
            elem.remap_nodes(|old| node_map.get(old.index()).copied().flatten());
        }
        Ok(())
    }

    /// Live elements, tombstones excluded.
    pub fn n_elem(&self) -> usize {
        self.elements.n_live()
    }

    pub fn n_active_elem(&self) -> usize {
        self.elements.active().count()
    }

    pub fn n_local_elem(&self) -> usize {
        self.elements.local().count()
    }

    pub fn n_active_local_elem(&self) -> usize {
        self.elements.active_local().count()
    }

    pub fn n_unpartitioned_elem(&self) -> usize {
        self.elements.unpartitioned().count()
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.n_live()
    }

    pub fn n_local_nodes(&self) -> usize {
        self.nodes.local().count()
    }

    /// Highest refinement level among live elements, plus one; 0 when empty.
    pub fn n_levels(&self) -> u32 {
        self.elements.all().map(|e| e.level() + 1).max().unwrap_or(0)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::serial()
    }
}

impl DebugInvariants for Mesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Mesh");
    }

    fn validate_invariants(&self) -> Result<(), MeshSelectError> {
        self.config.validate()?;
        let expected = self.config.processor_id;
        for (store, found) in [
            ("element", self.elements.processor_id()),
            ("node", self.nodes.processor_id()),
        ] {
            if found != expected {
                return Err(MeshSelectError::ProcessorIdMismatch {
                    store,
                    expected,
                    found,
                });
            }
        }
        self.nodes.validate_invariants()?;
        self.elements.validate_invariants()?;
        for elem in self.elements.all() {
            if let Some(&node) = elem.nodes().iter().find(|&&n| self.nodes.get(n).is_none()) {
                return Err(MeshSelectError::DanglingNode {
                    elem: elem.id(),
                    node,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::cell_type::CellType;
    use crate::topology::refinement::RefinementState;

    /// Two triangles sharing an edge: nodes 0..4, elements 0..2.
    fn two_triangles() -> Mesh {
        let mut mesh = Mesh::serial();
        let n: Vec<_> = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]
            .iter()
            .map(|&[x, y]| mesh.add_node(Node::new([x, y, 0.0])))
            .collect();
        mesh.add_elem(Elem::new(CellType::Triangle, vec![n[0], n[1], n[2]]).unwrap())
            .unwrap();
        mesh.add_elem(Elem::new(CellType::Triangle, vec![n[1], n[3], n[2]]).unwrap())
            .unwrap();
        mesh
    }

    #[test]
    fn config_validation() {
        let bad = MeshConfig {
            processor_id: ProcessorId::new(2),
            n_processors: 2,
        };
        assert_eq!(
            Mesh::with_config(bad).unwrap_err(),
            MeshSelectError::InvalidProcessorId {
                processor_id: ProcessorId::new(2),
                n_processors: 2
            }
        );
        let ok = MeshConfig {
            processor_id: ProcessorId::new(1),
            n_processors: 2,
        };
        let mesh = Mesh::with_config(ok).unwrap();
        assert_eq!(mesh.elements().processor_id(), ProcessorId::new(1));
        assert_eq!(mesh.nodes().processor_id(), ProcessorId::new(1));
    }

    #[test]
    fn config_from_json() {
        let cfg: MeshConfig =
            serde_json::from_str(r#"{"processor_id": 3, "n_processors": 4}"#).unwrap();
        assert_eq!(cfg.processor_id, ProcessorId::new(3));
        cfg.validate().unwrap();
    }

    #[test]
    fn add_elem_rejects_missing_nodes() {
        let mut mesh = two_triangles();
        let tri = Elem::new(
            CellType::Triangle,
            vec![EntityId::new(0), EntityId::new(1), EntityId::new(9)],
        )
        .unwrap();
        assert_eq!(
            mesh.add_elem(tri).unwrap_err(),
            MeshSelectError::DanglingNode {
                elem: EntityId::new(2),
                node: EntityId::new(9)
            }
        );
        assert_eq!(mesh.n_elem(), 2);
    }

    #[test]
    fn partition_assigns_min_owner_to_shared_nodes() {
        let mut mesh = two_triangles();
        mesh.partition_with(|e| ProcessorId::new(e.id().get() as u32));
        let owners: Vec<_> = mesh.nodes().all().map(|n| n.processor_id().get()).collect();
        assert_eq!(owners, vec![0, 0, 0, 1]);
        assert_eq!(mesh.n_local_elem(), 1);
        assert_eq!(mesh.n_local_nodes(), 3);
        assert_eq!(mesh.n_unpartitioned_elem(), 0);
    }

    #[test]
    fn counts_follow_views() {
        let mut mesh = two_triangles();
        assert_eq!(mesh.n_unpartitioned_elem(), 2);
        mesh.elements_mut()
            .all_mut()
            .next()
            .unwrap()
            .set_refinement_state(RefinementState::Ancestor);
        assert_eq!(mesh.n_elem(), 2);
        assert_eq!(mesh.n_active_elem(), 1);
        mesh.delete_elem(EntityId::new(1)).unwrap();
        assert_eq!(mesh.n_elem(), 1);
        assert_eq!(mesh.n_active_elem(), 0);
        assert_eq!(mesh.n_levels(), 1);
    }

    #[test]
    fn compact_rewrites_connectivity() {
        let mut mesh = two_triangles();
        mesh.delete_elem(EntityId::new(0)).unwrap();
        mesh.delete_node(EntityId::new(0)).unwrap();
        mesh.compact().unwrap();
        assert_eq!(mesh.elements().len(), 1);
        assert_eq!(mesh.nodes().len(), 3);
        let elem = mesh.elements().all().next().unwrap();
        assert_eq!(elem.id(), EntityId::new(0));
        assert_eq!(
            elem.nodes(),
            &[EntityId::new(0), EntityId::new(2), EntityId::new(1)]
        );
        assert_eq!(elem.cell_type(), CellType::Triangle);
        mesh.validate_invariants().unwrap();
    }

    #[test]
    fn partition_uses_slot_positions_not_stored_ids() {
        let mut mesh = two_triangles();
        for node in mesh.nodes_mut().all_mut() {
            node.set_id(EntityId::new(50));
        }
        mesh.partition_with(|_| ProcessorId::new(0));
        assert_eq!(mesh.nodes().pid(ProcessorId::new(0)).count(), 4);
        assert!(mesh.validate_invariants().is_err());
    }

    #[test]
    fn mesh_json_round_trip() {
        let mut mesh = two_triangles();
        mesh.partition_with(|_| ProcessorId::new(0));
        let json = serde_json::to_string(&mesh).unwrap();
        let back: Mesh = serde_json::from_str(&json).unwrap();
        assert_eq!(back.n_elem(), 2);
        assert_eq!(back.n_local_nodes(), 4);
    }

    #[test]
    fn deserialize_rejects_inconsistent_processor_ids() {
        let mut value = serde_json::to_value(two_triangles()).unwrap();
        value["nodes"]["processor_id"] = serde_json::json!(3);
        let err = serde_json::from_value::<Mesh>(value.clone()).unwrap_err();
        assert!(err.to_string().contains("node store is on processor 3"), "{err}");

        value["config"] = serde_json::json!({"processor_id": 5, "n_processors": 2});
        let err = serde_json::from_value::<Mesh>(value).unwrap_err();
        assert!(err.to_string().contains("processor id 5 invalid"), "{err}");
    }

    #[test]
    fn store_processor_id_must_match_config() {
        let mut mesh = two_triangles();
        mesh.nodes = EntityStore::new(ProcessorId::new(1));
        assert_eq!(
            mesh.validate_invariants().unwrap_err(),
            MeshSelectError::ProcessorIdMismatch {
                store: "node",
                expected: ProcessorId::new(0),
                found: ProcessorId::new(1),
            }
        );
    }

    #[test]
    fn dangling_reference_is_an_invariant_error() {
        let mut mesh = two_triangles();
        mesh.delete_node(EntityId::new(3)).unwrap();
        assert_eq!(
            mesh.validate_invariants().unwrap_err(),
            MeshSelectError::DanglingNode {
                elem: EntityId::new(1),
                node: EntityId::new(3)
            }
        );
        assert!(mesh.compact().is_err());
        assert_eq!(mesh.nodes().len(), 4);
    }
}

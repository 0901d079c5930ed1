//! Mesh nodes.

use crate::entity::MeshEntity;
use crate::topology::ownership::ProcessorId;
use crate::topology::point::EntityId;

/// A mesh vertex. Nodes carry no refinement state, so they are always active.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    id: EntityId,
    point: [f64; 3],
    processor_id: ProcessorId,
}

impl Node {
    /// Creates an unpartitioned node at `point`.
    pub fn new(point: [f64; 3]) -> Self {
        Self {
            id: EntityId::new(0),
            point,
            processor_id: ProcessorId::UNPARTITIONED,
        }
    }

    pub fn with_processor_id(mut self, processor_id: ProcessorId) -> Self {
        self.processor_id = processor_id;
        self
    }

    pub fn point(&self) -> [f64; 3] {
        self.point
    }

    pub fn set_point(&mut self, point: [f64; 3]) {
        self.point = point;
    }

    pub fn set_processor_id(&mut self, processor_id: ProcessorId) {
        self.processor_id = processor_id;
    }
}

impl MeshEntity for Node {
    fn id(&self) -> EntityId {
        self.id
    }

    fn processor_id(&self) -> ProcessorId {
        self.processor_id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

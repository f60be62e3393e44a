//! Index maps between the fault-only and the full boundary index space.

use crate::mesh::BoundaryElement;

/// Maps fault indices `[0, Nf)` to boundary indices `[0, N)`.
///
/// Built in a single pass over the mesh in encounter order; read-only
/// afterwards with O(1) lookup.
#[derive(Debug, Clone)]
pub struct FaultMap {
    map: Vec<usize>,
}

impl FaultMap {
    /// Record the boundary index of every fault-flagged element.
    pub fn new(mesh: &[BoundaryElement]) -> Self {
        let map = mesh
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_fault())
            .map(|(i, _)| i)
            .collect();
        Self { map }
    }

    /// Number of fault elements `Nf`.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the mesh contains no fault elements.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Boundary index of fault element `f`.
    pub fn boundary_index(&self, f: usize) -> usize {
        self.map[f]
    }
}

/// Maps boundary indices to fault indices; inverse of [`FaultMap`].
#[derive(Debug, Clone)]
pub struct InverseFaultMap {
    imap: Vec<Option<usize>>,
}

impl InverseFaultMap {
    /// Record the fault index of every boundary element, `None` off-fault.
    pub fn new(mesh: &[BoundaryElement]) -> Self {
        let mut imap = Vec::with_capacity(mesh.len());
        let mut f = 0;
        for element in mesh {
            if element.is_fault() {
                imap.push(Some(f));
                f += 1;
            } else {
                imap.push(None);
            }
        }
        Self { imap }
    }

    /// Number of boundary elements `N`.
    pub fn len(&self) -> usize {
        self.imap.len()
    }

    /// Whether the mesh is empty.
    pub fn is_empty(&self) -> bool {
        self.imap.is_empty()
    }

    /// Fault index of boundary element `i`, or `None` off-fault.
    pub fn fault_index(&self, i: usize) -> Option<usize> {
        self.imap[i]
    }
}

use super::clone_list::CloneList;

/// Where a table is in the drag lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No pointer is held on a handle.
    Idle,
    /// A handle was pressed; nothing has moved yet.
    Armed,
    /// The clone list is materialized and follows the pointer.
    Dragging,
}

/// State of one press-move-release cycle.
#[derive(Debug)]
pub(crate) struct DragSession {
    /// Index of the pressed row in the real table.
    pub origin: usize,
    /// Last known pointer position.
    pub pointer: (u16, u16),
    /// Materialized on the first move.
    pub clones: Option<CloneList>,
    /// Offset of the clone list from the table's parent, `(left, top)`.
    pub anchor: (i16, i16),
}

impl DragSession {
    pub fn armed(origin: usize, pointer: (u16, u16)) -> Self {
        Self {
            origin,
            pointer,
            clones: None,
            anchor: (0, 0),
        }
    }

    pub fn phase(&self) -> DragPhase {
        if self.clones.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Armed
        }
    }

    /// Pointer delta since the last recorded position; records `pointer`.
    pub fn advance(&mut self, pointer: (u16, u16)) -> (i32, i32) {
        let dx = i32::from(pointer.0) - i32::from(self.pointer.0);
        let dy = i32::from(pointer.1) - i32::from(self.pointer.1);
        self.pointer = pointer;
        (dx, dy)
    }
}

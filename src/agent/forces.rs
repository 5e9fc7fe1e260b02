//! Staged force records.
//!
//! Forces are never applied the moment they are computed. Phases 1 and 3/4
//! of the lifecycle stage them against a specific sphere of the agent's
//! geometry; the adjust phases then drain the staging buffer into the
//! future buffer as displacements. Keeping the kind tag around lets
//! downstream consumers (debug rendering, diagnostics) tell a repulsion
//! apart from a drive force.

use glam::Vec3;

/// Category of a staged force.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceKind {
    /// Internal bulk force (growth pressure, shape maintenance).
    Body,
    /// Contact force pushing two overlapping geometries apart.
    Repulsive,
    /// Contact force pulling two nearby geometries together.
    Attractive,
    /// Externally imposed locomotion force.
    Drive,
}

/// A force staged against one sphere of an agent's geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Force {
    /// What produced this force.
    pub kind: ForceKind,
    /// Force vector [force units].
    pub vec: Vec3,
    /// Index of the sphere slot the force acts on.
    pub sphere: usize,
}

impl Force {
    /// Stage a force of `kind` acting on sphere slot `sphere`.
    pub fn new(kind: ForceKind, vec: Vec3, sphere: usize) -> Self {
        Self { kind, vec, sphere }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tag_separates_contact_from_drive_forces() {
        // A diagnostics pass over a staging buffer keys on the kind tag.
        let staged = [
            Force::new(ForceKind::Repulsive, Vec3::NEG_X, 0),
            Force::new(ForceKind::Drive, Vec3::X, 0),
            Force::new(ForceKind::Repulsive, Vec3::NEG_Y, 1),
        ];

        let contact: Vec<&Force> = staged
            .iter()
            .filter(|force| matches!(force.kind, ForceKind::Repulsive | ForceKind::Attractive))
            .collect();

        assert_eq!(contact.len(), 2);
        assert!(contact.iter().all(|force| force.sphere <= 1));
        assert_eq!(staged[1].kind, ForceKind::Drive);
    }
}

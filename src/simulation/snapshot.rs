//! Per-step neighbor snapshot.
//!
//! Phase 3 of every agent must see a world in which nobody has applied this
//! step's movement yet. Instead of trusting callers to uphold that by
//! convention, the snapshot *type* enforces it: it is built once per step,
//! between phases 2 and 3, from every agent's exposed geometry, and phase 3
//! only ever receives a shared reference to it. Whatever order (or thread)
//! agents run in, they all query the same frozen view.

use glam::{IVec3, UVec3, Vec3};

use crate::agent::Agent;
use crate::geometry::{AxisAlignedBoundingBox, Geometry};

/// Population size at which the snapshot builds its uniform grid instead
/// of answering queries by linear scan.
const GRID_BUILD_THRESHOLD: usize = 64;

/// Grid resolution per axis (16^3 = 4096 bins).
const GRID_DIM: u32 = 16;

/// Smallest permitted bin edge, guards against a population collapsed onto
/// a single point.
const MIN_CELL_SIZE: f32 = 1.0;

/// One agent's frozen public state.
#[derive(Debug, Clone)]
pub struct SnapshotEntry {
    /// Stable identity of the captured agent.
    pub id: u32,
    /// Bounding box of the exposed geometry at capture time.
    pub aabb: AxisAlignedBoundingBox,
    /// Clone of the exposed geometry at capture time.
    pub geometry: Geometry,
}

/// A consistent, read-only view of every agent's exposed geometry.
pub struct NeighborSnapshot {
    /// Entries sorted by agent id.
    entries: Vec<SnapshotEntry>,
    /// Broad-phase index over entry centroids, built for large populations.
    grid: Option<CentroidGrid>,
    /// Largest AABB half-extent seen at build time; queries inflate their
    /// search box by this so centroid binning stays conservative.
    max_half_extent: f32,
}

impl NeighborSnapshot {
    /// Capture the exposed state of a whole population.
    pub fn build<'a>(agents: impl IntoIterator<Item = &'a dyn Agent>) -> Self {
        let mut entries: Vec<SnapshotEntry> = agents
            .into_iter()
            .map(|agent| SnapshotEntry {
                id: agent.id(),
                aabb: *agent.aabb(),
                geometry: agent.exposed_geometry().clone(),
            })
            .collect();
        entries.sort_by_key(|entry| entry.id);

        let max_half_extent = entries
            .iter()
            .map(|entry| entry.aabb.max_half_extent())
            .fold(0.0_f32, f32::max);

        let grid = if entries.len() >= GRID_BUILD_THRESHOLD {
            CentroidGrid::build(&entries)
        } else {
            None
        };

        Self {
            entries,
            grid,
            max_half_extent,
        }
    }

    /// Number of captured agents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no agents were captured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All captured entries, ascending by id.
    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    /// All entries other than the requester whose AABB lies within
    /// `radius` of the requester's `aabb` (componentwise overlap with
    /// margin `radius`).
    ///
    /// Results come back in ascending id order, so identical inputs yield
    /// identical output regardless of grid vs. scan path or thread count.
    pub fn nearby(
        &self,
        requester_id: u32,
        aabb: &AxisAlignedBoundingBox,
        radius: f32,
    ) -> Vec<&SnapshotEntry> {
        if aabb.is_empty() {
            return Vec::new();
        }

        match &self.grid {
            Some(grid) => {
                let inflate = radius + self.max_half_extent;
                let mut candidates = Vec::new();
                grid.candidates_in_box(
                    aabb.min_corner - Vec3::splat(inflate),
                    aabb.max_corner + Vec3::splat(inflate),
                    &mut candidates,
                );
                // Bin order is not id order; entries are sorted by id, so
                // sorting the indices restores it.
                candidates.sort_unstable();
                candidates
                    .into_iter()
                    .map(|i| &self.entries[i])
                    .filter(|entry| entry.id != requester_id && aabb.overlaps(&entry.aabb, radius))
                    .collect()
            }
            None => self
                .entries
                .iter()
                .filter(|entry| entry.id != requester_id && aabb.overlaps(&entry.aabb, radius))
                .collect(),
        }
    }
}

/// Uniform grid over entry centroids, prefix-sum layout: `cell_contents`
/// is one flat array, each bin owning the slice
/// `[cell_offsets[b] .. cell_offsets[b] + cell_counts[b]]`.
struct CentroidGrid {
    dims: UVec3,
    cell_size: f32,
    origin: Vec3,
    cell_offsets: Vec<usize>,
    cell_counts: Vec<usize>,
    cell_contents: Vec<usize>,
}

impl CentroidGrid {
    /// Bin every non-empty entry by its AABB centroid. Returns `None` when
    /// no entry has a usable bounding box.
    fn build(entries: &[SnapshotEntry]) -> Option<Self> {
        let mut bounds = AxisAlignedBoundingBox::new();
        for entry in entries {
            if !entry.aabb.is_empty() {
                bounds.expand_to_include(entry.aabb.centroid());
            }
        }
        if bounds.is_empty() {
            return None;
        }

        let extent = bounds.max_corner - bounds.min_corner;
        let cell_size = (extent.max_element() / GRID_DIM as f32).max(MIN_CELL_SIZE);
        let dims = UVec3::splat(GRID_DIM);
        let bin_count = (dims.x * dims.y * dims.z) as usize;

        let mut grid = Self {
            dims,
            cell_size,
            origin: bounds.min_corner,
            cell_offsets: vec![0; bin_count],
            cell_counts: vec![0; bin_count],
            cell_contents: vec![0; entries.len()],
        };

        // Count entries per bin.
        for entry in entries {
            if entry.aabb.is_empty() {
                continue;
            }
            let bin = grid.flat_index(grid.world_to_grid(entry.aabb.centroid()));
            grid.cell_counts[bin] += 1;
        }

        // Prefix-sum the counts into offsets.
        let mut offset = 0;
        for bin in 0..bin_count {
            grid.cell_offsets[bin] = offset;
            offset += grid.cell_counts[bin];
        }

        // Insert entry indices, reusing counts as per-bin cursors.
        for count in &mut grid.cell_counts {
            *count = 0;
        }
        for (index, entry) in entries.iter().enumerate() {
            if entry.aabb.is_empty() {
                continue;
            }
            let bin = grid.flat_index(grid.world_to_grid(entry.aabb.centroid()));
            grid.cell_contents[grid.cell_offsets[bin] + grid.cell_counts[bin]] = index;
            grid.cell_counts[bin] += 1;
        }

        Some(grid)
    }

    fn world_to_grid(&self, position: Vec3) -> IVec3 {
        let grid_pos = (position - self.origin) / self.cell_size;
        let max_coord = (self.dims.x - 1) as i32;
        IVec3::new(
            (grid_pos.x as i32).clamp(0, max_coord),
            (grid_pos.y as i32).clamp(0, max_coord),
            (grid_pos.z as i32).clamp(0, max_coord),
        )
    }

    fn flat_index(&self, coord: IVec3) -> usize {
        ((coord.x as u32 * self.dims.y + coord.y as u32) * self.dims.z + coord.z as u32) as usize
    }

    /// Collect the indices binned anywhere inside the world-space box
    /// `[min, max]`. Bins do not overlap, so indices come out unique.
    fn candidates_in_box(&self, min: Vec3, max: Vec3, out: &mut Vec<usize>) {
        let lo = self.world_to_grid(min);
        let hi = self.world_to_grid(max);
        for x in lo.x..=hi.x {
            for y in lo.y..=hi.y {
                for z in lo.z..=hi.z {
                    let bin = self.flat_index(IVec3::new(x, y, z));
                    let start = self.cell_offsets[bin];
                    let count = self.cell_counts[bin];
                    out.extend_from_slice(&self.cell_contents[start..start + count]);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::NucleusAgent;
    use crate::geometry::Spheres;
    use crate::simulation::config::SimulationConfig;

    fn population(count: usize, spacing: f32) -> Vec<NucleusAgent> {
        let config = SimulationConfig::default();
        (0..count)
            .map(|i| {
                // Deterministic scatter along a skewed line through space.
                let f = i as f32;
                let center = Vec3::new(f * spacing, (f * 7.0) % 31.0, (f * 13.0) % 17.0);
                NucleusAgent::new(
                    i as u32,
                    Spheres::from_spheres(&[(center, 4.0)]),
                    0.0,
                    0.1,
                    &config,
                )
            })
            .collect()
    }

    fn snapshot_of(agents: &[NucleusAgent]) -> NeighborSnapshot {
        NeighborSnapshot::build(agents.iter().map(|a| a as &dyn Agent))
    }

    #[test]
    fn requester_is_excluded_from_its_own_query() {
        let agents = population(3, 1.0);
        let snapshot = snapshot_of(&agents);

        let nearby = snapshot.nearby(0, agents[0].aabb(), 100.0);
        assert_eq!(nearby.len(), 2);
        assert!(nearby.iter().all(|entry| entry.id != 0));
    }

    #[test]
    fn results_come_back_in_ascending_id_order() {
        let agents = population(10, 2.0);
        let snapshot = snapshot_of(&agents);

        let nearby = snapshot.nearby(4, agents[4].aabb(), 100.0);
        let ids: Vec<u32> = nearby.iter().map(|entry| entry.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn grid_path_agrees_with_linear_scan() {
        // Enough agents to cross GRID_BUILD_THRESHOLD.
        let agents = population(100, 5.0);
        let snapshot = snapshot_of(&agents);
        assert!(snapshot.grid.is_some());

        let radius = 20.0;
        for agent in &agents {
            let via_grid: Vec<u32> = snapshot
                .nearby(agent.id(), agent.aabb(), radius)
                .iter()
                .map(|entry| entry.id)
                .collect();

            let brute_force: Vec<u32> = snapshot
                .entries()
                .iter()
                .filter(|entry| {
                    entry.id != agent.id() && agent.aabb().overlaps(&entry.aabb, radius)
                })
                .map(|entry| entry.id)
                .collect();

            assert_eq!(via_grid, brute_force, "disagreement for agent {}", agent.id());
        }
    }

    #[test]
    fn empty_aabb_requester_sees_nobody() {
        let agents = population(5, 1.0);
        let snapshot = snapshot_of(&agents);

        let empty = AxisAlignedBoundingBox::new();
        assert!(snapshot.nearby(99, &empty, 1000.0).is_empty());
    }
}

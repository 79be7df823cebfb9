use crate::geometry::{intersect_sphere, Aabb};
use crate::math::Ray;
use crate::sampler::Sampler;
use crate::scene::SphereObject;

/// A node in the flattened BVH arena. Children are referenced by index into
/// the owning `Bvh`'s node array rather than by `Box` — the whole tree lives
/// in one contiguous allocation (spec Design Note §9: "a contiguous node
/// array with 32-bit child indices ... avoids one pointer-chasing
/// indirection per tree level and keeps sibling nodes close in memory").
#[derive(Debug, Clone, Copy)]
pub enum BvhNode {
    Leaf { bbox: Aabb, object_index: u32 },
    Interior { bbox: Aabb, left: u32, right: u32 },
}

impl BvhNode {
    fn bbox(&self) -> Aabb {
        match *self {
            BvhNode::Leaf { bbox, .. } => bbox,
            BvhNode::Interior { bbox, .. } => bbox,
        }
    }
}

/// A bounding volume hierarchy over a world's spheres, built once per render
/// (object positions are frozen to their `[startTime, endTime]` sweep) and
/// traversed read-only by every worker thread afterwards.
#[derive(Debug, Clone)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    root: Option<u32>,
}

impl Bvh {
    /// Builds a BVH over `spheres` by recursively splitting on a randomly
    /// chosen axis at the median, per spec §4.3. Leaf bounding boxes are the
    /// time-swept box over `[start_time, end_time]`.
    pub fn build(
        spheres: &[SphereObject],
        start_time: f32,
        end_time: f32,
        sampler: &mut Sampler,
    ) -> Self {
        let mut nodes = Vec::with_capacity(spheres.len().max(1) * 2);
        if spheres.is_empty() {
            return Self { nodes, root: None };
        }
        let mut indices: Vec<u32> = (0..spheres.len() as u32).collect();
        let root = Self::build_recursive(&mut nodes, &mut indices, spheres, start_time, end_time, sampler);
        log::debug!(
            "built BVH over {} spheres into {} nodes",
            spheres.len(),
            nodes.len()
        );
        Self {
            nodes,
            root: Some(root),
        }
    }

    fn build_recursive(
        nodes: &mut Vec<BvhNode>,
        indices: &mut [u32],
        spheres: &[SphereObject],
        start_time: f32,
        end_time: f32,
        sampler: &mut Sampler,
    ) -> u32 {
        if indices.len() == 1 {
            let object_index = indices[0];
            let bbox = spheres[object_index as usize].bounding_box(start_time, end_time);
            nodes.push(BvhNode::Leaf { bbox, object_index });
            return (nodes.len() - 1) as u32;
        }

        let axis = (sampler.uniform01() * 3.0) as usize % 3;
        indices.sort_by(|&a, &b| {
            let ca = spheres[a as usize]
                .bounding_box(start_time, end_time)
                .center()[axis];
            let cb = spheres[b as usize]
                .bounding_box(start_time, end_time)
                .center()[axis];
            ca.partial_cmp(&cb).unwrap()
        });

        let mid = indices.len() / 2;
        let (left_half, right_half) = indices.split_at_mut(mid);
        let left = Self::build_recursive(nodes, left_half, spheres, start_time, end_time, sampler);
        let right = Self::build_recursive(nodes, right_half, spheres, start_time, end_time, sampler);
        let bbox = Aabb::union(&nodes[left as usize].bbox(), &nodes[right as usize].bbox());
        nodes.push(BvhNode::Interior { bbox, left, right });
        (nodes.len() - 1) as u32
    }

    /// Finds the closest sphere hit along `ray` within `[t_min, t_max]` at
    /// the given render `time`. Returns `(distance, index into spheres)`.
    pub fn intersect(
        &self,
        ray: &Ray,
        spheres: &[SphereObject],
        time: f32,
        t_min: f32,
        t_max: f32,
    ) -> Option<(f32, u32)> {
        let root = self.root?;
        let mut stack = vec![root];
        let mut closest = t_max;
        let mut best: Option<(f32, u32)> = None;

        while let Some(idx) = stack.pop() {
            match self.nodes[idx as usize] {
                BvhNode::Leaf { bbox, object_index } => {
                    if !bbox.hit(ray, t_min, closest) {
                        continue;
                    }
                    let sphere = spheres[object_index as usize].sphere_at(time);
                    if let Some(t) = intersect_sphere(ray, &sphere, t_min, closest) {
                        closest = t;
                        best = Some((t, object_index));
                    }
                }
                BvhNode::Interior { bbox, left, right } => {
                    if bbox.hit(ray, t_min, closest) {
                        stack.push(left);
                        stack.push(right);
                    }
                }
            }
        }
        best
    }
}

impl Default for Bvh {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }
}

//! Proximity links between nearby particles
//!
//! The scan is a plain O(n²) pass over all unordered pairs, fine for the
//! particle counts a page background uses (low hundreds at most).

use crate::particle::Particle;

/// A line between particles `a` and `b` (`a < b`) with its faded alpha
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub alpha: f32,
}

/// Linear falloff: 1 at distance 0, 0 at `line_distance`.
///
/// `None` when the pair is too far apart to be linked, or when
/// `line_distance` is not positive.
pub fn link_strength(distance: f32, line_distance: f32) -> Option<f32> {
    if line_distance <= 0.0 || distance >= line_distance {
        return None;
    }
    Some(1.0 - distance / line_distance)
}

/// Every pair closer than `line_distance`, with alpha scaled by `base_alpha`
pub fn proximity_links(particles: &[Particle], line_distance: f32, base_alpha: f32) -> Vec<Link> {
    let mut links = Vec::new();

    for (a, first) in particles.iter().enumerate() {
        for (offset, second) in particles[a + 1..].iter().enumerate() {
            let distance = first.position.distance(second.position);
            if let Some(strength) = link_strength(distance, line_distance) {
                links.push(Link {
                    a,
                    b: a + 1 + offset,
                    alpha: strength * base_alpha,
                });
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::TEAL;
    use glam::Vec2;

    fn dot(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.5, TEAL)
    }

    #[test]
    fn test_half_distance_gives_half_alpha() {
        let links = proximity_links(&[dot(0.0, 0.0), dot(50.0, 0.0)], 100.0, 0.2);

        assert_eq!(links.len(), 1);
        assert!((links[0].alpha - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_pairs_at_or_beyond_line_distance_are_not_linked() {
        let links = proximity_links(&[dot(0.0, 0.0), dot(100.0, 0.0), dot(0.0, 250.0)], 100.0, 0.2);
        assert!(links.is_empty());
    }

    #[test]
    fn test_each_unordered_pair_once() {
        let links = proximity_links(&[dot(0.0, 0.0), dot(10.0, 0.0), dot(0.0, 10.0)], 100.0, 1.0);

        let pairs: Vec<(usize, usize)> = links.iter().map(|l| (l.a, l.b)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_zero_line_distance_links_nothing() {
        assert_eq!(link_strength(0.0, 0.0), None);
        assert!(proximity_links(&[dot(0.0, 0.0), dot(0.0, 0.0)], 0.0, 0.2).is_empty());
    }

    #[test]
    fn test_coincident_particles_link_at_full_strength() {
        assert_eq!(link_strength(0.0, 120.0), Some(1.0));
    }
}

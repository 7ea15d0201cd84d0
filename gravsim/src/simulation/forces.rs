//! Pairwise force model for the n-body engine
//!
//! Defines the [`ForceModel`] trait and direct Newtonian gravity. The model
//! only answers "how strong is the pull between these two bodies"; the
//! integrator derives direction from the displacement vector.

use super::params::SingularPolicy;
use super::states::Body;

/// Result of evaluating one pair: the separation that was used and the
/// undirected force magnitude at that separation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    pub r: f64, // separation used for normalising the displacement
    pub f: f64, // force magnitude
}

/// Trait for pairwise interaction laws
///
/// Implementations must be symmetric in `p1` and `p2`. `None` means the pair
/// is singular and the interaction is undefined.
pub trait ForceModel: Send + Sync {
    fn interaction(&self, p1: &Body, p2: &Body) -> Option<Interaction>;

    /// Force magnitude only
    fn magnitude(&self, p1: &Body, p2: &Body) -> Option<f64> {
        self.interaction(p1, p2).map(|it| it.f)
    }
}

/// 2D Newtonian gravity, `f = G * m1 * m2 / r^2`, without softening
#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub singular: SingularPolicy, // coincident-body handling
}

impl NewtonianGravity {
    #[allow(non_snake_case)]
    pub fn new(G: f64, singular: SingularPolicy) -> Self {
        Self { G, singular }
    }
}

impl ForceModel for NewtonianGravity {
    fn interaction(&self, p1: &Body, p2: &Body) -> Option<Interaction> {
        // Displacement between the pair; sign does not matter here
        let d = p1.x - p2.x;

        // Squared separation r^2 = dx^2 + dy^2
        let r_s = d.x * d.x + d.y * d.y;

        let (r, r_s) = match self.singular {
            SingularPolicy::Fail => {
                if r_s == 0.0 {
                    return None;
                }
                (r_s.sqrt(), r_s)
            }
            SingularPolicy::Clamp { min_separation } => {
                // Floor the separation; the squared value follows the floor
                let r = r_s.sqrt().max(min_separation);
                if r == 0.0 {
                    return None;
                }
                (r, r * r)
            }
        };

        // m1 * m2 first so swapping the pair gives the same bits
        let f = self.G * (p1.m() * p2.m()) / r_s;
        Some(Interaction { r, f })
    }
}

//! Scroll-driven object rotation
//!
//! Every scroll event turns each entity by its `scroll_spin`, independently of
//! where the camera goes.

use moonscroll_core::World;
use moonscroll_input::ScrollSubscription;

/// Applies `scroll_spin` once per received scroll sample
pub struct ScrollSpinner {
    subscription: ScrollSubscription,
}

impl ScrollSpinner {
    pub fn new(subscription: ScrollSubscription) -> Self {
        Self { subscription }
    }

    /// Rotate the world for every sample received since the last call
    ///
    /// Returns the number of scroll events applied.
    pub fn on_scroll(&mut self, world: &mut World) -> usize {
        let events = self.subscription.drain().len();
        world.apply_scroll_spin(events);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moonscroll_core::{Entity, ShapeRef, ShapeTemplate};
    use moonscroll_input::ScrollStream;
    use moonscroll_math::Vec3;

    #[test]
    fn test_one_rotation_per_event() {
        let mut world = World::new();
        let moon = world.add_entity(
            Entity::new(ShapeRef::Owned(ShapeTemplate::sphere(1.0).create_shape()))
                .with_scroll_spin(Vec3::new(0.025, 0.025, 0.025)),
        );

        let mut stream = ScrollStream::new();
        let mut spinner = ScrollSpinner::new(stream.subscribe());
        for t in [0.0, -10.0, -20.0, -30.0] {
            stream.publish(t);
        }

        assert_eq!(spinner.on_scroll(&mut world), 4);
        let rotation = world.get_entity(moon).unwrap().transform.rotation;
        assert!((rotation - Vec3::splat(0.1)).length() < 1e-6);

        // Nothing new, nothing applied
        assert_eq!(spinner.on_scroll(&mut world), 0);
        let again = world.get_entity(moon).unwrap().transform.rotation;
        assert_eq!(again, rotation);
    }
}

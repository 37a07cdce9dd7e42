//! Firework shells
//!
//! A shell rises at constant speed from the bottom edge to its target
//! height, then bursts once into a ring of [`Particle`]s. Friction only
//! applies to particles; the rise is uniform.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::particle::Particle;
use super::state::SimEvent;
use crate::consts::*;
use crate::polar_offset;
use crate::renderer::{Color, Surface};

/// A launched firework and the particles it owns
#[derive(Debug, Clone, PartialEq)]
pub struct Firework {
    pub id: u32,
    pub pos: Vec2,
    /// Explodes on the first tick where `pos.y <= target_y`
    pub target_y: f32,
    pub speed: f32,
    pub angle: f32,
    pub exploded: bool,
    /// Live burst particles (empty until the explosion)
    pub particles: Vec<Particle>,
    /// Hue (degrees) shared by the marker dot and every particle
    pub hue: f32,
}

impl Firework {
    /// Create a shell at (`x`, `launch_y`) heading for `target_y`
    pub fn new<R: Rng + ?Sized>(id: u32, x: f32, launch_y: f32, target_y: f32, rng: &mut R) -> Self {
        Self {
            id,
            pos: Vec2::new(x, launch_y),
            target_y,
            speed: FIREWORK_SPEED,
            angle: FIREWORK_ANGLE,
            exploded: false,
            particles: Vec::new(),
            hue: rng.random_range(0.0..360.0),
        }
    }

    pub fn color(&self) -> Color {
        Color::vivid(self.hue)
    }

    /// Advance one tick.
    ///
    /// Returns the explosion event on the tick the shell bursts. Fresh
    /// particles get their first update on that same tick, and particles
    /// that faded out are dropped before returning.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<SimEvent> {
        let mut event = None;
        if !self.exploded {
            self.pos += polar_offset(self.speed, self.angle);
            if self.pos.y <= self.target_y {
                event = self.explode(rng);
            }
        }

        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(Particle::is_alive);

        event
    }

    /// Burst into particles. Only the first call has any effect.
    pub fn explode<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<SimEvent> {
        if self.exploded {
            return None;
        }
        self.exploded = true;

        let origin = self.pos;
        let color = self.color();
        let step = TAU / BURST_PARTICLES as f32;
        self.particles.extend((0..BURST_PARTICLES).map(|i| {
            let speed = rng.random_range(BURST_SPEED_MIN..BURST_SPEED_MAX);
            Particle::new(origin, color, speed, step * i as f32)
        }));

        Some(SimEvent::Exploded {
            id: self.id,
            pos: origin,
            hue: self.hue,
        })
    }

    /// Exploded and every particle has faded: ready to be pruned
    pub fn is_spent(&self) -> bool {
        self.exploded && self.particles.is_empty()
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if !self.exploded {
            surface.fill_circle(self.pos, FIREWORK_MARKER_RADIUS, self.color(), 1.0);
        }
        for particle in &self.particles {
            particle.draw(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn shell(rng: &mut Pcg32) -> Firework {
        Firework::new(1, 100.0, 600.0, 50.0, rng)
    }

    #[test]
    fn test_rise_is_uniform() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut fw = shell(&mut rng);
        for _ in 0..10 {
            fw.update(&mut rng);
        }
        assert!((fw.pos.y - 500.0).abs() < 1e-3);
        assert!((fw.pos.x - 100.0).abs() < 1e-3);
        assert!(!fw.exploded);
    }

    #[test]
    fn test_explodes_on_reaching_target() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut fw = shell(&mut rng);

        for _ in 0..54 {
            assert!(fw.update(&mut rng).is_none());
        }
        assert!(!fw.exploded, "Still rising at y={}", fw.pos.y);

        let event = fw.update(&mut rng);
        assert!(matches!(event, Some(SimEvent::Exploded { id: 1, .. })));
        assert!(fw.exploded);
        assert_eq!(fw.particles.len(), BURST_PARTICLES);
    }

    #[test]
    fn test_explode_runs_once() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut fw = shell(&mut rng);

        assert!(fw.explode(&mut rng).is_some());
        assert!(fw.explode(&mut rng).is_none());
        assert_eq!(fw.particles.len(), BURST_PARTICLES);

        for _ in 0..10 {
            assert!(fw.update(&mut rng).is_none());
        }
        assert_eq!(fw.particles.len(), BURST_PARTICLES);
    }

    #[test]
    fn test_burst_angles_and_speeds() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut fw = shell(&mut rng);
        fw.explode(&mut rng);

        let step = TAU / BURST_PARTICLES as f32;
        for pair in fw.particles.windows(2) {
            assert!((pair[1].angle - pair[0].angle - step).abs() < 1e-5);
        }
        assert_eq!(fw.particles[0].angle, 0.0);
        for p in &fw.particles {
            assert!(p.speed >= BURST_SPEED_MIN && p.speed < BURST_SPEED_MAX);
            assert_eq!(p.pos, fw.pos);
            assert_eq!(p.color, fw.color());
        }
    }

    #[test]
    fn test_spent_after_particles_fade() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut fw = shell(&mut rng);
        fw.explode(&mut rng);
        assert!(!fw.is_spent());

        for _ in 0..67 {
            fw.update(&mut rng);
        }
        assert!(fw.particles.is_empty());
        assert!(fw.is_spent());
    }

    #[test]
    fn test_draw_marker_only_before_burst() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut fw = shell(&mut rng);

        let mut surface = RecordingSurface::new();
        fw.draw(&mut surface);
        assert_eq!(surface.circle_count(), 1);

        fw.explode(&mut rng);
        let mut surface = RecordingSurface::new();
        fw.draw(&mut surface);
        assert_eq!(surface.circle_count(), BURST_PARTICLES);
    }
}

//! Fixed-capacity particle pool with Euler advection through a [`FieldKind`].
//!
//! Slots are never added or removed after construction. A slot is either
//! active (a live particle) or inactive (free for the next spawn). Spawning
//! takes the first inactive slot in index order and silently does nothing
//! when the pool is full.

use glam::Vec2;

use crate::error::FieldError;
use crate::field_kind::FieldKind;
use crate::geometry::GridGeometry;

/// One pool slot. `Default` is the zeroed, inactive slot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    /// Screen-space position in pixels.
    pub position: Vec2,
    /// Seconds since spawn.
    pub age: f32,
    /// Age at which the particle expires.
    pub life: f32,
    /// Whether the slot holds a live particle.
    pub active: bool,
}

impl Particle {
    /// Linear fade-out alpha: 255 at spawn, 0 at expiry.
    pub fn fade_alpha(&self) -> u8 {
        if self.life <= 0.0 {
            return 0;
        }
        let remaining = (1.0 - self.age / self.life).clamp(0.0, 1.0);
        (255.0 * remaining) as u8
    }
}

/// Fixed-capacity pool of particles.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    /// Creates a pool of `capacity` inactive slots.
    ///
    /// Returns `FieldError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, FieldError> {
        if capacity == 0 {
            return Err(FieldError::InvalidCapacity);
        }
        Ok(Self {
            particles: vec![Particle::default(); capacity],
        })
    }

    /// Number of slots, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    /// All slots, active or not, in index order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.active).count()
    }

    /// Whether every slot is live, so the next spawn is dropped.
    pub fn is_full(&self) -> bool {
        self.particles.iter().all(|p| p.active)
    }

    /// Active particles in index order.
    pub fn iter_active(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter().filter(|p| p.active)
    }

    /// Activates the first free slot at `position` with the given lifetime.
    ///
    /// Returns the slot index, or `None` if every slot is active (the pool
    /// is left untouched).
    pub fn spawn(&mut self, position: Vec2, life: f32) -> Option<usize> {
        let (index, slot) = self
            .particles
            .iter_mut()
            .enumerate()
            .find(|(_, p)| !p.active)?;
        *slot = Particle {
            position,
            age: 0.0,
            life,
            active: true,
        };
        Some(index)
    }

    /// Deactivates every slot.
    pub fn reset(&mut self) {
        self.particles.fill(Particle::default());
    }

    /// Ages and advects every active particle by one explicit Euler step.
    ///
    /// A particle is deactivated when its age reaches its life (before it
    /// moves) or when the step carries it outside `geometry`'s bounds. The
    /// field is evaluated analytically at the particle's own normalized
    /// position, not looked up in a sampled grid.
    pub fn update(&mut self, dt: f32, kind: FieldKind, geometry: &GridGeometry, speed: f32) {
        for p in self.particles.iter_mut().filter(|p| p.active) {
            p.age += dt;
            if p.age >= p.life {
                p.active = false;
                continue;
            }
            let force = kind.eval(geometry.screen_to_normalized(p.position));
            p.position += force * speed * dt;
            if !geometry.contains(p.position) {
                p.active = false;
            }
        }
    }
}

//! Scoring burst particles

use glam::Vec2;
use rand::Rng;

use super::state::Particle;
use crate::consts::{BURST_COUNT, PARTICLE_LIFE};
use crate::tuning::Tuning;

/// Burst color (gold)
pub const BURST_COLOR: [f32; 4] = [1.0, 0.843, 0.0, 1.0];

/// Emit a burst of particles around `origin`
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    origin: Vec2,
    tuning: &Tuning,
    rng: &mut impl Rng,
) {
    particles.reserve(BURST_COUNT);
    for _ in 0..BURST_COUNT {
        let x = origin.x + (rng.random::<f32>() - 0.5) * tuning.particle_spread;
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * tuning.particle_speed_x,
            -rng.random::<f32>() * tuning.particle_speed_y - tuning.particle_lift,
        );
        particles.push(Particle {
            pos: Vec2::new(x, origin.y),
            vel,
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
            alpha: 1.0,
            color: BURST_COLOR,
        });
    }
}

/// Age every particle by one tick and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>, gravity: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += gravity;
        particle.life = particle.life.saturating_sub(1);
        particle.alpha = particle.life as f32 / particle.max_life as f32;
    }
    particles.retain(|p| p.life > 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn burst(seed: u64) -> Vec<Particle> {
        let mut particles = Vec::new();
        let mut rng = Pcg32::seed_from_u64(seed);
        spawn_burst(
            &mut particles,
            Vec2::new(200.0, 300.0),
            &Tuning::default(),
            &mut rng,
        );
        particles
    }

    #[test]
    fn test_burst_shape() {
        let particles = burst(11);
        assert_eq!(particles.len(), 8);
        for p in &particles {
            assert!((p.pos.x - 200.0).abs() <= 10.0);
            assert_eq!(p.pos.y, 300.0);
            assert!(p.vel.x.abs() <= 2.0);
            assert!(p.vel.y <= -1.0 && p.vel.y >= -4.0, "upward bias");
            assert_eq!(p.life, 30);
            assert_eq!(p.alpha, 1.0);
        }
    }

    #[test]
    fn test_burst_expires_after_lifetime() {
        let mut particles = burst(5);
        for tick in 1..=40 {
            update_particles(&mut particles, 0.2);
            if tick < 30 {
                assert_eq!(particles.len(), 8, "tick {tick}");
            } else {
                assert!(particles.is_empty(), "tick {tick}");
            }
        }
    }

    #[test]
    fn test_alpha_fades_linearly_and_gravity_pulls_down() {
        let mut particles = burst(9);
        let vy0 = particles[0].vel.y;
        let y0 = particles[0].pos.y;

        update_particles(&mut particles, 0.2);
        let p = particles[0];
        assert_eq!(p.life, 29);
        assert!((p.alpha - 29.0 / 30.0).abs() < 1e-6);
        assert!((p.pos.y - (y0 + vy0)).abs() < 1e-4);
        assert!((p.vel.y - (vy0 + 0.2)).abs() < 1e-4);
    }
}

//! Floating particle field engine.
//!
//! # Responsibility
//! - Spawn particles with random size, colour and opacity.
//! - Float each particle from below the bottom edge to above the top edge,
//!   respawning it at a new random start/end pair forever.
//! - Push particles near the pointer outward with a short eased tween.
//!
//! # Invariants
//! - A field with zero particles performs no surface calls at all.
//! - After `unmount` no node created by this field stays live.

use crate::animation::random::{pick, uniform};
use crate::animation::timer::Timeout;
use crate::animation::tween::{Easing, Tween};
use crate::effects::surface::{NodeId, ParticleSurface, ParticleVisual, Point, Size};
use crate::effects::EffectConfigError;
use log::{info, warn};
use rand::Rng;

/// Pointer influence radius in surface units.
pub const MOUSE_RADIUS: f64 = 100.0;
/// Push distance at zero range.
pub const PUSH_STRENGTH: f64 = 2.0;
pub const PUSH_DURATION_MS: u64 = 300;
/// Spawn/despawn distance outside the vertical edges.
pub const EDGE_MARGIN: f64 = 10.0;

pub const DEFAULT_PARTICLE_COLORS: [&str; 5] =
    ["#00ffff", "#ff00ff", "#ffff00", "#00ff00", "#ff8000"];

/// Particle field parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleFieldConfig {
    pub particle_count: usize,
    pub colors: Vec<String>,
    pub size_range: (f64, f64),
    /// Flight duration bounds in milliseconds.
    pub speed_range_ms: (u64, u64),
    pub opacity_range: (f64, f64),
    pub mouse_interaction: bool,
    /// Each particle waits a random delay up to this before its first flight.
    pub max_start_delay_ms: u64,
}

impl Default for ParticleFieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 50,
            colors: DEFAULT_PARTICLE_COLORS
                .iter()
                .map(|color| color.to_string())
                .collect(),
            size_range: (2.0, 6.0),
            speed_range_ms: (20_000, 60_000),
            opacity_range: (0.3, 0.8),
            mouse_interaction: true,
            max_start_delay_ms: 5_000,
        }
    }
}

impl ParticleFieldConfig {
    pub fn validate(&self) -> Result<(), EffectConfigError> {
        if self.particle_count == 0 {
            return Ok(());
        }
        if self.colors.is_empty() {
            return Err(EffectConfigError::EmptyPalette);
        }
        let (min_size, max_size) = self.size_range;
        if !(min_size >= 0.0 && min_size <= max_size) {
            return Err(EffectConfigError::InvalidRange {
                field: "size_range",
                min: min_size,
                max: max_size,
            });
        }
        let (min_opacity, max_opacity) = self.opacity_range;
        if !(min_opacity >= 0.0 && min_opacity <= max_opacity && max_opacity <= 1.0) {
            return Err(EffectConfigError::InvalidRange {
                field: "opacity_range",
                min: min_opacity,
                max: max_opacity,
            });
        }
        let (min_speed, max_speed) = self.speed_range_ms;
        if min_speed == 0 || min_speed > max_speed {
            return Err(EffectConfigError::InvalidRange {
                field: "speed_range_ms",
                min: min_speed as f64,
                max: max_speed as f64,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Flight {
    start: Point,
    end: Point,
    start_ms: u64,
    duration_ms: u64,
}

impl Flight {
    fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }

    fn position_at(&self, now_ms: u64) -> Point {
        let tween_x = Tween::new(
            self.start.x,
            self.end.x,
            self.start_ms,
            self.duration_ms,
            Easing::Linear,
        );
        let tween_y = Tween::new(
            self.start.y,
            self.end.y,
            self.start_ms,
            self.duration_ms,
            Easing::Linear,
        );
        Point::new(tween_x.value_at(now_ms), tween_y.value_at(now_ms))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    /// Parked below the bottom edge until the start delay elapses.
    Waiting { start: Point, delay: Timeout },
    Flying(Flight),
}

#[derive(Debug, Clone, PartialEq)]
struct Particle {
    node: NodeId,
    visual: ParticleVisual,
    phase: Phase,
    push_x: Tween,
    push_y: Tween,
}

impl Particle {
    fn base_position(&self, now_ms: u64) -> Point {
        match &self.phase {
            Phase::Waiting { start, .. } => *start,
            Phase::Flying(flight) => flight.position_at(now_ms),
        }
    }

    /// Top-left corner including the pointer push offset.
    fn position(&self, now_ms: u64) -> Point {
        let base = self.base_position(now_ms);
        Point::new(
            base.x + self.push_x.value_at(now_ms),
            base.y + self.push_y.value_at(now_ms),
        )
    }

    fn center(&self, now_ms: u64) -> Point {
        let corner = self.position(now_ms);
        let half = self.visual.size / 2.0;
        Point::new(corner.x + half, corner.y + half)
    }
}

/// Self-driving particle animation bound to one surface.
#[derive(Debug)]
pub struct ParticleField {
    config: ParticleFieldConfig,
    bounds: Size,
    particles: Vec<Particle>,
    mounted: bool,
    respawns: u64,
}

impl ParticleField {
    /// Creates every particle on `surface` and schedules its first flight.
    ///
    /// # Errors
    /// - Returns `EffectConfigError` when `config` fails validation.
    pub fn mount<S, R>(
        config: ParticleFieldConfig,
        surface: &mut S,
        rng: &mut R,
        now_ms: u64,
    ) -> Result<Self, EffectConfigError>
    where
        S: ParticleSurface + ?Sized,
        R: Rng + ?Sized,
    {
        config.validate()?;
        let mut field = Self {
            bounds: Size::default(),
            particles: Vec::with_capacity(config.particle_count),
            mounted: true,
            respawns: 0,
            config,
        };
        if field.config.particle_count == 0 {
            return Ok(field);
        }

        field.bounds = surface.bounds();
        for _ in 0..field.config.particle_count {
            let visual = field.random_visual(rng);
            let start = field.spawn_point(rng);
            let node = surface.create_particle(&visual, start);
            let delay = uniform(rng, 0.0, field.config.max_start_delay_ms as f64) as u64;
            field.particles.push(Particle {
                node,
                visual,
                phase: Phase::Waiting {
                    start,
                    delay: Timeout::after(delay, now_ms),
                },
                push_x: Tween::hold(0.0, now_ms),
                push_y: Tween::hold(0.0, now_ms),
            });
        }
        info!(
            "event=effect_mount module=particles status=ok count={} width={} height={}",
            field.particles.len(),
            field.bounds.width,
            field.bounds.height
        );
        Ok(field)
    }

    /// Advances every particle to `now_ms` and moves its visual.
    pub fn update<S, R>(&mut self, now_ms: u64, surface: &mut S, rng: &mut R)
    where
        S: ParticleSurface + ?Sized,
        R: Rng + ?Sized,
    {
        if !self.mounted {
            return;
        }
        for index in 0..self.particles.len() {
            self.advance_phase(index, now_ms, rng);
            let particle = &self.particles[index];
            surface.move_particle(particle.node, particle.position(now_ms));
        }
    }

    /// Applies an outward impulse to particles within `MOUSE_RADIUS`.
    ///
    /// Returns how many particles were pushed.
    pub fn pointer_move(&mut self, pointer: Point, now_ms: u64) -> usize {
        if !self.mounted || !self.config.mouse_interaction {
            return 0;
        }
        let mut pushed = 0;
        for particle in &mut self.particles {
            let center = particle.center(now_ms);
            let distance = center.distance_to(pointer);
            if distance >= MOUSE_RADIUS {
                continue;
            }
            let force = (MOUSE_RADIUS - distance) / MOUSE_RADIUS;
            let angle = (center.y - pointer.y).atan2(center.x - pointer.x);
            let push_x = angle.cos() * force * PUSH_STRENGTH;
            let push_y = angle.sin() * force * PUSH_STRENGTH;

            let offset_x = particle.push_x.value_at(now_ms);
            let offset_y = particle.push_y.value_at(now_ms);
            particle.push_x = Tween::new(
                offset_x,
                offset_x + push_x,
                now_ms,
                PUSH_DURATION_MS,
                Easing::Power2Out,
            );
            particle.push_y = Tween::new(
                offset_y,
                offset_y + push_y,
                now_ms,
                PUSH_DURATION_MS,
                Easing::Power2Out,
            );
            pushed += 1;
        }
        pushed
    }

    /// Cancels every animation and removes every visual. Idempotent.
    pub fn unmount<S>(&mut self, surface: &mut S) -> usize
    where
        S: ParticleSurface + ?Sized,
    {
        if !self.mounted {
            return 0;
        }
        let removed = self.particles.len();
        for particle in self.particles.drain(..) {
            surface.destroy_particle(particle.node);
        }
        self.mounted = false;
        if removed > 0 {
            info!("event=effect_unmount module=particles status=ok removed={removed}");
        }
        removed
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Particles currently in flight (start delay elapsed).
    pub fn flying_count(&self) -> usize {
        self.particles
            .iter()
            .filter(|particle| matches!(particle.phase, Phase::Flying(_)))
            .count()
    }

    /// Completed flights that were recycled into new ones.
    pub fn respawns(&self) -> u64 {
        self.respawns
    }

    /// Top-left corners of every particle at `now_ms`.
    pub fn positions(&self, now_ms: u64) -> Vec<Point> {
        self.particles
            .iter()
            .map(|particle| particle.position(now_ms))
            .collect()
    }

    pub fn config(&self) -> &ParticleFieldConfig {
        &self.config
    }

    fn advance_phase<R: Rng + ?Sized>(&mut self, index: usize, now_ms: u64, rng: &mut R) {
        let mut phase = self.particles[index].phase.clone();
        let mut launched_at = None;
        if let Phase::Waiting { delay, .. } = &mut phase {
            if !delay.poll(now_ms) {
                return;
            }
            let due = delay.due_ms();
            phase = Phase::Flying(self.random_flight(rng, due));
            launched_at = Some(due);
        }
        if let Phase::Flying(flight) = &mut phase {
            // Chained from the previous end time so large clock jumps still
            // land on the right leg.
            while flight.end_ms() <= now_ms {
                *flight = self.random_flight(rng, flight.end_ms());
                launched_at = Some(flight.start_ms);
                self.respawns += 1;
            }
        }
        let particle = &mut self.particles[index];
        particle.phase = phase;
        // A new flight starts from its own spawn point, without the old push.
        if let Some(start_ms) = launched_at {
            particle.push_x = Tween::hold(0.0, start_ms);
            particle.push_y = Tween::hold(0.0, start_ms);
        }
    }

    fn random_visual<R: Rng + ?Sized>(&self, rng: &mut R) -> ParticleVisual {
        let (min_size, max_size) = self.config.size_range;
        let (min_opacity, max_opacity) = self.config.opacity_range;
        let size = uniform(rng, min_size, max_size);
        let color = pick(rng, &self.config.colors)
            .cloned()
            .unwrap_or_else(|| DEFAULT_PARTICLE_COLORS[0].to_string());
        ParticleVisual {
            size,
            color,
            opacity: uniform(rng, min_opacity, max_opacity),
            glow_radius: size * 2.0,
        }
    }

    fn spawn_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        Point::new(
            uniform(rng, 0.0, self.bounds.width),
            self.bounds.height + EDGE_MARGIN,
        )
    }

    fn random_flight<R: Rng + ?Sized>(&self, rng: &mut R, start_ms: u64) -> Flight {
        let (min_speed, max_speed) = self.config.speed_range_ms;
        let start = self.spawn_point(rng);
        let end = Point::new(uniform(rng, 0.0, self.bounds.width), -EDGE_MARGIN);
        let duration_ms = uniform(rng, min_speed as f64, max_speed as f64) as u64;
        Flight {
            start,
            end,
            start_ms,
            duration_ms: duration_ms.max(1),
        }
    }
}

impl Drop for ParticleField {
    fn drop(&mut self) {
        if self.mounted && !self.particles.is_empty() {
            warn!(
                "event=effect_leak module=particles status=error live={}",
                self.particles.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ParticleField, ParticleFieldConfig, MOUSE_RADIUS};
    use crate::animation::random::seeded_rng;
    use crate::effects::surface::{MemorySurface, Point, Size};
    use crate::effects::EffectConfigError;

    #[test]
    fn empty_palette_is_rejected_only_when_particles_exist() {
        let mut surface = MemorySurface::new(Size::new(10.0, 10.0));
        let mut rng = seeded_rng(5);
        let config = ParticleFieldConfig {
            colors: Vec::new(),
            ..ParticleFieldConfig::default()
        };
        let err = ParticleField::mount(config.clone(), &mut surface, &mut rng, 0)
            .expect_err("empty palette must fail");
        assert_eq!(err, EffectConfigError::EmptyPalette);

        let mut idle = ParticleField::mount(
            ParticleFieldConfig {
                particle_count: 0,
                ..config
            },
            &mut surface,
            &mut rng,
            0,
        )
        .expect("zero particles need no palette");
        idle.unmount(&mut surface);
    }

    #[test]
    fn pointer_far_away_pushes_nothing() {
        let mut surface = MemorySurface::new(Size::new(400.0, 300.0));
        let mut rng = seeded_rng(8);
        let mut field = ParticleField::mount(
            ParticleFieldConfig {
                particle_count: 10,
                ..ParticleFieldConfig::default()
            },
            &mut surface,
            &mut rng,
            0,
        )
        .expect("mount");

        let far = Point::new(-10.0 * MOUSE_RADIUS, -10.0 * MOUSE_RADIUS);
        assert_eq!(field.pointer_move(far, 0), 0);
        field.unmount(&mut surface);
    }
}

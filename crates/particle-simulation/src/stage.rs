//! Field lifecycles for a host with several drawing surfaces
//!
//! The stage owns every live field. Creating a field registers its input
//! listeners and requests its first frame. Stopping it removes both, and a
//! frame callback that was already queued for it turns into a no-op.

use std::collections::HashMap;
use std::time::Instant;

use particle_physics::{Bounds, FieldConfig, FieldOverrides};

use crate::canvas::Canvas;
use crate::field::{InputEvent, ParticleField};

/// What a stage needs from the platform hosting its surfaces
pub trait SurfaceHost {
    /// Displayed size of the surface called `surface_id`, `None` if it does not exist
    fn displayed_size(&self, surface_id: &str) -> Option<Bounds>;

    /// Ask for `surface_id` to be drawn on the next display refresh
    fn request_frame(&mut self, surface_id: &str);
}

/// Returned from [`Stage::create`]. Inert when the surface was missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldHandle {
    target: Option<(String, u64)>,
}

impl FieldHandle {
    fn inert() -> Self {
        Self { target: None }
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn surface_id(&self) -> Option<&str> {
        self.target.as_ref().map(|(id, _)| id.as_str())
    }
}

struct Entry {
    generation: u64,
    field: ParticleField,
}

#[derive(Default)]
pub struct Stage {
    entries: HashMap<String, Entry>,
    next_generation: u64,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a field to `surface_id` with the defaults merged under `overrides`.
    ///
    /// A missing surface is not an error: nothing is registered, no frame is
    /// requested and the returned handle is inert. A surface that exists but
    /// is too small gets a live field with no particles; `poll` fills it once
    /// the surface has room.
    pub fn create<H: SurfaceHost + ?Sized>(
        &mut self,
        host: &mut H,
        surface_id: &str,
        overrides: &FieldOverrides,
    ) -> FieldHandle {
        let Some(bounds) = host.displayed_size(surface_id) else {
            log::debug!("No surface named '{}', skipping particle field", surface_id);
            return FieldHandle::inert();
        };

        let config = FieldConfig::default().merged(overrides);
        self.insert(host, surface_id, ParticleField::new(config, bounds))
    }

    /// Register an already built field, replacing any field on the same surface
    pub fn insert<H: SurfaceHost + ?Sized>(
        &mut self,
        host: &mut H,
        surface_id: &str,
        field: ParticleField,
    ) -> FieldHandle {
        let generation = self.next_generation;
        self.next_generation += 1;

        log::info!(
            "✓ Particle field on '{}': {} particles, {}x{}",
            surface_id,
            field.particles().len(),
            field.bounds().width,
            field.bounds().height
        );

        if self
            .entries
            .insert(surface_id.to_owned(), Entry { generation, field })
            .is_some()
        {
            log::debug!("Replaced previous field on '{}'", surface_id);
        }

        host.request_frame(surface_id);
        FieldHandle {
            target: Some((surface_id.to_owned(), generation)),
        }
    }

    /// Tear a field down: its listeners are dropped and no further frames run.
    ///
    /// Stale handles (the surface has since been given a new field) and inert
    /// handles do nothing and return `false`.
    pub fn stop(&mut self, handle: &FieldHandle) -> bool {
        let Some((surface_id, generation)) = &handle.target else {
            return false;
        };

        let current = self
            .entries
            .get(surface_id)
            .is_some_and(|entry| entry.generation == *generation);
        if !current {
            return false;
        }

        self.entries.remove(surface_id);
        log::info!("Stopped particle field on '{}'", surface_id);
        true
    }

    /// Route an input notification to the field listening on `surface_id`.
    /// Returns whether the default gesture should be suppressed.
    pub fn dispatch(&mut self, surface_id: &str, event: InputEvent, now: Instant) -> bool {
        match self.entries.get_mut(surface_id) {
            Some(entry) => entry.field.handle_input(event, now),
            None => false,
        }
    }

    /// A window resize concerns every surface on the page
    pub fn window_resized(&mut self, now: Instant) {
        for entry in self.entries.values_mut() {
            entry.field.handle_input(InputEvent::Resized, now);
        }
    }

    /// Earliest moment a debounced resize becomes due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries
            .values()
            .filter_map(|entry| entry.field.resize_deadline())
            .min()
    }

    /// Apply every resize whose quiet window has elapsed, and populate fields
    /// created on a surface that was too small. Returns how many fields were
    /// rebuilt.
    pub fn poll<H: SurfaceHost + ?Sized>(&mut self, host: &mut H, now: Instant) -> usize {
        let mut rebuilt = 0;

        for (surface_id, entry) in &mut self.entries {
            let resize_due = entry.field.take_due_resize(now);
            if !resize_due && entry.field.is_populated() {
                continue;
            }

            match host.displayed_size(surface_id) {
                Some(bounds) if bounds.is_drawable() => {
                    entry.field.rebuild(bounds);
                    host.request_frame(surface_id);
                    rebuilt += 1;
                }
                _ if resize_due => {
                    log::debug!("Surface '{}' has no room, keeping current field", surface_id)
                }
                _ => {}
            }
        }

        rebuilt
    }

    /// Run one frame of the field on `surface_id` and schedule the next.
    /// Returns `false` if no field is live there (e.g. it was stopped while a
    /// frame was pending).
    pub fn frame<H, C>(&mut self, host: &mut H, surface_id: &str, canvas: &mut C) -> bool
    where
        H: SurfaceHost + ?Sized,
        C: Canvas + ?Sized,
    {
        let Some(entry) = self.entries.get_mut(surface_id) else {
            return false;
        };

        entry.field.frame(canvas);
        host.request_frame(surface_id);
        true
    }

    pub fn field(&self, surface_id: &str) -> Option<&ParticleField> {
        self.entries.get(surface_id).map(|entry| &entry.field)
    }

    pub fn field_mut(&mut self, surface_id: &str) -> Option<&mut ParticleField> {
        self.entries.get_mut(surface_id).map(|entry| &mut entry.field)
    }

    /// Whether input for `surface_id` reaches a field
    pub fn is_listening(&self, surface_id: &str) -> bool {
        self.entries.contains_key(surface_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

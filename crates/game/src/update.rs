//! Per-frame simulation: traveler orbit, camera follow, atmosphere blend,
//! sky regeneration and particle drift.
//!
//! Extracted from main.rs to keep the game loop modular and maintainable.

use procgen::generate_sky;

use crate::environment::{blend_atmosphere, blended_sky};
use crate::zone::sector_blend;
use crate::GameState;

/// Run one frame of simulation. Called from `GameState::update()`.
pub fn frame(state: &mut GameState, dt: f32) {
    let t = state.time.elapsed_seconds();

    // Traveler orbit: frame-rate damped speed, fixed-step angular integration.
    state
        .orbit
        .set_input(state.input.is_forward_held(), state.input.is_reverse_held());
    state.orbit.update(dt);
    let step = state.time.fixed_timestep_seconds();
    while state.time.should_fixed_update() {
        state.orbit.fixed_step(step);
    }
    let pose = state.orbit.pose(t);

    // Camera: drag/scroll offsets, then smooth chase toward the traveler.
    let drag = state.input.drag_delta();
    if drag.length_squared() > 0.0 {
        state.follow.apply_drag(drag, state.config.sensitivity);
    }
    let scroll = state.input.scroll_delta();
    if scroll != 0.0 {
        state.follow.apply_scroll(scroll);
    }
    state.follow.update(pose.position, pose.forward, t, dt);
    state.follow.apply_to(&mut state.camera);

    // Atmosphere cross-fade between the two zones the traveler is passing.
    let blend = sector_blend(state.orbit.theta_wrapped());
    state.atmosphere = blend_atmosphere(&blend, t);
    if state.sky_scheduler.poll(&blend, dt) {
        let texture = generate_sky(&blended_sky(&blend), state.config.seed);
        state.renderer.set_sky_texture(&texture);
    }

    state.compass.update(state.orbit.theta_wrapped(), dt);

    // Traveler model streams in on a worker thread; animation runs once ready.
    state.traveler.poll(state.renderer.device());
    state.traveler.advance_clip(dt);

    state.wind.update(dt);
    for field in &mut state.zone_fields {
        field.update(dt);
    }
}

#[cfg(test)]
mod tests {
    use crate::environment::blend_atmosphere;
    use crate::follow::FollowCamera;
    use crate::hud::Compass;
    use crate::orbit::OrbitSim;
    use crate::zone::sector_blend;
    use engine_core::Time;

    // Drives the GPU-free half of the frame loop for a simulated minute,
    // toggling the forward key, and checks nothing diverges.
    #[test]
    fn simulated_minute_keeps_every_system_in_bounds() {
        let mut time = Time::new();
        let mut orbit = OrbitSim::new();
        let mut follow = FollowCamera::new();
        let mut compass = Compass::new();

        let dt = 1.0 / 60.0;
        for frame in 0..3600 {
            time.advance(dt);
            let t = time.elapsed_seconds();

            orbit.set_input(frame % 600 < 300, false);
            orbit.update(dt);
            let step = time.fixed_timestep_seconds();
            while time.should_fixed_update() {
                orbit.fixed_step(step);
            }

            let pose = orbit.pose(t);
            assert!(pose.position.is_finite());
            follow.update(pose.position, pose.forward, t, dt);
            compass.update(orbit.theta_wrapped(), dt);

            let blend = sector_blend(orbit.theta_wrapped());
            assert!((0.0..=1.0).contains(&blend.t));
            let atmosphere = blend_atmosphere(&blend, t);
            assert!(atmosphere.uniform.fog[3] > 0.0);
        }

        assert!(follow.position().is_finite());
        assert!(follow.position().length() < 80.0);
        assert!(compass.needle_angle().is_finite());
    }
}

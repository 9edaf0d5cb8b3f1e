//! Rendering: all render passes (sky, island, landmarks, traveler,
//! particles, compass overlay).

use anyhow::Result;
use engine_core::{Bob, Mat4, Pulse, Quat, Spin, Transform, Vec3};
use renderer::{InstanceData, ParticleInstance};

use crate::island::fire_sector_emissive;
use crate::landmarks::{lagoon_center, lava_center, FloatingRock, LAVA_EMISSIVE};
use crate::traveler::Traveler;
use crate::zone::{nearest_zone, Zone};
use crate::GameState;

/// Lava surface brightness over time.
const LAVA_PULSE: Pulse = Pulse {
    base: 1.10,
    amplitude: 0.55,
    frequency: 3.8,
};
/// Fire sector ground glow over time.
const FIRE_GROUND_PULSE: Pulse = Pulse {
    base: 0.18,
    amplitude: 0.10,
    frequency: 2.0,
};

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Run all render passes. Called from `GameState::render()`.
pub fn run(state: &mut GameState) -> Result<()> {
    let (output, mut encoder) = state.renderer.begin_frame()?;
    let view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    let t = state.time.elapsed_seconds();

    state.renderer.update_camera(&state.camera);
    state.renderer.update_environment(&state.atmosphere.uniform);
    state
        .renderer
        .render_sky(&mut encoder, &view, state.atmosphere.clear_color);

    // Island body: terrain plate, underside, rim and road in one draw.
    let identity = InstanceData::new(Mat4::IDENTITY.to_cols_array_2d(), WHITE);
    state
        .renderer
        .render_instanced(&mut encoder, &view, &state.island.terrain, &[identity]);

    // Ground sectors. The Fire quarter's disc glows with a slow pulse.
    for zone in Zone::ALL {
        let instance = if zone == Zone::Fire {
            let glow = FIRE_GROUND_PULSE.at(t);
            let e = fire_sector_emissive();
            InstanceData::with_emissive(
                Mat4::IDENTITY.to_cols_array_2d(),
                WHITE,
                [e[0] * glow, e[1] * glow, e[2] * glow],
            )
        } else {
            identity
        };
        state.renderer.render_instanced(
            &mut encoder,
            &view,
            &state.island.sectors[zone.index()],
            &[instance],
        );
    }

    state.renderer.render_instanced(
        &mut encoder,
        &view,
        &state.landmarks.static_decor,
        &[identity],
    );

    // Lava pool: emissive pulse on top of the base color.
    let lava_glow = LAVA_PULSE.at(t);
    let lava = InstanceData::with_emissive(
        Mat4::from_translation(lava_center()).to_cols_array_2d(),
        WHITE,
        [
            LAVA_EMISSIVE[0] * lava_glow,
            LAVA_EMISSIVE[1] * lava_glow,
            LAVA_EMISSIVE[2] * lava_glow,
        ],
    );
    state
        .renderer
        .render_instanced(&mut encoder, &view, &state.landmarks.lava, &[lava]);

    // Lagoon: breathing opacity and a slight radial swell.
    let lagoon_alpha = 0.74 + (t * 2.2).sin() * 0.07;
    let lagoon_scale = 1.0 + (t * 2.6).sin() * 0.015;
    let lagoon = InstanceData::new(
        Mat4::from_scale_rotation_translation(
            Vec3::new(lagoon_scale, 1.0, lagoon_scale),
            Quat::IDENTITY,
            lagoon_center(),
        )
        .to_cols_array_2d(),
        [1.0, 1.0, 1.0, lagoon_alpha],
    );
    state
        .renderer
        .render_instanced(&mut encoder, &view, &state.landmarks.lagoon, &[lagoon]);

    // Air quarter floating rocks: bob and spin derived from elapsed time so
    // the entity transforms stay at their authored rest poses.
    let mut rock_instances = Vec::new();
    for (_, (transform, bob, spin, _)) in state
        .world
        .query::<(&Transform, &Bob, &Spin, &FloatingRock)>()
        .iter()
    {
        let lift = bob.amplitude * (t * bob.frequency + bob.phase).sin();
        let rotation = Quat::from_rotation_y(spin.yaw_rate * t)
            * Quat::from_rotation_x(spin.pitch_rate * t);
        let model = Mat4::from_scale_rotation_translation(
            transform.scale,
            rotation,
            transform.position + Vec3::Y * lift,
        );
        rock_instances.push(InstanceData::new(model.to_cols_array_2d(), WHITE));
    }
    state.renderer.render_instanced(
        &mut encoder,
        &view,
        &state.landmarks.floating_rock,
        &rock_instances,
    );

    // Traveler, once the model finished loading on the worker thread.
    if let Some(mesh) = state.traveler.mesh() {
        let pose = state.orbit.pose(t);
        let instance = InstanceData::new(Traveler::model_matrix(&pose).to_cols_array_2d(), WHITE);
        state
            .renderer
            .render_instanced(&mut encoder, &view, mesh, &[instance]);
    }

    // All five particle fields share one billboard pass.
    let mut particles: Vec<ParticleInstance> = Vec::new();
    state.wind.collect(&mut particles);
    for field in &state.zone_fields {
        field.collect(&mut particles);
    }
    state.renderer.render_particles(&mut encoder, &view, &particles);

    // Compass overlay with the needle easing toward the nearest quarter.
    let (width, height) = state.renderer.dimensions();
    let aspect = width as f32 / height.max(1) as f32;
    let active = nearest_zone(state.orbit.theta_wrapped());
    let mut overlay_vertices = Vec::new();
    let mut overlay_indices = Vec::new();
    state
        .compass
        .build_overlay(active, aspect, &mut overlay_vertices, &mut overlay_indices);
    state
        .renderer
        .render_overlay(&mut encoder, &view, &overlay_vertices, &overlay_indices);

    state.renderer.end_frame(output, encoder);
    Ok(())
}

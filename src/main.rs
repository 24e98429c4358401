mod scene;
mod wavefront;

use anyhow::Result;
use macroquad::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use wavegrid_viz::surface::to_texture;
use wavegrid_viz::{FrameStore, GridRenderer, Raster};

// Window configuration for the diagnostic viewer
fn window_conf() -> Conf {
    Conf {
        window_title: "Wavegrid Diagnostics".to_string(),
        window_width: 960,
        window_height: 720,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let frames = match build_frames() {
        Ok(frames) => frames,
        Err(e) => {
            error!("Failed to build diagnostic frames: {e:#}");
            return;
        }
    };
    info!("{} diagnostic views ready", frames.len());

    let views: Vec<(String, Texture2D)> = frames
        .iter()
        .map(|(title, image)| (title.clone(), to_texture(image)))
        .collect();

    let mut current = 0usize;
    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::Space) {
            current = (current + 1) % views.len();
        }
        if is_key_pressed(KeyCode::Left) {
            current = (current + views.len() - 1) % views.len();
        }

        clear_background(DARKGRAY);

        let (title, texture) = &views[current];
        let scale = ((screen_width() - 40.0) / texture.width())
            .min((screen_height() - 100.0) / texture.height());
        let dest = vec2(texture.width() * scale, texture.height() * scale);
        draw_texture_ex(
            texture,
            (screen_width() - dest.x) / 2.0,
            70.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(dest),
                ..Default::default()
            },
        );

        draw_text(title, 20.0, 30.0, 30.0, WHITE);
        draw_text(
            &format!(
                "{}/{}  Left/Right or Space to cycle, Esc to quit",
                current + 1,
                views.len()
            ),
            20.0,
            55.0,
            20.0,
            LIGHTGRAY,
        );

        next_frame().await
    }
}

/// Builds the grid, runs the wavefront, and renders every diagnostic
/// view into a frame store.
fn build_frames() -> Result<Vec<(String, Raster)>> {
    let settings = scene::Settings::load()?;
    let mut grid = scene::build_grid(&settings)?;

    let start = (settings.start[0], settings.start[1]);
    let goal = (settings.goal[0], settings.goal[1]);
    let alt_goal = (settings.alt_goal[0], settings.alt_goal[1]);

    let arrival = wavefront::propagate(&mut grid, start)?;
    let path = wavefront::extract_path(&arrival, settings.width, start, goal);
    let alt_path = wavefront::extract_path(&arrival, settings.width, start, alt_goal);

    let mut renderer =
        GridRenderer::new(FrameStore::new()).with_colormap(settings.colormap());
    let title = settings.title.as_str();

    renderer.occupancy_map(&grid, title)?;
    renderer.intensity_map(&grid, title)?;
    renderer.value_field(&grid, title)?;

    if let Some(path) = &path {
        renderer.occupancy_with_path(&grid, path, title)?;
        renderer.intensity_with_path(&grid, path, title)?;
        renderer.value_field_with_path(&grid, path, title)?;

        let mut paths = vec![path.clone()];
        match &alt_path {
            Some(alt) => paths.push(alt.clone()),
            None => warn!(?alt_goal, "Secondary goal unreachable, multi-path view shows one path"),
        }
        renderer.occupancy_with_paths(&grid, &paths, title)?;
    } else {
        warn!(?goal, "Goal unreachable from start, skipping path overlays");
    }

    Ok(renderer.into_surface().into_frames())
}

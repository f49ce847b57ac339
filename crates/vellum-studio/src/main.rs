use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use vellum_graphics::context::{ContextKey, Texture, TextureId, TextureRef};
use vellum_graphics::instructions::{
    BindTexture, CanvasDraw, Color, Drawable, LineWidth, PopMatrix, PopState, PushMatrix,
    PushState, Rotate, Scale, Translate,
};
use vellum_graphics::logging::{init_logging, LoggingConfig};
use vellum_graphics::Canvas;

/// Stand-in for an uploaded texture.
struct Atlas;

impl Texture for Atlas {
    fn id(&self) -> TextureId {
        TextureId(1)
    }

    fn bind(&self, unit: usize) {
        log::debug!("atlas bound on unit {unit}");
    }
}

/// Stand-in for geometry that reads the state established before it.
#[derive(Default)]
struct Sprite {
    draws: Cell<u32>,
}

impl Drawable for Sprite {
    fn draw(&self) {
        self.draws.set(self.draws.get() + 1);
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let sprite = Rc::new(Sprite::default());
    let mut canvas = Canvas::new();

    canvas.add(PushState::new([ContextKey::Color, ContextKey::LineWidth]));
    canvas.add(Color::from_rgb(0.9, 0.4, 0.1));
    canvas.add(LineWidth::new(2.0)?);
    canvas.add(BindTexture::new(Some(TextureRef::new(Atlas))));
    canvas.add(PushMatrix::new());
    let offset = canvas.add(Translate::new(100.0, 50.0, 0.0)?);
    let spin = canvas.add(Rotate::new(0.0, 0.0, 0.0, 1.0)?.with_origin([16.0, 16.0, 0.0])?);
    let zoom = canvas.add(Scale::new(1.0)?);
    canvas.add(CanvasDraw::new(sprite.clone()));
    canvas.add(PopMatrix::new());
    canvas.add(PopState::new([ContextKey::Color, ContextKey::LineWidth]));

    canvas.replay().context("initial replay")?;
    log::info!("{} instructions replayed, sprite drawn {} time(s)", canvas.len(), sprite.draws.get());

    // Authoring-time edits only flag the canvas; the next frame picks them up.
    for frame in 1..=4u32 {
        let angle = frame as f32 * 22.5;
        canvas
            .get_mut::<Rotate>(spin)
            .context("rotate instruction missing")?
            .set_angle(angle)?;
        if frame % 2 == 0 {
            canvas
                .get_mut::<Translate>(offset)
                .context("translate instruction missing")?
                .set_xy([100.0 + frame as f32 * 10.0, 50.0])?;
        }
        canvas
            .get_mut::<Scale>(zoom)
            .context("scale instruction missing")?
            .set_scale(1.0 + frame as f32 * 0.25)?;

        let redrawn = canvas.draw_if_needed().with_context(|| format!("frame {frame}"))?;
        log::info!(
            "frame {frame}: angle {angle:>5.1}, redrawn {redrawn}, updates so far {}",
            canvas.update_count()
        );
    }

    // Nothing changed: no replay.
    let redrawn = canvas.draw_if_needed()?;
    log::info!("idle frame: redrawn {redrawn}");

    let ctx = canvas.context();
    log::info!(
        "final state: color {:?}, line width {}, model-view balanced {}",
        ctx.color(),
        ctx.line_width(),
        ctx.model_view_matrix() == vellum_graphics::math::identity()
    );
    log::info!("sprite drawn {} time(s) in total", sprite.draws.get());

    Ok(())
}

//! A headless take on a small game loop: an animated slime with a bat next
//! to it, both scaled 4x, updated and drawn at a fixed 60 ticks per second.
//!
//! Logs frame stats at `info`. Set `RUST_LOG=debug` to also see the atlas
//! parser output.

use std::rc::Rc;

use anyhow::Context;
use nalgebra::{Point2, Vector2};
use pellet::prelude::*;

const ATLAS_DEFINITION: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/atlas-definition.yaml");
const TICKS: usize = 180;
const DELTA: Delta = Delta(1. / 60.);

struct Game {
    atlas: Atlas<ImageSize>,
    slime: AnimatedSprite,
    bat: AnimatedSprite,
}

impl Game {
    fn load() -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(ATLAS_DEFINITION)
            .with_context(|| format!("Unable to read {ATLAS_DEFINITION}"))?;
        let format = DefinitionFormat::from_extension(ATLAS_DEFINITION)?;
        let definition = AtlasDefinition::decode(&text, format)?;

        // No GPU here, the image only has to report its size
        let image = Rc::new(ImageSize(pellet::geometry::Size::new(512, 256)));
        let atlas = Atlas::parse(&definition, image)?;

        let mut slime = atlas.create_animated_sprite("slime-animation")?;
        slime.transform.scale = Vector2::new(4., 4.);

        let mut bat = atlas.create_animated_sprite("bat-animation")?;
        bat.transform.scale = Vector2::new(4., 4.);

        Ok(Self { atlas, slime, bat })
    }

    fn update(&mut self, delta: Delta) {
        self.slime.update_with(&self.atlas, *delta, |event| {
            if let PlaybackEvent::Looped = event {
                log::debug!("Slime looped");
            }
        });
        self.bat.update(&self.atlas, *delta);
    }

    fn draw<'a>(&'a self, queue: &mut DrawQueue<'a, ImageSize>) -> usize {
        let slime_width = self.slime.width(&self.atlas);

        queue.begin();
        self.slime.draw_at(&self.atlas, queue, Point2::new(1., 1.));
        // 10px to the right of the slime
        self.bat
            .draw_at(&self.atlas, queue, Point2::new(slime_width + 10., 0.));
        queue.end();

        queue.vertices().len()
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut game = Game::load()?;
    let mut stats = FrameStats::default();

    for _ in 0..TICKS {
        game.update(DELTA);

        let mut queue = DrawQueue::new(SortMode::Deferred);
        let vertices = game.draw(&mut queue);
        log::trace!("Drew {} commands, {vertices} vertices", queue.commands().len());

        stats.tick(DELTA);
    }

    log::info!(
        "Finished after {} ticks: slime on frame {}, bat on frame {}",
        *stats.frame,
        game.slime.frame_index(),
        game.bat.frame_index()
    );

    Ok(())
}

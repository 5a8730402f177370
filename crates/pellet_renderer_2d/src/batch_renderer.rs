use std::num::TryFromIntError;

use crate::sprite_renderer::{DrawCommand, DrawTarget, SpriteVertex};

/// Creates an index list rendering `quads` quads as two triangles each,
/// for vertices laid out the way [`DrawCommand::vertices`] produces them.
pub fn quad_indices<I>(quads: usize) -> Result<Vec<I>, TryFromIntError>
where
    I: TryFrom<usize, Error = TryFromIntError>,
{
    let mut array = Vec::<I>::with_capacity(quads * 6);
    for quad in 0..quads {
        let j = quad * 4;
        array.push(j.try_into()?);
        array.push((j + 1).try_into()?);
        array.push((j + 2).try_into()?);
        array.push(j.try_into()?);
        array.push((j + 2).try_into()?);
        array.push((j + 3).try_into()?);
    }

    Ok(array)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Keep commands in submission order.
    #[default]
    Deferred,
    /// Stable sort by depth when the batch ends, lower depth first.
    Depth,
}

/// Records draw commands between [`DrawQueue::begin`] and [`DrawQueue::end`].
///
/// The host owns the queue and replays the recorded commands into its
/// backend, usually batching consecutive commands that share an image.
#[derive(Debug)]
pub struct DrawQueue<'a, T> {
    commands: Vec<DrawCommand<'a, T>>,
    sort: SortMode,
    active: bool,
}

impl<T> Default for DrawQueue<'_, T> {
    fn default() -> Self {
        Self::new(SortMode::default())
    }
}

impl<'a, T> DrawQueue<'a, T> {
    pub fn new(sort: SortMode) -> Self {
        Self {
            commands: Vec::new(),
            sort,
            active: false,
        }
    }

    /// Starts a new batch, discarding the commands of the previous one.
    pub fn begin(&mut self) {
        if self.active {
            log::warn!(
                "DrawQueue::begin called twice without end, dropping {} commands",
                self.commands.len()
            );
        }
        self.commands.clear();
        self.active = true;
    }

    pub fn end(&mut self) -> &[DrawCommand<'a, T>] {
        if !self.active {
            log::warn!("DrawQueue::end called without begin");
        }
        self.active = false;

        if self.sort == SortMode::Depth {
            self.commands.sort_by(|a, b| a.depth.0.total_cmp(&b.depth.0));
        }

        &self.commands
    }

    /// Runs `f` inside a begin/end scope.
    pub fn batch(&mut self, f: impl FnOnce(&mut Self)) -> &[DrawCommand<'a, T>] {
        self.begin();
        f(self);
        self.end()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn commands(&self) -> &[DrawCommand<'a, T>] {
        &self.commands
    }

    /// Splits recorded commands into runs sharing the same image.
    pub fn runs(&self) -> Vec<&[DrawCommand<'a, T>]> {
        let mut runs = Vec::new();
        let mut start = 0;

        for i in 1..=self.commands.len() {
            let split = i == self.commands.len()
                || !std::ptr::eq(self.commands[i].image, self.commands[start].image);
            if split {
                runs.push(&self.commands[start..i]);
                start = i;
            }
        }

        runs
    }

    /// Expands every recorded command into four vertices.
    pub fn vertices(&self) -> Vec<SpriteVertex> {
        self.commands.iter().flat_map(|c| c.vertices()).collect()
    }
}

impl<'a, T> DrawTarget<'a, T> for DrawQueue<'a, T> {
    fn draw(&mut self, command: DrawCommand<'a, T>) {
        if !self.active {
            log::warn!("Draw command submitted outside of begin/end, ignoring");
            return;
        }
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgba;
    use pellet_geometry::{Box2D, Rect};
    use pellet_world_2d::{Depth, Flip, Transform};

    fn command(image: &u8, depth: f32) -> DrawCommand<'_, u8> {
        DrawCommand {
            image,
            source: Rect::new(0, 0, 8, 8),
            uv: Box2D::new([0., 0.], [1., 1.]),
            transform: Transform::default(),
            tint: Rgba::WHITE,
            flip: Flip::NONE,
            depth: Depth(depth),
        }
    }

    #[test]
    fn test_quad_indices() {
        let indices = quad_indices::<u16>(2).unwrap();
        assert_eq!(indices, [0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
        assert!(quad_indices::<u8>(65).is_err());
    }

    #[test]
    fn test_ignores_commands_outside_batch() {
        let image = 0u8;
        let mut queue = DrawQueue::default();
        queue.draw(command(&image, 0.));
        assert!(queue.commands().is_empty());

        let recorded = queue.batch(|q| q.draw(command(&image, 0.)));
        assert_eq!(recorded.len(), 1);
        assert!(!queue.is_active());
    }

    #[test]
    fn test_depth_sort_is_stable() {
        let (a, b) = (1u8, 2u8);
        let mut queue = DrawQueue::new(SortMode::Depth);

        let recorded = queue.batch(|q| {
            q.draw(command(&a, 0.9));
            q.draw(command(&b, 0.1));
            q.draw(command(&a, 0.1));
        });

        let order: Vec<_> = recorded.iter().map(|c| (*c.image, *c.depth)).collect();
        assert_eq!(order, [(2, 0.1), (1, 0.1), (1, 0.9)]);
    }

    #[test]
    fn test_runs_split_on_image_change() {
        let (a, b) = (1u8, 2u8);
        let mut queue = DrawQueue::default();
        queue.batch(|q| {
            q.draw(command(&a, 0.));
            q.draw(command(&a, 0.));
            q.draw(command(&b, 0.));
        });

        let runs: Vec<_> = queue.runs().iter().map(|r| r.len()).collect();
        assert_eq!(runs, [2, 1]);
        assert_eq!(queue.vertices().len(), 12);
    }
}

use std::rc::Rc;

use derive_more::From;
use pellet_geometry::Size;

/// An already decoded image owned by the host. The engine never touches pixels,
/// it only needs the dimensions to map pixel rectangles into texture space.
pub trait Image {
    fn size(&self) -> Size<u32>;
}

impl<I: Image + ?Sized> Image for Rc<I> {
    fn size(&self) -> Size<u32> {
        (**self).size()
    }
}

impl<I: Image + ?Sized> Image for &I {
    fn size(&self) -> Size<u32> {
        (**self).size()
    }
}

/// An image known only by its size. Useful for headless hosts and tools
/// which validate atlases without uploading anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub struct ImageSize(pub Size<u32>);

impl Image for ImageSize {
    fn size(&self) -> Size<u32> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_image_reports_size() {
        let image = Rc::new(ImageSize::from(Size::new(256, 128)));
        assert_eq!(image.size(), Size::new(256, 128));
        assert_eq!((&image).size(), Size::new(256, 128));
    }
}

//! Deterministic pixel-art avatars.
//!
//! A [`Seed`] drives a [`SeededStream`] which picks the colours, fills a
//! mirrored invader [`Grid`] and sprinkles detail over it. The grid is then
//! painted onto any [`Surface`].

pub mod grid;
pub mod palette;
pub mod raster;
pub mod render;
pub mod seed;
pub mod stream;
pub mod svg;

pub use grid::{generate, generate_silhouette, Avatar, Grid, GRID_SIZE};
pub use palette::{AvatarColors, Color, PALETTE};
pub use raster::PixelSurface;
pub use render::{render, Surface, SurfaceError, CANVAS_SIZE};
pub use seed::Seed;
pub use stream::SeededStream;
pub use svg::SvgSurface;

pub fn render_png(
    avatar: &Avatar,
    side: u32,
    background: Option<Color>,
) -> Result<Vec<u8>, SurfaceError> {
    let mut surface = PixelSurface::new(side)?.with_background(background);
    render(&mut surface, &avatar.grid);

    surface.encode_png()
}

pub fn render_svg(avatar: &Avatar, side: u32, background: Option<Color>) -> String {
    let mut surface = SvgSurface::new(side).with_background(background);
    render(&mut surface, &avatar.grid);

    surface.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_bytes() {
        let first = render_png(&generate(&Seed::from("default-user-seed")), 50, None).unwrap();
        let second = render_png(&generate(&Seed::from("default-user-seed")), 50, None).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_png_rejects_empty_surface() {
        let avatar = generate(&Seed::from(12345));

        assert!(matches!(
            render_png(&avatar, 0, None),
            Err(SurfaceError::Empty)
        ));
    }

    #[test]
    fn test_parallel_renders_match_sequential() {
        let seeds: Vec<Seed> = (0..32).map(|i| Seed::from(format!("conversation-{}", i))).collect();
        let sequential: Vec<String> = seeds
            .iter()
            .map(|seed| render_svg(&generate(seed), 50, None))
            .collect();

        let parallel: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = seeds
                .iter()
                .map(|seed| scope.spawn(move || render_svg(&generate(seed), 50, None)))
                .collect();

            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(sequential, parallel);
    }
}

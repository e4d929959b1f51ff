//! Component recoloring.
//!
//! The final pass of both algorithms: every pixel is rewritten with a
//! color chosen for its dense component index. Color choice is a
//! pluggable collaborator — the engine computes distances between
//! existing colors but never invents display colors itself.

use image::{Rgb, RgbImage};

/// Maps a dense component index to a display color.
///
/// Implementations must be deterministic (the same index always yields
/// the same color) and should keep small consecutive indices visually
/// distinct, since neighboring regions tend to receive neighboring
/// indices.
pub trait ColorScheme {
    /// The display color for component `index`.
    fn color_for(&self, index: usize) -> Rgb<u8>;
}

/// Progressive high-contrast palette.
///
/// The index bits are dealt round-robin to the red, green, and blue
/// channels, and each channel's counter is bit-reversed into a byte.
/// Successive counter values therefore land at 0, 128, 64, 192, ... —
/// each new index moves to the coarsest untouched subdivision of some
/// channel, so nearby indices sit far apart in RGB space. The first
/// 2^24 indices all map to distinct colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistinctColors;

impl ColorScheme for DistinctColors {
    fn color_for(&self, index: usize) -> Rgb<u8> {
        Rgb([
            channel_level(index, 0),
            channel_level(index, 1),
            channel_level(index, 2),
        ])
    }
}

/// Gather every third bit of `index`, starting at `offset`, and reverse
/// the resulting 8-bit counter.
fn channel_level(index: usize, offset: usize) -> u8 {
    let mut counter: u8 = 0;
    for bit in 0..8 {
        if index >> (3 * bit + offset) & 1 == 1 {
            counter |= 1 << bit;
        }
    }
    counter.reverse_bits()
}

/// Rewrite every pixel with the color of its component.
///
/// `labels` holds the dense component index per pixel in row-major
/// order. This is the only place the engine mutates the shared buffer.
///
/// # Panics
///
/// Panics if `labels` does not have exactly one entry per pixel.
pub fn apply(image: &mut RgbImage, labels: &[usize], scheme: &dyn ColorScheme) {
    assert_eq!(
        labels.len(),
        image.width() as usize * image.height() as usize,
        "labels must cover every pixel exactly once",
    );
    // `pixels_mut` iterates in row-major order, matching the labels.
    for (pixel, &label) in image.pixels_mut().zip(labels) {
        *pixel = scheme.color_for(label);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn distinct_colors_start_from_black() {
        let scheme = DistinctColors;
        assert_eq!(scheme.color_for(0), Rgb([0, 0, 0]));
        assert_eq!(scheme.color_for(1), Rgb([128, 0, 0]));
        assert_eq!(scheme.color_for(2), Rgb([0, 128, 0]));
        assert_eq!(scheme.color_for(4), Rgb([0, 0, 128]));
        assert_eq!(scheme.color_for(7), Rgb([128, 128, 128]));
    }

    #[test]
    fn successive_indices_subdivide_channels() {
        let scheme = DistinctColors;
        // The second round of red counters lands halfway between the
        // first round's values.
        assert_eq!(scheme.color_for(8), Rgb([64, 0, 0]));
        assert_eq!(scheme.color_for(9), Rgb([192, 0, 0]));
    }

    #[test]
    fn first_indices_are_pairwise_distinct() {
        let scheme = DistinctColors;
        let colors: HashSet<[u8; 3]> = (0..512).map(|i| scheme.color_for(i).0).collect();
        assert_eq!(colors.len(), 512);
    }

    #[test]
    fn color_for_is_deterministic() {
        let scheme = DistinctColors;
        for index in [0, 1, 25, 1000, 123_456] {
            assert_eq!(scheme.color_for(index), scheme.color_for(index));
        }
    }

    #[test]
    fn apply_writes_component_colors() {
        let scheme = DistinctColors;
        let mut image = RgbImage::new(2, 2);
        apply(&mut image, &[0, 1, 1, 0], &scheme);
        assert_eq!(*image.get_pixel(0, 0), scheme.color_for(0));
        assert_eq!(*image.get_pixel(1, 0), scheme.color_for(1));
        assert_eq!(*image.get_pixel(0, 1), scheme.color_for(1));
        assert_eq!(*image.get_pixel(1, 1), scheme.color_for(0));
    }

    #[test]
    #[should_panic(expected = "every pixel")]
    fn apply_rejects_mismatched_labels() {
        let mut image = RgbImage::new(2, 2);
        apply(&mut image, &[0, 1], &DistinctColors);
    }

    #[test]
    fn custom_schemes_plug_in() {
        struct Inverted;
        impl ColorScheme for Inverted {
            fn color_for(&self, index: usize) -> Rgb<u8> {
                let level = u8::try_from(index % 256).unwrap();
                Rgb([255 - level, 255 - level, 255 - level])
            }
        }

        let mut image = RgbImage::new(1, 2);
        apply(&mut image, &[0, 1], &Inverted);
        assert_eq!(*image.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*image.get_pixel(0, 1), Rgb([254, 254, 254]));
    }
}

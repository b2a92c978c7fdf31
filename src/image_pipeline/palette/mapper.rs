use crate::image_pipeline::frame::{COLOR_CHANNELS, ColorFrame, DisplayFrame8};
use crate::image_pipeline::palette::tables::{PaletteKind, PaletteTable, palette_table};

/// The mutable part of palette state: which table, and whether luma is inverted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaletteSelection {
    index: usize,
    inverted: bool,
}

impl PaletteSelection {
    /// Out-of-range indices wrap around the palette list.
    pub fn new(index: usize, inverted: bool) -> Self {
        Self {
            index: index % PaletteKind::ALL.len(),
            inverted,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> PaletteKind {
        PaletteKind::ALL[self.index]
    }

    pub fn table(&self) -> &'static PaletteTable {
        palette_table(self.kind())
    }

    pub fn inverted(&self) -> bool {
        self.inverted
    }

    /// Advances to the next palette, wrapping after the last.
    pub fn cycle(&mut self) -> PaletteKind {
        self.index = (self.index + 1) % PaletteKind::ALL.len();
        self.kind()
    }

    pub fn toggle_invert(&mut self) -> bool {
        self.inverted = !self.inverted;
        self.inverted
    }
}

/// Converts 8-bit luma to false color.
#[derive(Debug, Default, Clone, Copy)]
pub struct PaletteMapper;

impl PaletteMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn map(&self, frame: &DisplayFrame8, selection: &PaletteSelection) -> ColorFrame {
        let invert = selection.inverted();
        let luma = frame
            .as_slice()
            .iter()
            .map(move |&v| if invert { 255 - v } else { v });

        let mut rgb = Vec::with_capacity(frame.len() * COLOR_CHANNELS);
        match selection.kind() {
            PaletteKind::Grayscale => {
                for v in luma {
                    rgb.extend_from_slice(&[v, v, v]);
                }
            }
            _ => {
                let table = selection.table();
                for v in luma {
                    rgb.extend_from_slice(&table.lookup(v));
                }
            }
        }
        ColorFrame::with_plane_geometry(frame, rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> DisplayFrame8 {
        DisplayFrame8::new(16, 16, (0..=255u8).collect()).unwrap()
    }

    #[test]
    fn grayscale_replicates_luma() {
        let frame = gradient();
        let color = PaletteMapper::new().map(&frame, &PaletteSelection::default());
        assert_eq!(color.pixel(3, 2), Some([35, 35, 35]));
    }

    #[test]
    fn inversion_flips_luma_before_lookup() {
        let frame = gradient();
        let selection = PaletteSelection::new(0, true);
        let color = PaletteMapper::new().map(&frame, &selection);
        assert_eq!(color.pixel(0, 0), Some([255, 255, 255]));
        assert_eq!(color.pixel(15, 15), Some([0, 0, 0]));
    }

    #[test]
    fn double_inversion_restores_output() {
        let frame = gradient();
        let mapper = PaletteMapper::new();
        for index in 0..PaletteKind::ALL.len() {
            let mut selection = PaletteSelection::new(index, false);
            let original = mapper.map(&frame, &selection);
            selection.toggle_invert();
            let inverted = mapper.map(&frame, &selection);
            selection.toggle_invert();
            assert_eq!(mapper.map(&frame, &selection), original);
            if index > 0 {
                assert_ne!(inverted, original);
            }
        }
    }

    #[test]
    fn color_palettes_use_their_table() {
        let frame = gradient();
        let selection = PaletteSelection::new(PaletteKind::Turbo.index(), false);
        let color = PaletteMapper::new().map(&frame, &selection);
        let table = palette_table(PaletteKind::Turbo);
        assert_eq!(color.pixel(10, 4), Some(table.lookup(74)));
    }

    #[test]
    fn cycle_wraps_and_leaves_inversion_alone() {
        let mut selection = PaletteSelection::new(PaletteKind::ALL.len() - 1, true);
        assert_eq!(selection.cycle(), PaletteKind::Grayscale);
        assert!(selection.inverted());
        assert_eq!(PaletteSelection::new(12, false).index(), 2);
    }
}

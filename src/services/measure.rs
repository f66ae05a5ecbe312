//! Intrinsic content measurement
//!
//! The sizer never measures text itself: cells carry a width computed once,
//! when the document is loaded, by a `TextMeasure` implementation.

use unicode_width::UnicodeWidthStr;

/// Measures the intrinsic width of cell content in pixels
pub trait TextMeasure {
    fn measure(&self, text: &str) -> u32;
}

/// Terminal measurement: widest line's display width times the cell size
#[derive(Debug, Clone, Copy)]
pub struct CellMeasure {
    pub cell_px: u32,
}

impl CellMeasure {
    pub fn new(cell_px: u32) -> Self {
        Self {
            cell_px: cell_px.max(1),
        }
    }
}

impl TextMeasure for CellMeasure {
    fn measure(&self, text: &str) -> u32 {
        let widest = text.lines().map(|line| line.width()).max().unwrap_or(0);
        u32::try_from(widest)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.cell_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_uses_widest_line() {
        let measure = CellMeasure::new(8);
        assert_eq!(measure.measure("ID"), 16);
        assert_eq!(measure.measure("short\na longer line"), 13 * 8);
        assert_eq!(measure.measure(""), 0);
    }

    #[test]
    fn test_measure_counts_display_width() {
        let measure = CellMeasure::new(10);
        // "≤" is narrow, CJK characters take two cells
        assert_eq!(measure.measure("≤14 days"), 80);
        assert_eq!(measure.measure("表格"), 40);
    }

    #[test]
    fn test_zero_cell_size_is_raised_to_one() {
        let measure = CellMeasure::new(0);
        assert_eq!(measure.measure("abc"), 3);
    }
}

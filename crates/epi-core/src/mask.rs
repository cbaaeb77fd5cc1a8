/// A binarised raster: `true` pixels are foreground.
///
/// Row-major, y down, pixel `(x, y)` covers `[x, x+1) x [y, y+1)`.
/// Reads outside the raster are background, so tracers never need bounds
/// checks of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, data: vec![false; width * height] }
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self { width, height, data }
    }

    /// Wrap a row-major buffer. Returns `None` if the length does not match.
    pub fn from_raw(width: usize, height: usize, data: Vec<bool>) -> Option<Self> {
        (data.len() == width * height).then_some(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.data[y as usize * self.width + x as usize]
    }

    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = on;
        }
    }

    pub fn count_on(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    pub fn is_blank(&self) -> bool {
        !self.data.iter().any(|&b| b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_is_background() {
        let mask = Mask::from_fn(3, 3, |_, _| true);
        assert!(mask.get(0, 0));
        assert!(!mask.get(-1, 0));
        assert!(!mask.get(3, 1));
        assert!(!mask.get(1, 3));
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(Mask::from_raw(2, 2, vec![true; 3]).is_none());
        assert!(Mask::from_raw(2, 2, vec![true; 4]).is_some());
    }

    #[test]
    fn test_blank() {
        assert!(Mask::new(4, 4).is_blank());
        let mut mask = Mask::new(4, 4);
        mask.set(1, 2, true);
        assert!(!mask.is_blank());
        assert_eq!(mask.count_on(), 1);
    }
}

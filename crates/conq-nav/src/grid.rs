use conq_core::{AiError, AiResult};

#[cfg(feature = "serde")]
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

/// Integer grid coordinate. Orders lexicographically by `x`, then `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: GridCell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Von Neumann neighbourhood in a fixed order: E, W, S, N.
    pub fn neighbors(self) -> [GridCell; 4] {
        [
            GridCell::new(self.x + 1, self.y),
            GridCell::new(self.x - 1, self.y),
            GridCell::new(self.x, self.y + 1),
            GridCell::new(self.x, self.y - 1),
        ]
    }
}

impl From<(i32, i32)> for GridCell {
    fn from((x, y): (i32, i32)) -> Self {
        GridCell::new(x, y)
    }
}

impl From<GridCell> for (i32, i32) {
    fn from(cell: GridCell) -> Self {
        (cell.x, cell.y)
    }
}

/// Rectangular walkability map. `x` indexes columns, `y` indexes rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

impl Grid {
    /// A fully walkable grid.
    pub fn open(width: u32, height: u32) -> AiResult<Self> {
        if width == 0 || height == 0 {
            return Err(AiError::EmptyGrid);
        }
        let width = i32::try_from(width)
            .map_err(|_| AiError::InvalidConfig(format!("grid width {width} too large")))?;
        let height = i32::try_from(height)
            .map_err(|_| AiError::InvalidConfig(format!("grid height {height} too large")))?;
        Ok(Self {
            width,
            height,
            blocked: vec![false; width as usize * height as usize],
        })
    }

    /// Build from occupancy rows: `0` is walkable, anything else is blocked.
    ///
    /// Every row must have the same number of columns.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> AiResult<Self> {
        let expected = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut grid = Self::open(expected as u32, rows.len() as u32)?;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != expected {
                return Err(AiError::RaggedGrid {
                    row: y,
                    expected,
                    found: row.len(),
                });
            }
            for (x, &v) in row.iter().enumerate() {
                grid.set_blocked(GridCell::new(x as i32, y as i32), v != 0);
            }
        }
        Ok(grid)
    }

    /// Build from text rows: `#` is blocked, any other character is walkable.
    ///
    /// Blank lines and surrounding whitespace are ignored.
    pub fn from_ascii(text: &str) -> AiResult<Self> {
        let rows: Vec<Vec<u8>> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().map(|c| u8::from(c == '#')).collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// Render back to the `from_ascii` format (`.` walkable, `#` blocked).
    pub fn to_ascii_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| {
                        if self.blocked[self.raw_idx(x, y)] {
                            '#'
                        } else {
                            '.'
                        }
                    })
                    .collect()
            })
            .collect()
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn in_bounds(&self, cell: GridCell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    /// Out-of-bounds cells are never walkable.
    pub fn is_walkable(&self, cell: GridCell) -> bool {
        self.idx(cell).map(|idx| !self.blocked[idx]).unwrap_or(false)
    }

    /// Out-of-bounds writes are ignored.
    pub fn set_blocked(&mut self, cell: GridCell, blocked: bool) {
        if let Some(idx) = self.idx(cell) {
            self.blocked[idx] = blocked;
        }
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|b| **b).count()
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.blocked.len()
    }

    pub(crate) fn idx(&self, cell: GridCell) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(self.raw_idx(cell.x, cell.y))
    }

    pub(crate) fn cell_from_idx(&self, idx: usize) -> GridCell {
        let idx = idx as i32;
        GridCell::new(idx % self.width, idx / self.width)
    }

    pub(crate) fn blocked_at(&self, idx: usize) -> bool {
        self.blocked[idx]
    }

    fn raw_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct GridSerde {
    rows: Vec<String>,
}

#[cfg(feature = "serde")]
impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        GridSerde {
            rows: self.to_ascii_rows(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = GridSerde::deserialize(deserializer)?;
        Grid::from_ascii(&data.rows.join("\n")).map_err(D::Error::custom)
    }
}

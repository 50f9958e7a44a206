use serde::{Deserialize, Serialize};

/// Identifier of a palette color, unique within one pattern.
pub type ColorId = u32;

/// One bubble on the grid.
///
/// Serializes as `null` or the bare color id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<ColorId>", into = "Option<ColorId>")]
pub enum Cell {
    #[default]
    Empty,
    Colored(ColorId),
}

impl Cell {
    pub fn color_id(self) -> Option<ColorId> {
        match self {
            Cell::Empty => None,
            Cell::Colored(id) => Some(id),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Option<ColorId>> for Cell {
    fn from(value: Option<ColorId>) -> Self {
        value.map_or(Cell::Empty, Cell::Colored)
    }
}

impl From<Cell> for Option<ColorId> {
    fn from(cell: Cell) -> Self {
        cell.color_id()
    }
}

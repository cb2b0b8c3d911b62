use labelkit_core::{Rect, Size};
use serde::{Deserialize, Serialize};

use super::{ElementKind, LabelShape, PenStyle, ShapeGeometry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub row: usize,
    pub column: usize,
    pub text: String,
}

/// Column widths and row heights of a table, without its cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableStructure {
    pub columns: Vec<f64>,
    pub rows: Vec<f64>,
}

/// Grid of cells. Column widths and row heights are absolute and add up to
/// the table size. Cells outside the current grid are kept so shrinking and
/// regrowing the grid does not lose their text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelTable {
    pub size: Size,
    pub columns: Vec<f64>,
    pub rows: Vec<f64>,
    pub cells: Vec<TableCell>,
    pub pen: PenStyle,
}

impl LabelTable {
    pub fn new(rows: usize, columns: usize, size: Size) -> Self {
        let rows = rows.max(1);
        let columns = columns.max(1);
        Self {
            size,
            columns: vec![size.width / columns as f64; columns],
            rows: vec![size.height / rows as f64; rows],
            cells: Vec::new(),
            pen: PenStyle::default(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn structure(&self) -> TableStructure {
        TableStructure {
            columns: self.columns.clone(),
            rows: self.rows.clone(),
        }
    }

    /// Replace the track sizes; the table size follows their sums.
    pub fn set_structure(&mut self, columns: Vec<f64>, rows: Vec<f64>) {
        self.size = Size::new(columns.iter().sum(), rows.iter().sum());
        self.columns = columns;
        self.rows = rows;
    }

    pub fn cell_text(&self, row: usize, column: usize) -> Option<&str> {
        self.cells
            .iter()
            .find(|c| c.row == row && c.column == column)
            .map(|c| c.text.as_str())
    }

    pub fn set_cell_text(&mut self, row: usize, column: usize, text: impl Into<String>) {
        let text = text.into();
        match self
            .cells
            .iter_mut()
            .find(|c| c.row == row && c.column == column)
        {
            Some(cell) => cell.text = text,
            None => self.cells.push(TableCell { row, column, text }),
        }
    }
}

fn scale_tracks(tracks: &mut [f64], total: f64) {
    let current: f64 = tracks.iter().sum();
    if current > 0.0 {
        let factor = total / current;
        tracks.iter_mut().for_each(|t| *t *= factor);
    }
}

impl LabelShape for LabelTable {
    fn kind(&self) -> ElementKind {
        ElementKind::Table
    }

    fn content_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.size.width, self.size.height)
    }

    fn geometry(&self) -> ShapeGeometry {
        ShapeGeometry::Grid {
            size: self.size,
            columns: self.columns.clone(),
            rows: self.rows.clone(),
        }
    }

    fn set_geometry(&mut self, geometry: &ShapeGeometry) -> bool {
        match geometry {
            ShapeGeometry::Grid {
                size,
                columns,
                rows,
            } => {
                self.size = *size;
                self.columns = columns.clone();
                self.rows = rows.clone();
                true
            }
            _ => false,
        }
    }

    fn resize(&mut self, size: Size) {
        scale_tracks(&mut self.columns, size.width);
        scale_tracks(&mut self.rows, size.height);
        self.size = size;
    }

    fn pen(&self) -> Option<&PenStyle> {
        Some(&self.pen)
    }

    fn pen_mut(&mut self) -> Option<&mut PenStyle> {
        Some(&mut self.pen)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowIndex(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnIndex(pub usize);

// World scale quantities for the wall segment translation. The grid itself
// is unit agnostic, the consumer decides how big a cell is.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct CellWidth(pub f64);
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct CellHeight(pub f64);
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct WallThickness(pub f64);

use labelkit_layout::{GridSpec, LabelPosition, PageSpec, ResolvedGrid};

fn scenario_grid() -> ResolvedGrid {
    GridSpec::from_dimensions(60.0, 40.0, 5.0, 5.0)
        .resolve(&PageSpec::a4(10.0))
        .unwrap()
        .grid
}

#[test]
fn test_first_label() {
    let grid = scenario_grid();
    assert_eq!(
        grid.position_of(0),
        LabelPosition {
            page: 0,
            row: 0,
            column: 0,
            x_mm: 10.0,
            y_mm: 10.0
        }
    );
}

#[test]
fn test_second_row() {
    let grid = scenario_grid();
    let pos = grid.position_of(3);
    assert_eq!((pos.page, pos.row, pos.column), (0, 1, 0));
    assert_eq!((pos.x_mm, pos.y_mm), (10.0, 55.0));
}

#[test]
fn test_next_page_restarts() {
    let grid = scenario_grid();
    let pos = grid.position_of(18);
    assert_eq!((pos.page, pos.row, pos.column), (1, 0, 0));
    assert_eq!((pos.x_mm, pos.y_mm), (10.0, 10.0));
}

#[test]
fn test_last_cell_on_page() {
    let grid = scenario_grid();
    let pos = grid.position_of(17);
    assert_eq!((pos.page, pos.row, pos.column), (0, 5, 2));
    assert_eq!(pos.x_mm, 140.0);
    assert_eq!(pos.y_mm, 235.0);
}

#[test]
fn test_page_boundary() {
    let grid = scenario_grid();
    let lpp = grid.labels_per_page();
    assert_eq!(grid.page_of(lpp - 1), 0);
    assert_eq!(grid.page_of(lpp), 1);
}

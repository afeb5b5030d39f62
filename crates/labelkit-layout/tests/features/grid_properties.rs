use labelkit_layout::{GridSpec, PageSpec};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_grid_inverse_never_shrinks_cells(
        width in 5.0f64..180.0,
        height in 5.0f64..250.0,
        gap_h in 0.0f64..10.0,
        gap_v in 0.0f64..10.0,
        margin in 0.0f64..20.0,
    ) {
        let page = PageSpec::a4(margin);
        let forward = GridSpec::from_dimensions(width, height, gap_h, gap_v)
            .resolve(&page);
        prop_assume!(forward.is_ok());
        let forward = forward.unwrap().grid;

        let back = GridSpec::from_counts(
            forward.labels_per_row,
            forward.labels_per_column,
            gap_h,
            gap_v,
        )
        .resolve(&page)
        .unwrap()
        .grid;

        prop_assert!(back.label_width_mm >= width - 1e-9);
        prop_assert!(back.label_height_mm >= height - 1e-9);
    }

    #[test]
    fn prop_column_cycles_with_row_length(
        per_row in 1u32..8,
        per_column in 1u32..12,
        index in 0usize..2000,
    ) {
        let grid = GridSpec::from_counts(per_row, per_column, 1.0, 1.0)
            .resolve(&PageSpec::a4(10.0))
            .unwrap()
            .grid;
        let a = grid.position_of(index);
        let b = grid.position_of(index + per_row as usize);
        prop_assert_eq!(a.column, b.column);
        prop_assert!(a.column < per_row);
        prop_assert!(a.row < per_column);
    }

    #[test]
    fn prop_page_steps_every_page_length(
        per_row in 1u32..8,
        per_column in 1u32..12,
        index in 0usize..2000,
    ) {
        let grid = GridSpec::from_counts(per_row, per_column, 1.0, 1.0)
            .resolve(&PageSpec::a4(10.0))
            .unwrap()
            .grid;
        let lpp = grid.labels_per_page();

        let here = grid.page_of(index);
        let next = grid.page_of(index + 1);
        prop_assert!(next >= here);
        prop_assert!(next - here <= 1);
        prop_assert_eq!(next != here, (index + 1) % lpp == 0);
        prop_assert_eq!(grid.page_of(index + lpp), here + 1);
        prop_assert_eq!(grid.position_of(index).page, here);
    }
}

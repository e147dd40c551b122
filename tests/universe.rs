#[cfg(test)]
mod tests {
    use life_universe::{Error, Init, Universe};

    const SEED: u64 = 42;

    /// Reference implementation on an unpacked grid.
    fn tick_naive(cells: &[bool], width: usize, height: usize) -> Vec<bool> {
        let (w, h) = (width as isize, height as isize);
        let mut next = vec![false; cells.len()];
        for y in 0..h {
            for x in 0..w {
                let mut neibs = 0;
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if (dx, dy) != (0, 0) {
                            let (nx, ny) = ((x + dx).rem_euclid(w), (y + dy).rem_euclid(h));
                            neibs += cells[(nx + ny * w) as usize] as u8;
                        }
                    }
                }
                let idx = (x + y * w) as usize;
                next[idx] = matches!((cells[idx], neibs), (true, 2 | 3) | (false, 3));
            }
        }
        next
    }

    fn unpack(life: &Universe) -> Vec<bool> {
        let n = life.width() as usize * life.height() as usize;
        (0..n)
            .map(|i| (life.cells()[i / 8] >> (i % 8)) & 1 == 1)
            .collect()
    }

    #[test]
    fn test_consistency_with_naive() {
        for (w, h) in [(128, 128), (37, 19), (1, 7), (2, 2)] {
            let mut life = Universe::with_init(w, h, Init::random(Some(SEED), 0.3)).unwrap();
            let mut cells = unpack(&life);
            for _ in 0..64 {
                life.tick();
                cells = tick_naive(&cells, w as usize, h as usize);
                assert_eq!(
                    unpack(&life),
                    cells,
                    "mismatch on {w}x{h} at generation {}",
                    life.generation()
                );
            }
        }
    }

    #[test]
    fn test_random_fill_rate() {
        const N: u32 = 256;
        for fill_rate in [0.0, 0.3, 0.6, 1.0] {
            let life = Universe::with_init(N, N, Init::random(Some(SEED), fill_rate)).unwrap();
            let expected = fill_rate * (N * N) as f64;
            let population = life.population() as f64;
            assert!(
                (population - expected).abs() <= 0.02 * (N * N) as f64,
                "{fill_rate}: {population}"
            );
        }
    }

    #[test]
    fn test_seeds_differ() {
        let a = Universe::with_init(64, 64, Init::random(Some(1), 0.5)).unwrap();
        let b = Universe::with_init(64, 64, Init::random(Some(2), 0.5)).unwrap();
        assert_ne!(a.cells(), b.cells());
    }

    #[test]
    fn test_click_to_toggle() {
        // a renderer maps a pixel to (floor(y / cell_size), floor(x / cell_size))
        const CELL_SIZE: f64 = 10.;
        let mut life = Universe::new(64, 64).unwrap();
        let (px, py) = (125.7_f64, 33.2_f64);
        let (row, col) = ((py / CELL_SIZE).floor() as u32, (px / CELL_SIZE).floor() as u32);
        life.toggle_cell(row, col).unwrap();
        assert_eq!(life.index(3, 12).unwrap(), 3 * 64 + 12);
        assert!(life.get_cell(3, 12).unwrap());
        assert_eq!(life.population(), 1);

        let (px, py) = (640.0_f64, 10.0_f64);
        let (row, col) = ((py / CELL_SIZE).floor() as u32, (px / CELL_SIZE).floor() as u32);
        assert!(matches!(
            life.toggle_cell(row, col),
            Err(Error::InvalidIndex { col: 64, .. })
        ));
    }
}

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rlifesim_lib::{
    neighbors, next_generation, plaintext, transition, BoundaryPolicy, Coord, Error, Grid,
    Simulation,
};
use std::{collections::BTreeSet, error::Error as StdError};

const POLICIES: [BoundaryPolicy; 2] = [BoundaryPolicy::Bounded, BoundaryPolicy::Toroidal];

fn alive(grid: &Grid) -> BTreeSet<Coord> {
    grid.alive_cells().collect()
}

fn set(cells: &[Coord]) -> BTreeSet<Coord> {
    cells.iter().copied().collect()
}

fn random_grid(rng: &mut StdRng) -> Result<Grid, Error> {
    let mut grid = Grid::dead(rng.gen_range(1..=12), rng.gen_range(1..=12))?;
    grid.randomize(rng);
    Ok(grid)
}

#[test]
fn block() -> Result<(), Box<dyn StdError>> {
    let cells = [(1, 1), (2, 1), (1, 2), (2, 2)];
    let grid = Grid::with_alive_cells(4, 4, cells.iter().copied())?;
    let mut sim = Simulation::with_grid(grid, BoundaryPolicy::Bounded);
    assert_eq!(sim.alive_count(), 4);
    sim.step();
    assert_eq!(alive(sim.grid()), set(&cells));
    assert_eq!(sim.alive_count(), 4);
    Ok(())
}

#[test]
fn blinker() -> Result<(), Box<dyn StdError>> {
    let horizontal = [(1, 2), (2, 2), (3, 2)];
    let vertical = [(2, 1), (2, 2), (2, 3)];
    let grid = Grid::with_alive_cells(5, 5, horizontal.iter().copied())?;
    let mut sim = Simulation::with_grid(grid, BoundaryPolicy::Bounded);
    sim.step();
    assert_eq!(alive(sim.grid()), set(&vertical));
    sim.step();
    assert_eq!(alive(sim.grid()), set(&horizontal));
    Ok(())
}

#[test]
fn glider_on_torus() -> Result<(), Box<dyn StdError>> {
    let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
    let grid = Grid::with_alive_cells(5, 5, glider.iter().copied())?;
    let mut sim = Simulation::with_grid(grid, BoundaryPolicy::Toroidal);
    sim.step_by(4);
    let moved: Vec<Coord> = glider
        .iter()
        .map(|&(x, y)| ((x + 1) % 5, (y + 1) % 5))
        .collect();
    assert_eq!(alive(sim.grid()), set(&moved));

    // Keeps going across the edges.
    sim.step_by(16);
    assert_eq!(alive(sim.grid()), set(&glider));
    assert_eq!(sim.generation(), 20);
    Ok(())
}

#[test]
fn boundary_difference() -> Result<(), Box<dyn StdError>> {
    let mut sim = Simulation::with_grid(Grid::new(3, 3, true)?, BoundaryPolicy::Bounded);
    sim.step();
    assert_eq!(alive(sim.grid()), set(&[(0, 0), (2, 0), (0, 2), (2, 2)]));

    let mut sim = Simulation::with_grid(Grid::new(3, 3, true)?, BoundaryPolicy::Toroidal);
    sim.step();
    assert_eq!(sim.alive_count(), 0);
    Ok(())
}

#[test]
fn glider_file() -> Result<(), Box<dyn StdError>> {
    let grid = plaintext::decode(&b"!Glider\n.O.\n..O\nOOO\n"[..])?;
    assert_eq!(grid.dims(), (3, 3));
    assert_eq!(
        alive(&grid),
        set(&[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)])
    );
    let mut out = Vec::new();
    plaintext::encode(&grid, &mut out)?;
    assert_eq!(out, b".O.\n..O\nOOO\n");
    Ok(())
}

#[test]
fn comments_only() -> Result<(), Box<dyn StdError>> {
    let grid = Grid::with_alive_cells(4, 4, vec![(0, 0), (1, 0), (2, 0)])?;
    let mut sim = Simulation::with_grid(grid, BoundaryPolicy::Bounded);
    sim.step();
    let before = sim.clone();

    let result = sim.load(&b"!Name: Nothing\n!\n!Just comments.\n"[..]);
    assert!(matches!(result, Err(Error::EmptyPattern)));
    assert_eq!(sim, before);
    assert_eq!(sim.grid(), &Grid::with_alive_cells(4, 4, vec![(1, 0), (1, 1)])?);
    assert_eq!(sim.generation(), 1);
    assert_eq!(sim.policy(), BoundaryPolicy::Bounded);
    Ok(())
}

#[test]
fn equal_after_different_histories() -> Result<(), Box<dyn StdError>> {
    let blinker = Grid::with_alive_cells(5, 5, vec![(1, 2), (2, 2), (3, 2)])?;
    let mut stepped = Simulation::with_grid(blinker, BoundaryPolicy::Bounded);
    stepped.step();
    stepped.clear();
    let fresh = Simulation::new(5, 5, BoundaryPolicy::Bounded)?;
    assert_eq!(stepped.grid(), fresh.grid());
    assert_eq!(stepped.generation(), fresh.generation());
    assert_eq!(stepped, fresh);

    let mut a = Simulation::new(3, 3, BoundaryPolicy::Toroidal)?;
    a.toggle(0, 0)?;
    a.step();
    let mut b = Simulation::new(3, 3, BoundaryPolicy::Toroidal)?;
    b.step();
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn failing_stream() -> Result<(), Box<dyn StdError>> {
    use std::io::{self, Read, Write};

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "broken"))
        }
    }

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "broken"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let mut sim = Simulation::new(3, 3, BoundaryPolicy::Bounded)?;
    sim.toggle(1, 1)?;
    let before = sim.clone();
    assert!(matches!(sim.load(Broken), Err(Error::IoError(_))));
    assert_eq!(sim, before);
    assert_eq!(
        sim,
        Simulation::with_grid(
            Grid::with_alive_cells(3, 3, vec![(1, 1)])?,
            BoundaryPolicy::Bounded
        )
    );
    assert!(matches!(sim.save(Broken), Err(Error::IoError(_))));
    Ok(())
}

#[test]
fn step_keeps_dimensions() -> Result<(), Box<dyn StdError>> {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..50 {
        let grid = random_grid(&mut rng)?;
        for &policy in &POLICIES {
            assert_eq!(next_generation(&grid, policy).dims(), grid.dims());
        }
    }
    Ok(())
}

#[test]
fn neighbor_count_range_and_self() -> Result<(), Box<dyn StdError>> {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..50 {
        let mut grid = random_grid(&mut rng)?;
        let (width, height) = grid.dims();
        for &policy in &POLICIES {
            for y in 0..height {
                for x in 0..width {
                    let n = neighbors::count(&grid, x, y, policy)?;
                    assert!(n <= 8);
                    grid.toggle(x, y)?;
                    assert_eq!(neighbors::count(&grid, x, y, policy)?, n);
                    grid.toggle(x, y)?;
                }
            }
        }
    }
    Ok(())
}

#[test]
fn bounded_is_truncated_torus() -> Result<(), Box<dyn StdError>> {
    // Surrounding a grid with a ring of dead cells and wrapping it around
    // gives the same counts as the bounded policy on the inner part.
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let grid = random_grid(&mut rng)?;
        let (width, height) = grid.dims();
        let padded = Grid::with_alive_cells(
            width + 2,
            height + 2,
            grid.alive_cells().map(|(x, y)| (x + 1, y + 1)),
        )?;
        for y in 0..height {
            for x in 0..width {
                assert_eq!(
                    neighbors::count(&grid, x, y, BoundaryPolicy::Bounded)?,
                    neighbors::count(&padded, x + 1, y + 1, BoundaryPolicy::Toroidal)?
                );
            }
        }
    }
    Ok(())
}

#[test]
fn toroidal_shift() -> Result<(), Box<dyn StdError>> {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..50 {
        let grid = random_grid(&mut rng)?;
        let (width, height) = grid.dims();
        let (dx, dy) = (rng.gen_range(0..width), rng.gen_range(0..height));
        let shift = |(x, y): Coord| ((x + dx) % width, (y + dy) % height);
        let shifted = Grid::with_alive_cells(width, height, grid.alive_cells().map(shift))?;
        for y in 0..height {
            for x in 0..width {
                let (sx, sy) = shift((x, y));
                assert_eq!(
                    neighbors::count(&grid, x, y, BoundaryPolicy::Toroidal)?,
                    neighbors::count(&shifted, sx, sy, BoundaryPolicy::Toroidal)?
                );
            }
        }
        assert_eq!(
            next_generation(&shifted, BoundaryPolicy::Toroidal),
            Grid::with_alive_cells(
                width,
                height,
                next_generation(&grid, BoundaryPolicy::Toroidal)
                    .alive_cells()
                    .map(shift)
            )?
        );
    }
    Ok(())
}

#[test]
fn evaluation_order_does_not_matter() -> Result<(), Box<dyn StdError>> {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let grid = random_grid(&mut rng)?;
        let (width, height) = grid.dims();
        let mut order: Vec<Coord> = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .collect();
        order.shuffle(&mut rng);
        for &policy in &POLICIES {
            let mut next = Grid::dead(width, height)?;
            for &(x, y) in &order {
                let n = neighbors::count(&grid, x, y, policy)?;
                next.set(x, y, transition(grid.get(x, y)?, n))?;
            }
            assert_eq!(next, next_generation(&grid, policy));
        }
    }
    Ok(())
}

#[test]
fn codec_round_trip() -> Result<(), Box<dyn StdError>> {
    let mut rng = StdRng::seed_from_u64(6);
    for _ in 0..50 {
        let grid = random_grid(&mut rng)?;
        let mut out = Vec::new();
        plaintext::encode(&grid, &mut out)?;
        assert_eq!(out.len(), grid.area() + grid.height() as usize);
        assert_eq!(plaintext::decode(&out[..])?, grid);
    }
    Ok(())
}

#[test]
fn codec_tolerance_and_comments() -> Result<(), Box<dyn StdError>> {
    const ALIVE: &[u8] = b"Oo*#xA@1";
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let grid = random_grid(&mut rng)?;
        let mut out = Vec::new();
        plaintext::encode(&grid, &mut out)?;
        let text = String::from_utf8(out)?;

        let mut lines = Vec::new();
        for line in text.lines() {
            while rng.gen_bool(0.3) {
                lines.push(String::from("!Comment: .O.O"));
            }
            let line: String = line
                .bytes()
                .map(|c| match c {
                    b'.' => '.',
                    _ => *ALIVE.choose(&mut rng).unwrap() as char,
                })
                .collect();
            lines.push(line);
        }
        if rng.gen() {
            lines.push(String::from("!"));
        }
        let mangled = lines.join("\n");
        assert_eq!(plaintext::decode(mangled.as_bytes())?, grid);
    }
    Ok(())
}

#[test]
fn generation_increments_by_one() -> Result<(), Box<dyn StdError>> {
    let mut sim = Simulation::new(8, 8, BoundaryPolicy::Toroidal)?;
    sim.randomize(&mut StdRng::seed_from_u64(8));
    for expected in 1..=20 {
        sim.step();
        assert_eq!(sim.generation(), expected);
    }
    Ok(())
}

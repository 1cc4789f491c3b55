use golsim_lib::{
    patterns,
    save::{read_board, read_pattern, write_board, write_pattern},
    Config, Coord, Error as LifeError, Mode, NbhdDesc, SaveDir, State, World, DEAD, FIRST, SECOND,
};
use std::{error::Error, fs};

fn unbounded(mode: Mode) -> Result<World, LifeError> {
    Config::new(0, 0)
        .set_wrapping(false)
        .set_mode(mode)
        .set_seed(0)
        .world()
}

fn living(world: &World) -> Vec<(Coord, State)> {
    world.cells().collect()
}

fn assert_pruned(world: &World) {
    for (coord, value) in world.store().iter() {
        let desc = NbhdDesc::unpack(value);
        assert_ne!(desc.state, DEAD, "dead entry left at {:?}", coord);
        assert_eq!((desc.count_1, desc.count_2), (0, 0), "counters left at {:?}", coord);
    }
}

#[test]
fn blinker() -> Result<(), Box<dyn Error>> {
    let mut world = unbounded(Mode::Normal)?;
    for col in 0..3 {
        world.set((1, col), FIRST);
    }
    world.advance(1);
    assert_eq!(
        living(&world),
        vec![((0, 1), FIRST), ((1, 1), FIRST), ((2, 1), FIRST)]
    );
    world.advance(1);
    assert_eq!(
        living(&world),
        vec![((1, 0), FIRST), ((1, 1), FIRST), ((1, 2), FIRST)]
    );
    assert_eq!(world.generation(), 2);
    assert_pruned(&world);
    Ok(())
}

#[test]
fn blinker_torus() -> Result<(), Box<dyn Error>> {
    let mut world = Config::new(5, 5).world()?;
    world.stamp(&[((0, 0), FIRST), ((0, 1), FIRST), ((0, 2), FIRST)], (2, 4));
    assert_eq!(world.plaintext(), ".....\n.....\noo..o\n.....\n.....\n");
    world.advance(1);
    assert_eq!(world.plaintext(), ".....\no....\no....\no....\n.....\n");
    Ok(())
}

#[test]
fn tiny_torus_fills() -> Result<(), Box<dyn Error>> {
    // On a 3×3 torus every cell neighbors all eight others.
    let mut world = Config::new(3, 3).world()?;
    for col in 0..3 {
        world.set((1, col), FIRST);
    }
    world.advance(1);
    assert_eq!(world.cell_count(), 9);
    world.advance(1);
    assert_eq!(world.cell_count(), 0);
    assert!(world.store().is_empty());
    Ok(())
}

#[test]
fn glider_wraps_around() -> Result<(), Box<dyn Error>> {
    let mut world = Config::new(8, 8).world()?;
    world.stamp_pattern(patterns::find("glider")?, (6, 6));
    let start = living(&world);
    world.advance(4);
    assert_ne!(living(&world), start);
    world.advance(28);
    assert_eq!(living(&world), start);
    Ok(())
}

#[test]
fn glider_moves() -> Result<(), Box<dyn Error>> {
    let mut world = unbounded(Mode::Normal)?;
    let glider = patterns::find("glider")?;
    world.stamp_pattern(glider, (-10, -10));
    world.advance(40);
    assert_eq!(living(&world), glider.cells());
    assert_eq!(world.bounding_box(), Some(((0, 0), (2, 2))));
    Ok(())
}

#[test]
fn wrap_normalizes() -> Result<(), Box<dyn Error>> {
    let mut world = Config::new(4, 6).world()?;
    world.set((4, 7), SECOND);
    assert_eq!(world.get((0, 1)), SECOND);
    assert_eq!(world.get((-4, -5)), SECOND);
    assert_eq!(living(&world), vec![((0, 1), SECOND)]);
    world.delete((8, 13));
    assert_eq!(world.cell_count(), 0);
    Ok(())
}

#[test]
fn block_across_corner() -> Result<(), Box<dyn Error>> {
    let mut world = Config::new(4, 4).world()?;
    for &coord in &[(3, 3), (3, 4), (4, 3), (4, 4)] {
        world.set(coord, FIRST);
    }
    let before = living(&world);
    world.advance(5);
    assert_eq!(living(&world), before);
    Ok(())
}

#[test]
fn toggle_normal() -> Result<(), Box<dyn Error>> {
    let mut world = Config::new(10, 10).world()?;
    assert_eq!(world.toggle((3, 4)), FIRST);
    assert_eq!(world.get((3, 4)), FIRST);
    assert_eq!(world.toggle((3, 4)), DEAD);
    assert!(world.store().get((3, 4)).is_none());
    Ok(())
}

#[test]
fn toggle_two_species() -> Result<(), Box<dyn Error>> {
    let mut world = Config::new(10, 10).set_mode(Mode::CoExistence).world()?;
    assert_eq!(world.toggle((3, 4)), FIRST);
    assert_eq!(world.toggle((3, 4)), SECOND);
    assert_eq!(world.get((3, 4)), SECOND);
    assert_eq!(world.toggle((3, 4)), DEAD);
    assert!(world.store().is_empty());
    Ok(())
}

#[test]
fn region_operations() -> Result<(), Box<dyn Error>> {
    let mut world = Config::new(10, 10).set_mode(Mode::Virus).world()?;
    let rect = world.rect((2, 2), (1, 1));
    assert_eq!(rect, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    world.toggle_region(rect.clone());
    world.toggle((1, 1));
    let region = world.capture_region(vec![(0, 0), (1, 1), (2, 2)]);
    assert_eq!(region.cells(), &[((1, 1), SECOND), ((2, 2), FIRST)]);
    world.delete_region(rect);
    assert_eq!(world.cell_count(), 0);
    assert!(world.capture_rect((0, 0), (9, 9)).is_empty());
    Ok(())
}

#[test]
fn rect_is_cut_on_torus() -> Result<(), Box<dyn Error>> {
    let mut world = Config::new(3, 4).world()?;
    world.set((0, 0), FIRST);
    assert_eq!(world.rect((-1, -1), (10, 10)).len(), 12);
    assert_eq!(world.capture_rect((-1, -1), (10, 10)).len(), 1);
    Ok(())
}

#[test]
fn coexistence_majority() -> Result<(), Box<dyn Error>> {
    let mut world = unbounded(Mode::CoExistence)?;
    world.set((0, 0), SECOND);
    world.set((0, 2), SECOND);
    world.set((2, 1), FIRST);
    world.advance(1);
    assert_eq!(world.get((1, 1)), SECOND);
    assert_pruned(&world);
    Ok(())
}

/// Two prey cells next to one predator, which also give birth to a cell.
fn prey_and_predator(mode: Mode) -> Result<World, LifeError> {
    let mut world = unbounded(mode)?;
    world.set((0, 0), FIRST);
    world.set((0, 1), FIRST);
    world.set((1, 1), SECOND);
    world.advance(1);
    Ok(world)
}

#[test]
fn predator_eats_prey() -> Result<(), Box<dyn Error>> {
    let world = prey_and_predator(Mode::Predator)?;
    assert_eq!(living(&world), vec![((1, 0), FIRST), ((1, 1), SECOND)]);

    let mut block = unbounded(Mode::Predator)?;
    for &coord in &[(0, 0), (0, 1), (1, 0), (1, 1)] {
        block.set(coord, FIRST);
    }
    block.set((0, 2), SECOND);
    block.advance(1);
    assert_eq!(block.get((0, 0)), FIRST);
    assert_eq!(block.get((0, 1)), DEAD);
    Ok(())
}

#[test]
fn virus_infects_prey() -> Result<(), Box<dyn Error>> {
    let world = prey_and_predator(Mode::Virus)?;
    assert_eq!(
        living(&world),
        vec![
            ((0, 0), SECOND),
            ((0, 1), SECOND),
            ((1, 0), FIRST),
            ((1, 1), SECOND)
        ]
    );
    Ok(())
}

#[test]
fn coexistence_keeps_both() -> Result<(), Box<dyn Error>> {
    let world = prey_and_predator(Mode::CoExistence)?;
    assert_eq!(
        living(&world),
        vec![
            ((0, 0), FIRST),
            ((0, 1), FIRST),
            ((1, 0), FIRST),
            ((1, 1), SECOND)
        ]
    );
    Ok(())
}

#[test]
fn unknown_is_reproducible_with_seed() -> Result<(), Box<dyn Error>> {
    let soup = |seed: u64| -> Result<Vec<(Coord, State)>, LifeError> {
        let mut world = Config::new(16, 16)
            .set_mode(Mode::Unknown)
            .set_seed(seed)
            .world()?;
        for i in 0..60 {
            let coord = ((i * 7) % 9, (i * 5) % 11);
            world.set(coord, if i % 3 == 0 { SECOND } else { FIRST });
        }
        world.advance(20);
        Ok(world.cells().collect())
    };
    assert_eq!(soup(7)?, soup(7)?);
    Ok(())
}

#[test]
fn unknown_species_ignore_each_other() -> Result<(), Box<dyn Error>> {
    let mut world = unbounded(Mode::Unknown)?;
    // A blinker of each species, overlapping neighborhoods.
    for col in 0..3 {
        world.set((0, col), FIRST);
        world.set((1, col), SECOND);
    }
    world.advance(1);
    // Each blinker evolves as if the other species were absent.
    assert_eq!(world.get((0, 1)), FIRST);
    assert_eq!(world.get((1, 1)), SECOND);
    assert_eq!(world.get((0, 0)), DEAD);
    assert_eq!(world.get((1, 2)), DEAD);
    Ok(())
}

#[test]
fn clear_releases_cells() -> Result<(), Box<dyn Error>> {
    let mut world = Config::new(10, 10).world()?;
    world.stamp_pattern(patterns::find("acorn")?, (0, 0));
    assert_eq!(world.cell_count(), 7);
    world.advance(2);
    assert_eq!(world.generation(), 2);
    world.clear();
    assert!(world.store().is_empty());
    assert_eq!(world.generation(), 0);
    assert_eq!(world.plaintext().matches('o').count(), 0);
    Ok(())
}

#[test]
fn config_errors() {
    assert!(matches!(
        Config::new(0, 5).world(),
        Err(LifeError::NonPositiveError)
    ));
    assert!(Config::new(0, 5).set_wrapping(false).world().is_ok());
    assert!(matches!(
        Config::from_legacy(5, 5, 5),
        Err(LifeError::InvalidMode(5))
    ));
    let legacy = Config::from_legacy(0, 5, 2).unwrap();
    assert!(!legacy.wrapping);
    assert_eq!(legacy.mode, Mode::Predator);
}

#[test]
fn mode_names() -> Result<(), Box<dyn Error>> {
    assert_eq!("co-existence".parse::<Mode>()?, Mode::CoExistence);
    assert_eq!("CoExistence".parse::<Mode>()?, Mode::CoExistence);
    assert_eq!("VIRUS".parse::<Mode>()?, Mode::Virus);
    assert_eq!("4".parse::<Mode>()?, Mode::Unknown);
    assert!("Highlife".parse::<Mode>().is_err());
    for (i, mode) in Mode::ALL.iter().enumerate() {
        assert_eq!(mode.index(), i);
        assert_eq!(mode.to_string().parse::<Mode>()?, *mode);
    }
    assert_eq!(Mode::Normal.cycle_length(), 2);
    assert_eq!(Mode::Unknown.cycle_length(), 3);
    Ok(())
}

#[test]
fn board_round_trip() -> Result<(), Box<dyn Error>> {
    let mut world = Config::new(12, 9).set_mode(Mode::Virus).world()?;
    world.stamp_pattern(patterns::find("beacon")?, (10, 7));
    world.set((5, 5), SECOND);
    let mut file = Vec::new();
    write_board(&world, &mut file)?;
    let text = String::from_utf8(file.clone())?;
    assert!(text.starts_with("12 9 3\n"));

    let loaded = read_board(file.as_slice(), None)?;
    assert_eq!(loaded.mode(), Mode::Virus);
    assert_eq!(loaded.config().height, 12);
    assert_eq!(loaded.config().width, 9);
    assert_eq!(living(&loaded), living(&world));
    Ok(())
}

#[test]
fn unbounded_board_header() -> Result<(), Box<dyn Error>> {
    let mut world = unbounded(Mode::Predator)?;
    world.set((-100, 4000), FIRST);
    let mut file = Vec::new();
    write_board(&world, &mut file)?;
    assert_eq!(String::from_utf8(file.clone())?, "0 0 2\n-100 4000 1\n");
    let loaded = read_board(file.as_slice(), None)?;
    assert!(!loaded.board().is_wrapping());
    assert_eq!(living(&loaded), living(&world));
    Ok(())
}

#[test]
fn pattern_anchoring() -> Result<(), Box<dyn Error>> {
    let mut world = Config::new(20, 20).set_mode(Mode::CoExistence).world()?;
    world.stamp_pattern(patterns::find("boat")?, (5, 8));
    world.set((6, 8), SECOND);
    let region = world.capture_rect((4, 7), (9, 12));

    let mut file = Vec::new();
    write_pattern(&region, &mut file)?;
    assert_eq!(
        String::from_utf8(file.clone())?,
        "0 0 1\n0 1 1\n1 0 2\n1 2 1\n2 1 1\n"
    );

    let mut other = unbounded(Mode::CoExistence)?;
    other.load_pattern(file.as_slice(), (-3, 30))?;
    let shifted = region
        .relative()
        .into_iter()
        .map(|((row, col), state)| ((row - 3, col + 30), state))
        .collect::<Vec<_>>();
    assert_eq!(living(&other), shifted);
    Ok(())
}

#[test]
fn pattern_across_torus_edge() -> Result<(), Box<dyn Error>> {
    let mut world = Config::new(5, 5).world()?;
    world.set((2, 4), FIRST);
    world.set((2, 5), FIRST);
    let region = world.capture_rect((2, 4), (2, 5));
    assert_eq!(region.cells(), &[((2, 4), FIRST), ((2, 5), FIRST)]);

    let mut file = Vec::new();
    write_pattern(&region, &mut file)?;
    assert_eq!(
        read_pattern(file.as_slice())?,
        vec![((0, 0), FIRST), ((0, 1), FIRST)]
    );
    Ok(())
}

#[test]
fn rect_near_limits() -> Result<(), Box<dyn Error>> {
    let mut world = Config::new(5, 5).world()?;
    world.set((i32::MAX, 0), SECOND);
    let region = world.capture_rect((i32::MAX, 0), (i32::MAX, 0));
    assert_eq!(region.cells(), &[((i32::MAX, 0), SECOND)]);
    assert_eq!(region.relative(), vec![((0, 0), SECOND)]);
    assert_eq!(world.rect((i32::MAX - 1, i32::MAX), (i32::MAX, i32::MAX)).len(), 2);
    Ok(())
}

#[test]
fn pattern_across_i32_limits() -> Result<(), Box<dyn Error>> {
    let mut world = unbounded(Mode::Normal)?;
    world.set((i32::MIN, 0), FIRST);
    world.set((i32::MAX, 0), FIRST);
    let region = world.capture_region(vec![(i32::MIN, 0), (i32::MAX, 0)]);

    let mut file = Vec::new();
    write_pattern(&region, &mut file)?;
    assert_eq!(String::from_utf8(file.clone())?, "0 0 1\n-1 0 1\n");

    let mut other = unbounded(Mode::Normal)?;
    other.load_pattern(file.as_slice(), (i32::MIN, 0))?;
    assert_eq!(living(&other), living(&world));
    Ok(())
}

#[test]
fn empty_pattern() {
    let world = Config::new(5, 5).world().unwrap();
    let region = world.capture_rect((0, 0), (4, 4));
    assert!(matches!(
        write_pattern(&region, Vec::new()),
        Err(LifeError::EmptyRegion)
    ));
}

#[test]
fn malformed_files() -> Result<(), Box<dyn Error>> {
    let mut world = Config::new(5, 5).world()?;
    world.set((1, 1), FIRST);

    let truncated = "0 0 1\n1 2\n";
    assert!(matches!(
        world.load_pattern(truncated.as_bytes(), (0, 0)),
        Err(LifeError::ParseError { line: 2, .. })
    ));
    let bad_state = "0 0 1\n0 1 3\n";
    assert!(matches!(
        world.load_pattern(bad_state.as_bytes(), (0, 0)),
        Err(LifeError::ParseError { line: 2, .. })
    ));
    let not_a_number = "0 zero 1\n";
    assert!(world.load_pattern(not_a_number.as_bytes(), (0, 0)).is_err());
    assert_eq!(living(&world), vec![((1, 1), FIRST)]);

    assert!(matches!(
        read_board("5 5 9\n".as_bytes(), None),
        Err(LifeError::ParseError { line: 1, .. })
    ));
    assert!(read_board("".as_bytes(), None).is_err());
    assert!(read_pattern("".as_bytes())?.is_empty());
    Ok(())
}

#[test]
fn save_dir() -> Result<(), Box<dyn Error>> {
    let root = std::env::temp_dir().join(format!("golsim-save-dir-{}", std::process::id()));
    fs::create_dir_all(&root)?;
    let dir = SaveDir::new(&root);

    let mut world = Config::new(16, 16).set_mode(Mode::Predator).world()?;
    world.stamp_pattern(patterns::find("toad")?, (3, 3));
    dir.save_board("toad", &world)?;
    dir.save_pattern("toad", &world.capture_rect((0, 0), (15, 15)))?;
    dir.save_pattern("corner", &world.capture_rect((3, 3), (3, 5)))?;

    assert_eq!(dir.list_boards()?, vec!["toad"]);
    assert_eq!(dir.list_patterns()?, vec!["corner", "toad"]);

    let loaded = dir.load_board("toad", None)?;
    assert_eq!(living(&loaded), living(&world));

    let mut other = unbounded(Mode::Normal)?;
    dir.load_pattern("toad", &mut other, (0, 0))?;
    assert_eq!(
        other.plaintext(),
        patterns::find("toad")?.rows.replace('1', "o").replace('0', ".").replace(' ', "\n") + "\n"
    );

    assert!(matches!(
        dir.load_board("missing", None),
        Err(LifeError::Io(_))
    ));

    fs::remove_dir_all(&root)?;
    Ok(())
}

#[test]
#[cfg(feature = "serde")]
fn ser() -> Result<(), Box<dyn Error>> {
    let mut world = Config::new(10, 10)
        .set_mode(Mode::CoExistence)
        .set_seed(3)
        .world()?;
    world.stamp_pattern(patterns::find("hat")?, (7, 7));
    world.set((0, 0), SECOND);
    world.advance(3);
    let save = world.ser();
    assert_eq!(save.generation, 3);
    let restored = save.world()?;
    assert_eq!(restored.config(), world.config());
    assert_eq!(living(&restored), living(&world));
    Ok(())
}

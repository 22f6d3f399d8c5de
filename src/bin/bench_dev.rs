use gol_census::*;

fn main() {
    // timing both engines and the census on growing tori
    let library = PatternLibrary::standard();
    for size in [50, 100, 200, 400] {
        let grid = Grid::random(size, DEFAULT_ALIVE_PROBABILITY, Some(42)).unwrap();
        println!("size={size}");

        let engines: [Box<dyn LifeEngine>; 2] = [Box::new(NaiveEngine), Box::new(BitwiseEngine)];
        let mut results = vec![];
        for engine in engines.iter() {
            let timer = std::time::Instant::now();
            let updated = engine.steps(&grid, 100);
            println!(
                "{:>8} -> {:.3} secs per 100 generations",
                engine.name(),
                timer.elapsed().as_secs_f64()
            );
            results.push(updated);
        }
        assert_eq!(results[0], results[1]);

        let timer = std::time::Instant::now();
        let census = count_all(&results[0], &library);
        println!(
            "  census -> {:.3} secs, {} matches",
            timer.elapsed().as_secs_f64(),
            census.total()
        );
    }
}

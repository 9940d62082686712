use std::time::Instant;

use itertools::Itertools;
use log::info;

use card_nexus::core::card::DeclareCardinality;
use card_nexus::core::op::allsat::AllSat;
use card_nexus::core::op::ops::Ops;
use card_nexus::core::solver::{Solver, SolverExt};
use card_nexus::wrappers::batsat::BatsatSolver;

/// Edges of the Petersen graph.
fn petersen() -> Vec<(usize, usize)> {
    let outer = (0..5).map(|i| (i, (i + 1) % 5));
    let spokes = (0..5).map(|i| (i, i + 5));
    let inner = (0..5).map(|i| (5 + i, 5 + (i + 2) % 5));
    outer.chain(spokes).chain(inner).collect()
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let start_time = Instant::now();
    let mut solver = BatsatSolver::new();
    info!("solver = {}", solver);

    // Minimum vertex cover via incremental tightening of a single totalizer.
    let edges = petersen();
    let cover = solver.new_var_vec(10);
    for &(a, b) in edges.iter() {
        solver.add_clause([cover[a], cover[b]]);
    }
    let mut card = solver.declare_cardinality(&cover)?;

    let mut best = None;
    while solver.solve().is_sat() {
        let size = solver.count_true(&cover);
        let vertices = cover.iter().positions(|&x| solver.value(x).bool()).collect_vec();
        info!("Found cover of size {}: {:?}", size, vertices);
        best = Some(size);
        card.declare_upper_bound_less_than(&mut solver, Some(size))?;
    }
    match best {
        Some(size) => info!("Minimum vertex cover has size {}", size),
        None => info!("Graph has no vertex cover"),
    }

    // Exploring with assumed bounds keeps the declared ones intact.
    let mut solver = BatsatSolver::new();
    let lits = solver.new_var_vec(8);
    for (&a, &b) in lits.iter().tuple_windows() {
        solver.imply(a, b);
    }
    let mut card = solver.declare_cardinality(&lits)?;
    card.declare_upper_bound_less_than_or_equal(&mut solver, Some(6))?;
    for k in 1..=4 {
        card.assume_lower_bound_greater_than_or_equal(Some(k))?;
        let response = solver.solve();
        info!("At least {} of a chain, at most 6: {}", k, response);
    }
    card.assume_lower_bound_greater_than_or_equal(None)?;

    card.assume_lower_bound_greater_than_or_equal(Some(2))?;
    let solutions = solver
        .all_sat_essential(lits.clone(), |s| s.values(&lits).into_iter().join(""))
        .collect_vec();
    for (i, solution) in solutions.iter().enumerate() {
        info!("Solution #{}: {}", i + 1, solution);
    }

    info!("All done in {:.3} s", start_time.elapsed().as_secs_f64());
    Ok(())
}

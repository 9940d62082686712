use std::fmt::Display;

use itertools::Itertools;

use card_nexus::core::lit::Lit;
use card_nexus::core::op::allsat::AllSat;
use card_nexus::core::solver::*;

/// Binomial coefficient `C(n, k)`.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

/// Number of assignments to `n` free variables with between `lb` and `ub` (inclusive) true.
pub fn models_with_count_between(n: usize, lb: usize, ub: usize) -> usize {
    (lb..=ub.min(n)).map(|k| binomial(n, k)).sum()
}

/// Enumerate all models over `lits` and return the number of true literals in each.
pub fn enumerate_true_counts<S>(solver: &mut S, lits: &[Lit]) -> Vec<usize>
where
    S: Solver,
{
    solver.all_sat_essential(lits.to_vec(), |s| s.count_true(lits)).collect_vec()
}

/// Basic sanity check for a real solver backend.
pub fn run_smoke_test<S>(mut solver: S) -> color_eyre::Result<()>
where
    S: Solver + Display,
{
    println!("Solver signature: {}", solver.signature());
    println!("solver = {}", solver);

    let xs = solver.new_var_vec(5);
    solver.add_clause([xs[0], xs[1]]);
    solver.add_clause([xs[2], xs[3]]);
    solver.add_clause([-xs[0], -xs[1]]);
    solver.add_clause([-xs[2], -xs[3]]);
    solver.add_unit(xs[4]);
    let response = solver.solve();
    println!("Solver returned: {:?}", response);
    assert_eq!(response, SolveResponse::Sat);

    let response = solver.solve_under(&[xs[0], xs[1]]);
    println!("Solver returned: {:?}", response);
    assert_eq!(response, SolveResponse::Unsat);

    let response = solver.solve();
    println!("Solver returned: {:?}", response);
    assert_eq!(response, SolveResponse::Sat);

    for &x in xs.iter() {
        println!("solver.value({}) = {}", x, solver.value(x));
    }
    assert!(solver.value(xs[4]).bool());

    Ok(())
}

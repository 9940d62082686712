use card_nexus::core::lit::Lit;
use card_nexus::core::op::allsat::AllSat;
use card_nexus::core::op::ops::Ops;
use card_nexus::core::solver::{Solver, SolverExt};
use card_nexus::wrappers::batsat::BatsatSolver;
use card_nexus_test_utils::run_smoke_test;

#[test]
fn smoke_batsat() -> color_eyre::Result<()> {
    run_smoke_test(BatsatSolver::new())
}

#[test]
fn all_solutions_5vars() {
    let mut solver = BatsatSolver::new();

    let n = 5;
    let _lits = solver.new_var_vec(n);
    assert_eq!(solver.num_vars(), n);

    let num_solutions = solver.all_sat(|_| ()).count();
    assert_eq!(num_solutions, 32);
}

#[test]
fn all_solutions_essential_3of5vars() {
    let mut solver = BatsatSolver::new();

    let n = 5;
    let lits = solver.new_var_vec(n);
    assert_eq!(solver.num_vars(), n);

    let k = 3;
    let essential = lits[0..k].to_vec();
    let num_solutions = solver.all_sat_essential(essential, |_| ()).count();
    assert_eq!(num_solutions, 8);
}

#[test]
fn all_solutions_respect_registered_assumptions() {
    let mut solver = BatsatSolver::new();
    let lits = solver.new_var_vec(4);
    solver.at_most_one(&lits);

    let x: Lit = lits[0];
    solver.assumptions_observable_mut().register(move || vec![-x]);

    // Exactly-zero or exactly-one of the remaining three.
    let num_solutions = solver.all_sat_essential(lits.clone(), |_| ()).count();
    assert_eq!(num_solutions, 4);
}

use cpx::{Environment, ObjectiveSense, Problem, Span};
use cpx_sys as ffi;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Builds min x1 + x2, x1 + x2 <= 10, 0 <= x <= 10.
fn build_small_lp<'env>(env: &'env Environment) -> Problem<'env> {
    let mut prob = env.create_problem("test").expect("failed to create problem");
    prob.new_cols(&[1.0, 1.0], &[0.0, 0.0], &[10.0, 10.0], None)
        .expect("failed to add columns");
    prob.new_rows(&[10.0], b"L", None).expect("failed to add row");
    prob.chg_coef_list(&[0i32, 0], &[0i32, 1], &[1.0, 1.0])
        .expect("failed to set coefficients");
    prob
}

#[test]
fn test_end_to_end_lp() {
    init_tracing();

    let env = Environment::open().expect("failed to open environment");
    let mut prob = build_small_lp(&env);
    assert_eq!(prob.num_cols(), 2);
    assert_eq!(prob.num_rows(), 1);

    prob.optimize().expect("optimize failed");
    assert_eq!(prob.solution_status().raw(), ffi::CPX_STAT_OPTIMAL);

    let objective = prob.objective_value().expect("missing objective value");
    assert!(
        objective <= 10.0,
        "Expected objective <= 10, got {}",
        objective
    );

    let x = prob.primal_values(None).expect("missing primal values");
    assert_eq!(x.len(), 2);
    assert!(
        x.iter().sum::<f64>() <= 10.0,
        "Expected feasible row activity, got {:?}",
        x
    );
}

#[test]
fn test_mip_status_and_dispatch() {
    init_tracing();

    let env = Environment::open().expect("failed to open environment");
    let mut prob = build_small_lp(&env);
    prob.copy_ctype(b"II").expect("failed to set column types");

    prob.optimize().expect("optimize failed");
    assert_eq!(prob.solution_status().raw(), ffi::CPXMIP_OPTIMAL);

    // MIP extraction goes through the MIP entry points.
    let x = prob.primal_values(None).expect("missing primal values");
    assert_eq!(x.len(), 2);
    let objective = prob.objective_value().expect("missing objective value");
    assert!(objective.is_finite());
}

#[test]
fn test_wide_index_array_aborts_before_native_call() {
    init_tracing();

    let env = Environment::open().expect("failed to open environment");
    let mut prob = build_small_lp(&env);
    prob.optimize().expect("optimize failed");
    let before = prob.objective_value().expect("missing objective value");

    let err = prob.chg_obj(&[0i64, 1], &[5.0, 5.0]).unwrap_err();
    assert_eq!(err.code(), "INDEX_WIDTH_MISMATCH");

    // The rejected change must not have reached the model.
    prob.optimize().expect("optimize failed");
    let after = prob.objective_value().expect("missing objective value");
    assert_eq!(before, after);
}

#[test]
fn test_range_extraction_matches_full_range() {
    init_tracing();

    let env = Environment::open().expect("failed to open environment");
    let mut prob = env.create_problem("ranges").expect("failed to create problem");
    prob.new_cols(
        &[3.0, -1.0, 2.0, -4.0],
        &[0.0, 0.0, 0.0, 0.0],
        &[1.0, 2.0, 3.0, 4.0],
        None,
    )
    .expect("failed to add columns");
    prob.optimize().expect("optimize failed");

    let full = prob.primal_values(None).expect("missing primal values");
    assert_eq!(full.len(), 4);

    let slice = prob
        .primal_values(Some(Span::new(1, 2)))
        .expect("missing primal slice");
    assert_eq!(slice.len(), 2);
    assert_eq!(slice, full[1..=2].to_vec());

    let costs = prob.reduced_costs(None).expect("missing reduced costs");
    assert_eq!(costs.len(), 4);

    let err = prob.primal_values(Some(Span::new(2, 9))).unwrap_err();
    assert_eq!(err.code(), "CPLEX_NATIVE");
}

#[test]
fn test_row_extraction_and_basis() {
    init_tracing();

    let env = Environment::open().expect("failed to open environment");
    let mut prob = build_small_lp(&env);
    prob.optimize().expect("optimize failed");

    let slack = prob.slack_values(None).expect("missing slack values");
    assert_eq!(slack.len(), 1);
    assert_eq!(slack[0], 10.0);

    let duals = prob.dual_values(None).expect("missing dual values");
    assert_eq!(duals.len(), 1);

    let (cstat, rstat) = prob.basis().expect("missing basis");
    assert_eq!(cstat.len(), 2);
    assert_eq!(rstat.len(), 1);
    assert!(rstat.iter().all(|&s| s == ffi::CPX_BASIC));
}

#[test]
fn test_extraction_before_solve_is_native_error() {
    init_tracing();

    let env = Environment::open().expect("failed to open environment");
    let prob = build_small_lp(&env);

    let err = prob.primal_values(None).unwrap_err();
    assert_eq!(err.code(), "CPLEX_NATIVE");
    let msg = format!("{}", err);
    assert!(msg.contains("No solution"), "unexpected message: {}", msg);
}

#[test]
fn test_write_problem_file() {
    init_tracing();

    let env = Environment::open().expect("failed to open environment");
    let prob = build_small_lp(&env);

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("model.lp");
    let path_str = path.to_str().expect("non-utf8 temp path");
    prob.write(path_str).expect("failed to write problem");

    let text = std::fs::read_to_string(&path).expect("failed to read problem file");
    assert!(text.contains("Minimize"));
    assert!(text.contains("Subject To"));
    assert!(text.contains("x1"));

    let err = prob.write(&format!("{}.unknown", path_str)).unwrap_err();
    assert_eq!(err.code(), "CPLEX_NATIVE");
}

#[test]
fn test_int_param_round_trip() {
    init_tracing();

    let env = Environment::open().expect("failed to open environment");
    env.set_int_param(ffi::CPX_PARAM_SCRIND, ffi::CPX_ON)
        .expect("failed to set parameter");
    let value = env
        .int_param(ffi::CPX_PARAM_SCRIND)
        .expect("failed to read parameter");
    assert_eq!(value, ffi::CPX_ON);

    env.set_dbl_param(ffi::CPX_PARAM_EPGAP, 1e-4)
        .expect("failed to set gap tolerance");
}

#[test]
fn test_copy_lp_bulk_load() {
    init_tracing();

    let env = Environment::open().expect("failed to open environment");
    let mut prob = env.create_problem("bulk").expect("failed to create problem");

    // max 2 x1 + 3 x2; x1 + x2 <= 4; x1 in [0,4], x2 in [0,2].
    prob.copy_lp(
        ObjectiveSense::Maximize,
        &[2.0, 3.0],
        &[4.0],
        b"L",
        &[0i32, 1],
        &[1i32, 1],
        &[0i32, 0],
        &[1.0, 1.0],
        &[0.0, 0.0],
        &[4.0, 2.0],
        None,
    )
    .expect("failed to load LP");

    assert_eq!(prob.num_cols(), 2);
    assert_eq!(prob.num_rows(), 1);

    prob.optimize().expect("optimize failed");
    assert_eq!(prob.solution_status().raw(), ffi::CPX_STAT_OPTIMAL);
    let x = prob.primal_values(None).expect("missing primal values");
    assert_eq!(x, vec![4.0, 2.0]);
    let objective = prob.objective_value().expect("missing objective value");
    assert_eq!(objective, 14.0);
}

#[test]
fn test_sos_and_mip_start() {
    init_tracing();

    let env = Environment::open().expect("failed to open environment");
    let mut prob = build_small_lp(&env);
    prob.copy_ctype(b"II").expect("failed to set column types");

    prob.add_sos(&[ffi::CPX_TYPE_SOS1], &[0i32], &[0i32, 1], &[1.0, 2.0])
        .expect("failed to add SOS");
    prob.copy_mip_start(&[0i32, 1], &[0.0, 0.0])
        .expect("failed to copy MIP start");

    let mut delstat = vec![1 as ffi::CpxInt];
    prob.del_set_sos(&mut delstat).expect("failed to delete SOS");
    assert_eq!(delstat[0], -1);

    prob.optimize().expect("optimize failed");
    assert_eq!(prob.solution_status().raw(), ffi::CPXMIP_OPTIMAL);
}

#[test]
fn test_bound_and_coefficient_edits() {
    init_tracing();

    let env = Environment::open().expect("failed to open environment");
    let mut prob = build_small_lp(&env);

    prob.chg_bds(&[0i32], b"B", &[2.0]).expect("failed to change bounds");
    prob.chg_coef(0, 1, 3.0).expect("failed to change coefficient");
    prob.chg_obj(&[1i32], &[-1.0]).expect("failed to change objective");

    prob.optimize().expect("optimize failed");
    let x = prob.primal_values(None).expect("missing primal values");
    // Column 0 is fixed at 2, column 1 is pulled to its upper bound.
    assert_eq!(x, vec![2.0, 10.0]);

    prob.del_rows(0, 0).expect("failed to delete row");
    assert_eq!(prob.num_rows(), 0);
}

#[test]
fn test_quadratic_dispatch() {
    init_tracing();

    let env = Environment::open().expect("failed to open environment");
    let mut prob = env.create_problem("quad").expect("failed to create problem");
    prob.new_cols(&[1.0, 1.0], &[0.0, 0.0], &[1.0, 1.0], None)
        .expect("failed to add columns");
    prob.copy_quad(&[0i32, 1], &[1i32, 1], &[0i32, 1], &[2.0, 2.0])
        .expect("failed to set quadratic objective");
    assert_eq!(prob.problem_type().unwrap(), cpx::ProblemType::Quadratic);

    prob.optimize().expect("optimize failed");
    assert_eq!(prob.solution_status().raw(), ffi::CPX_STAT_OPTIMAL);
}

#[test]
fn test_add_rows_and_basis_warm_start() {
    init_tracing();

    let env = Environment::open().expect("failed to open environment");
    let mut prob = env.create_problem("warm").expect("failed to create problem");
    prob.new_cols(&[1.0, 2.0], &[0.0, 0.0], &[5.0, 5.0], None)
        .expect("failed to add columns");
    prob.add_rows(0, &[8.0, 6.0], b"LL", &[0i32, 2], &[0i32, 1, 0, 1], &[1.0, 1.0, 2.0, 1.0])
        .expect("failed to add rows");
    assert_eq!(prob.num_rows(), 2);

    prob.copy_base(
        &[ffi::CPX_AT_LOWER, ffi::CPX_AT_LOWER],
        &[ffi::CPX_BASIC, ffi::CPX_BASIC],
    )
    .expect("failed to copy basis");

    prob.optimize().expect("optimize failed");
    assert_eq!(prob.solution_status().raw(), ffi::CPX_STAT_OPTIMAL);
}

use exex_model::{
    CoinTermId,
    CoinTermOptions,
    ExpressionManipulationModel,
    ModelEvent,
    ModelOptions,
    ReleaseOutcome,
    Vector2,
    ViewMode,
};
use exex_parser::MonomialType;
use pretty_assertions::assert_eq;

fn at(x: f64, y: f64) -> CoinTermOptions {
    CoinTermOptions::default().initial_position(x, y)
}

/// Drags the coin term to `(x, y)` and lets go of it.
fn drop_at(model: &mut ExpressionManipulationModel, id: CoinTermId, x: f64, y: f64) -> ReleaseOutcome {
    model.set_coin_term_user_controlled(id, true).unwrap();
    model.set_coin_term_position(id, Vector2::new(x, y)).unwrap();
    model.set_coin_term_user_controlled(id, false).unwrap().unwrap()
}

/// Steps the model long enough for every animation and fade to finish.
fn settle(model: &mut ExpressionManipulationModel) {
    for _ in 0..120 {
        model.step(1.0 / 60.0).unwrap();
    }
}

fn assert_compositions_sum(model: &ExpressionManipulationModel) {
    for coin_term in model.coin_terms() {
        assert_eq!(
            coin_term.composition().iter().sum::<i64>(),
            coin_term.total_count(),
            "{} is inconsistent",
            coin_term.id(),
        );
    }
}

#[test]
fn closest_like_term_absorbs() {
    let mut model = ExpressionManipulationModel::default();
    let far = model.create_coin_term(MonomialType::X, at(120.0, 100.0));
    let near = model.create_coin_term(MonomialType::X, at(110.0, 100.0));
    let moving = model.create_coin_term(MonomialType::X, at(500.0, 500.0));

    assert_eq!(drop_at(&mut model, moving, 100.0, 100.0), ReleaseOutcome::Absorbing { target: near });
    settle(&mut model);

    assert!(model.coin_term(moving).is_none());
    assert_eq!(model.coin_term(near).unwrap().total_count(), 2);
    assert_eq!(model.coin_term(far).unwrap().total_count(), 1);
    assert!(model
        .drain_events()
        .contains(&ModelEvent::CoinTermsCombined { survivor: near, absorbed: moving }));
    assert_compositions_sum(&model);
}

#[test]
fn equal_distances_pick_the_oldest() {
    let mut model = ExpressionManipulationModel::default();
    let older = model.create_coin_term(MonomialType::Y, at(90.0, 100.0));
    model.create_coin_term(MonomialType::Y, at(110.0, 100.0));
    let moving = model.create_coin_term(MonomialType::Y, at(500.0, 500.0));

    assert_eq!(drop_at(&mut model, moving, 100.0, 100.0), ReleaseOutcome::Absorbing { target: older });
}

#[test]
fn release_on_top_absorbs_immediately() {
    let mut model = ExpressionManipulationModel::default();
    let target = model.create_coin_term(MonomialType::Z, at(100.0, 100.0));
    let moving = model.create_coin_term(
        MonomialType::Z,
        at(500.0, 500.0).initial_count(2),
    );

    assert_eq!(drop_at(&mut model, moving, 100.0, 100.0), ReleaseOutcome::Absorbing { target });
    assert!(model.coin_term(moving).is_none());
    assert_eq!(model.coin_term(target).unwrap().composition(), &[1, 1, 1]);
}

#[test]
fn partial_cancellation() {
    let mut model = ExpressionManipulationModel::default();
    let target = model.create_coin_term(MonomialType::X, at(100.0, 100.0));
    let moving = model.create_coin_term(MonomialType::X, at(500.0, 500.0).initial_count(-2));

    drop_at(&mut model, moving, 100.0, 100.0);
    let target = model.coin_term(target).unwrap();
    assert_eq!(target.composition(), &[-1]);
    assert_eq!(target.total_count(), -1);
}

#[test]
fn no_partial_cancellation() {
    let mut model = ExpressionManipulationModel::new(ModelOptions::default().partial_cancellation(false));
    let target = model.create_coin_term(MonomialType::X, at(100.0, 100.0));
    let moving = model.create_coin_term(MonomialType::X, at(500.0, 500.0).initial_count(-2));

    drop_at(&mut model, moving, 100.0, 100.0);
    let target = model.coin_term(target).unwrap();
    assert_eq!(target.composition(), &[1, -1, -1]);
    assert_eq!(target.total_count(), -1);
}

#[test]
fn cancelled_terms_fade_away() {
    let mut model = ExpressionManipulationModel::default();
    let target = model.create_coin_term(MonomialType::X, at(100.0, 100.0));
    let moving = model.create_coin_term(MonomialType::X, at(500.0, 500.0).initial_count(-1));

    drop_at(&mut model, moving, 100.0, 100.0);
    model.step(0.1).unwrap();
    assert!(model.coin_term(target).unwrap().is_fading());

    settle(&mut model);
    assert!(model.coin_term(target).is_none());
    assert!(model.drain_events().contains(&ModelEvent::CoinTermRemoved(target)));
}

#[test]
fn grabbing_cancels_absorption() {
    let mut model = ExpressionManipulationModel::default();
    let target = model.create_coin_term(MonomialType::X, at(100.0, 100.0));
    let moving = model.create_coin_term(MonomialType::X, at(500.0, 500.0));

    drop_at(&mut model, moving, 150.0, 100.0);
    model.set_coin_term_user_controlled(moving, true).unwrap();

    // the interrupted journey jumps to its end, but nothing is absorbed
    assert_eq!(model.coin_term(moving).unwrap().position(), Vector2::new(100.0, 100.0));
    settle(&mut model);
    assert_eq!(model.coin_term(target).unwrap().total_count(), 1);
    assert!(model.coin_term(moving).is_some());
}

#[test]
fn unlike_terms_form_an_expression() {
    let mut model = ExpressionManipulationModel::default();
    let x = model.create_coin_term(MonomialType::X, at(100.0, 100.0));
    let one = model.create_coin_term(MonomialType::Constant, at(500.0, 500.0));

    let ReleaseOutcome::FormedExpression(id) = drop_at(&mut model, one, 150.0, 100.0) else {
        panic!("expected an expression to form");
    };
    settle(&mut model);

    let expression = model.expression(id).unwrap();
    assert_eq!(expression.coin_terms(), &[x, one]);
    assert_eq!(model.coin_term(x).unwrap().position(), Vector2::new(100.0, 100.0));
    assert_eq!(model.coin_term(one).unwrap().position(), Vector2::new(198.0, 100.0));
    assert_eq!(model.coin_term(x).unwrap().expression(), Some(id));
}

#[test]
fn variable_mode_uses_combine_distance() {
    let mut coins = ExpressionManipulationModel::default();
    let target = coins.create_coin_term(MonomialType::X, at(100.0, 100.0));
    let moving = coins.create_coin_term(MonomialType::X, at(500.0, 500.0));
    assert_eq!(drop_at(&mut coins, moving, 160.0, 100.0), ReleaseOutcome::Absorbing { target });

    let mut variables = ExpressionManipulationModel::default();
    variables.set_view_mode(ViewMode::Variables);
    variables.create_coin_term(MonomialType::X, at(100.0, 100.0));
    let moving = variables.create_coin_term(MonomialType::X, at(500.0, 500.0));
    assert!(matches!(
        drop_at(&mut variables, moving, 160.0, 100.0),
        ReleaseOutcome::FormedExpression(_),
    ));

    let mut variables = ExpressionManipulationModel::default();
    variables.set_view_mode(ViewMode::Variables);
    let target = variables.create_coin_term(MonomialType::X, at(100.0, 100.0));
    let moving = variables.create_coin_term(MonomialType::X, at(500.0, 500.0));
    assert_eq!(drop_at(&mut variables, moving, 140.0, 100.0), ReleaseOutcome::Absorbing { target });
}

#[test]
fn hint_while_dragging_near() {
    let mut model = ExpressionManipulationModel::default();
    let x = model.create_coin_term(MonomialType::X, at(100.0, 100.0).initial_count(2));
    let one = model.create_coin_term(MonomialType::Constant, at(500.0, 500.0));

    model.set_coin_term_user_controlled(one, true).unwrap();
    model.set_coin_term_position(one, Vector2::new(180.0, 100.0)).unwrap();
    model.step(1.0 / 60.0).unwrap();

    let hints = model.hints().to_vec();
    assert_eq!(hints.len(), 1);
    assert_eq!((hints[0].anchor(), hints[0].moving()), (x, one));
    assert!(hints[0].anchor_on_left());
    assert!(!model.coin_term(x).unwrap().break_apart_allowed());
    assert!(model.break_apart_coin_term(x).is_err());

    // dragging away removes the hint
    model.set_coin_term_position(one, Vector2::new(400.0, 100.0)).unwrap();
    model.step(1.0 / 60.0).unwrap();
    assert!(model.hints().is_empty());
    assert!(model.coin_term(x).unwrap().break_apart_allowed());
    assert!(model.drain_events().contains(&ModelEvent::HintRemoved(hints[0])));

    // coming back and letting go forms the expression
    model.set_coin_term_position(one, Vector2::new(180.0, 100.0)).unwrap();
    model.step(1.0 / 60.0).unwrap();
    assert_eq!(model.hints().len(), 1);
    let outcome = model.set_coin_term_user_controlled(one, false).unwrap().unwrap();
    assert!(matches!(outcome, ReleaseOutcome::FormedExpression(_)));
    assert!(model.hints().is_empty());
}

#[test]
fn break_apart_spreads_units() {
    let mut model = ExpressionManipulationModel::default();
    let stack = model.create_coin_term(MonomialType::X, at(300.0, 300.0).initial_count(3));

    let extracted = model.break_apart_coin_term(stack).unwrap();
    assert_eq!(extracted.len(), 2);
    assert_eq!(model.coin_term(stack).unwrap().composition(), &[1]);
    assert_eq!(model.coin_term(extracted[0]).unwrap().destination(), Vector2::new(382.0, 300.0));
    assert_eq!(model.coin_term(extracted[1]).unwrap().destination(), Vector2::new(218.0, 300.0));
    assert!(model.break_apart_coin_term(stack).is_err());
    assert!(model.drain_events().contains(&ModelEvent::CoinTermBrokenApart {
        original: stack,
        extracted: extracted.clone(),
    }));

    // recombining restores the stack
    settle(&mut model);
    for id in extracted {
        drop_at(&mut model, id, 300.0, 300.0);
    }
    let stack = model.coin_term(stack).unwrap();
    assert_eq!(stack.total_count(), 3);
    assert_eq!(stack.composition().len(), 3);
    assert_compositions_sum(&model);
}

#[test]
fn break_apart_stays_in_retrieval_bounds() {
    let mut model = ExpressionManipulationModel::default();
    model.set_retrieval_bounds(Some(exex_model::Bounds2::new(0.0, 0.0, 1000.0, 600.0)));
    let stack = model.create_coin_term(MonomialType::X, at(60.0, 300.0).initial_count(3));

    let extracted = model.break_apart_coin_term(stack).unwrap();
    assert_eq!(model.coin_term(extracted[1]).unwrap().destination(), Vector2::new(36.0, 300.0));
}

#[test]
fn released_outside_is_retrieved() {
    let mut model = ExpressionManipulationModel::default();
    model.set_retrieval_bounds(Some(exex_model::Bounds2::new(0.0, 0.0, 1000.0, 600.0)));
    let id = model.create_coin_term(MonomialType::X, at(100.0, 100.0));

    assert_eq!(
        drop_at(&mut model, id, 1200.0, 300.0),
        ReleaseOutcome::Retrieved { destination: Vector2::new(964.0, 300.0) },
    );
    assert_eq!(drop_at(&mut model, id, 500.0, 300.0), ReleaseOutcome::Nothing);
}

#[test]
fn creator_box_returns_to_origin() {
    let mut model = ExpressionManipulationModel::default();
    model.set_creator_box_bounds(Some(exex_model::Bounds2::new(0.0, 500.0, 800.0, 600.0)));
    let id = model.create_coin_term(
        MonomialType::Y,
        at(100.0, 550.0).initially_on_card(true),
    );

    model.set_coin_term_user_controlled(id, true).unwrap();
    model.set_coin_term_position(id, Vector2::new(300.0, 300.0)).unwrap();
    model.step(1.0 / 60.0).unwrap();
    model.set_coin_term_position(id, Vector2::new(400.0, 560.0)).unwrap();
    let outcome = model.set_coin_term_user_controlled(id, false).unwrap();
    assert_eq!(outcome, Some(ReleaseOutcome::ReturnedToOrigin));

    settle(&mut model);
    assert!(model.coin_term(id).is_none());
    assert!(model.drain_events().contains(&ModelEvent::ReturnedToOrigin(id)));
}

#[test]
fn value_follows_variables() {
    let mut model = ExpressionManipulationModel::default();
    let id = model.create_coin_term(MonomialType::XSquared, at(0.0, 0.0).initial_count(3));
    assert_eq!(model.coin_term_value(id).unwrap(), 12);

    model.set_variable_values(exex_parser::VariableValues { x: 5, y: 1, z: 1 });
    assert_eq!(model.coin_term_value(id).unwrap(), 75);
}
